//! Default value generators shared by every subsystem

use amp_spec::LocalObjectReference;
use rand::Rng;
use rand::distributions::Alphanumeric;

/// Length of generated credentials, keys and tokens.
pub const GENERATED_SECRET_LENGTH: usize = 16;

/// Name of the pull secret used when the spec declares none.
pub const DEFAULT_IMAGE_PULL_SECRET: &str = "threescale-registry-auth";

/// Fresh random alphanumeric string from the thread-local CSPRNG.
pub fn random_string(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Image pull secrets used when the spec declares none.
pub fn default_image_pull_secrets() -> Vec<LocalObjectReference> {
    vec![LocalObjectReference::new(DEFAULT_IMAGE_PULL_SECRET)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_string_shape() {
        let value = random_string(GENERATED_SECRET_LENGTH);
        assert_eq!(value.len(), GENERATED_SECRET_LENGTH);
        assert!(value.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_random_string_is_not_fixed() {
        assert_ne!(
            random_string(GENERATED_SECRET_LENGTH),
            random_string(GENERATED_SECRET_LENGTH)
        );
    }

    #[test]
    fn test_default_image_pull_secrets() {
        assert_eq!(
            default_image_pull_secrets(),
            vec![LocalObjectReference::new("threescale-registry-auth")]
        );
    }
}
