//! Image references for every subsystem container
//!
//! Images come from the spec when overridden there and fall back to the
//! release-tagged defaults otherwise. The version parsed from an image's tag
//! seeds the `rht.comp_ver` metering label.

use amp_spec::ApiManager;
use regex::Regex;
use std::sync::LazyLock;

use crate::product::THREESCALE_RELEASE;
use crate::{Error, Result};

/// Reference grammar: `[host[:port]/]path[:tag][@digest]`.
pub static IMAGE_REFERENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<repository>(?:[a-zA-Z0-9.-]+(?::[0-9]+)?/)?[a-z0-9]+(?:[._-][a-z0-9]+)*(?:/[a-z0-9]+(?:[._-][a-z0-9]+)*)*)(?::(?P<tag>[\w][\w.-]{0,127}))?(?:@(?P<digest>[A-Za-z][A-Za-z0-9]*:[0-9a-fA-F]{32,}))?$",
    )
    .unwrap()
});

/// Version reported for images without a tag.
pub const UNTAGGED_VERSION: &str = "latest";

/// A parsed container image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    pub repository: String,
    pub tag: Option<String>,
    pub digest: Option<String>,
}

impl ImageReference {
    pub fn parse(image: &str) -> Option<Self> {
        let captures = IMAGE_REFERENCE_PATTERN.captures(image)?;
        Some(Self {
            repository: captures["repository"].to_string(),
            tag: captures.name("tag").map(|m| m.as_str().to_string()),
            digest: captures.name("digest").map(|m| m.as_str().to_string()),
        })
    }

    /// The tag, or `latest` when the reference is untagged.
    pub fn version(&self) -> &str {
        self.tag.as_deref().unwrap_or(UNTAGGED_VERSION)
    }
}

pub fn default_apicast_image() -> String {
    format!("quay.io/3scale/apicast:{THREESCALE_RELEASE}")
}

pub fn default_zync_image() -> String {
    format!("quay.io/3scale/zync:{THREESCALE_RELEASE}")
}

pub fn default_zync_database_postgresql_image() -> String {
    "centos/postgresql-10-centos7".to_string()
}

/// Image references the zync subsystem deploys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZyncImagesOptions {
    pub zync_image: ImageReference,
    pub zync_database_postgresql_image: ImageReference,
}

/// Resolves image references from a desired-state document.
///
/// Each subsystem parses only its own images, so a bad override for one
/// subsystem never fails another.
pub struct AmpImagesOptionsProvider<'a> {
    apimanager: &'a ApiManager,
}

impl<'a> AmpImagesOptionsProvider<'a> {
    pub fn new(apimanager: &'a ApiManager) -> Self {
        Self { apimanager }
    }

    pub fn get_apicast_image(&self) -> Result<ImageReference> {
        parse_image(
            "apicast",
            self.apimanager.spec.apicast.image.clone(),
            default_apicast_image,
        )
    }

    pub fn get_zync_images_options(&self) -> Result<ZyncImagesOptions> {
        let zync = &self.apimanager.spec.zync;
        Ok(ZyncImagesOptions {
            zync_image: parse_image("zync", zync.image.clone(), default_zync_image)?,
            zync_database_postgresql_image: parse_image(
                "zync-database",
                zync.postgresql_image.clone(),
                default_zync_database_postgresql_image,
            )?,
        })
    }
}

fn parse_image(
    component: &str,
    image: Option<String>,
    default: fn() -> String,
) -> Result<ImageReference> {
    let image = image.unwrap_or_else(default);
    ImageReference::parse(&image).ok_or_else(|| Error::InvalidImage {
        component: component.to_string(),
        image,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use rstest::rstest;

    #[rstest]
    #[case("quay.io/3scale/zync:2.11", "quay.io/3scale/zync", Some("2.11"))]
    #[case("centos/postgresql-10-centos7", "centos/postgresql-10-centos7", None)]
    #[case("localhost:5000/zync:nightly", "localhost:5000/zync", Some("nightly"))]
    #[case("zync", "zync", None)]
    fn test_parse_reference(
        #[case] image: &str,
        #[case] repository: &str,
        #[case] tag: Option<&str>,
    ) {
        let reference = ImageReference::parse(image).unwrap();
        assert_eq!(reference.repository, repository);
        assert_eq!(reference.tag.as_deref(), tag);
        assert_eq!(reference.version(), tag.unwrap_or("latest"));
    }

    #[test]
    fn test_parse_digest() {
        let digest = format!("sha256:{}", "a".repeat(64));
        let reference =
            ImageReference::parse(&format!("quay.io/3scale/apicast:2.11@{digest}")).unwrap();
        assert_eq!(reference.tag.as_deref(), Some("2.11"));
        assert_eq!(reference.digest.as_deref(), Some(digest.as_str()));
    }

    #[rstest]
    #[case("")]
    #[case("Quay Io/zync")]
    #[case("quay.io/3scale/zync:")]
    fn test_reject_malformed(#[case] image: &str) {
        assert!(ImageReference::parse(image).is_none());
    }

    #[test]
    fn test_defaults_are_release_tagged() {
        let apimanager = ApiManager::new("example", "ns");
        let provider = AmpImagesOptionsProvider::new(&apimanager);
        let zync = provider.get_zync_images_options().unwrap();
        let apicast = provider.get_apicast_image().unwrap();

        assert_eq!(zync.zync_image.version(), THREESCALE_RELEASE);
        assert_eq!(zync.zync_database_postgresql_image.version(), "latest");
        assert_eq!(apicast.version(), THREESCALE_RELEASE);
    }

    #[test]
    fn test_spec_override_and_invalid_image() {
        let mut apimanager = ApiManager::new("example", "ns");
        apimanager.spec.zync.image = Some("registry.example.com/zync:custom".into());
        let images = AmpImagesOptionsProvider::new(&apimanager)
            .get_zync_images_options()
            .unwrap();
        assert_eq!(images.zync_image.version(), "custom");

        apimanager.spec.apicast.image = Some("not a valid image".into());
        let err = AmpImagesOptionsProvider::new(&apimanager)
            .get_apicast_image()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Image);
    }

    #[test]
    fn test_invalid_image_only_fails_its_own_subsystem() {
        let mut apimanager = ApiManager::new("example", "ns");
        apimanager.spec.apicast.image = Some("Registry.Example/APIcast:custom".into());
        let provider = AmpImagesOptionsProvider::new(&apimanager);
        assert!(provider.get_zync_images_options().is_ok());
        assert!(provider.get_apicast_image().is_err());

        let mut apimanager = ApiManager::new("example", "ns");
        apimanager.spec.zync.postgresql_image = Some("Not A Valid Image".into());
        let provider = AmpImagesOptionsProvider::new(&apimanager);
        assert!(provider.get_apicast_image().is_ok());
        assert_eq!(
            provider.get_zync_images_options().unwrap_err().kind(),
            ErrorKind::Image
        );
    }
}
