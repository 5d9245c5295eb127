//! The components command

use amp_rules::RuleFactoryRegistry;
use colored::Colorize;

use crate::error::Result;

pub fn run_components(registry: &RuleFactoryRegistry) -> Result<()> {
    println!("{}", "Rule factories".bold());
    for subsystem in registry.subsystems() {
        println!("  {}", subsystem.green());
    }
    Ok(())
}
