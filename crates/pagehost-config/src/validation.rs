//! Full configuration validation.
//!
//! Each section has its own submodule; this orchestrator runs them all and
//! collects every violation into a single `ConfigError`.

mod helpers;
mod page;
mod system;
mod theme;


pub use helpers::{is_js_identifier_path, is_valid_host, is_valid_scheme, STANDARD_SCHEMES};

use crate::schema::PageHostConfig;
use pagehost_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &PageHostConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    page::validate_page(&mut errors, config);
    page::validate_bridge(&mut errors, config);
    theme::validate_theme(&mut errors, config);
    system::validate_logging(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
