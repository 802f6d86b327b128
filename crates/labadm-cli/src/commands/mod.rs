//! CLI command implementations.

pub mod check;
pub mod convert;
pub mod instruments;

use std::path::Path;

use labadm::ConvertConfig;

/// Load the configuration file if one was given, otherwise defaults.
pub(crate) fn load_config(
    path: Option<&Path>,
) -> Result<ConvertConfig, Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            log::debug!("Loading configuration from {}", p.display());
            Ok(ConvertConfig::from_file(p)?)
        }
        None => Ok(ConvertConfig::default()),
    }
}
