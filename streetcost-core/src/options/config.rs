//! Loading traveler configuration from TOML or JSON documents

use std::path::Path;

use log::debug;

use super::TraverseOptions;
use crate::Error;

impl TraverseOptions {
    /// Parse and validate options from a TOML document
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or fails validation
    pub fn from_toml_str(document: &str) -> Result<Self, Error> {
        let options: Self = toml::from_str(document)?;
        options.validate()?;
        Ok(options)
    }

    /// Parse and validate options from a JSON document
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or fails validation
    pub fn from_json_str(document: &str) -> Result<Self, Error> {
        let options: Self = serde_json::from_str(document)?;
        options.validate()?;
        Ok(options)
    }

    /// Read options from a file. `.json` files are parsed as JSON,
    /// everything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        debug!("Loading traverse options from {}", path.display());

        let document = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&document)
        } else {
            Self::from_toml_str(&document)
        }
    }
}
