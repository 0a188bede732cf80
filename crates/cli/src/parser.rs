//! Reading requests, configuration and truck catalogs from disk.

use crate::request::AllocationRequest;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use u_loadplan::core::{CatalogSource, Config, Error, TruckCatalogRow};

/// Errors that can occur when reading input files.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] Error),
}

/// Parser for request and configuration files.
#[derive(Debug, Default)]
pub struct RequestParser;

impl RequestParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self
    }

    /// Parses a request from a JSON file.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<AllocationRequest, ParseError> {
        read_json(path)
    }

    /// Parses a request from a JSON string.
    pub fn parse_json(&self, json: &str) -> Result<AllocationRequest, ParseError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads and validates an engine configuration. Missing fields take
    /// their default values.
    pub fn parse_config(&self, path: impl AsRef<Path>) -> Result<Config, ParseError> {
        let config: Config = read_json(path)?;
        config.validate()?;
        Ok(config)
    }
}

fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ParseError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Truck catalog stored as a JSON array of rows.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    /// Creates a catalog source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileCatalog {
    fn fetch(&self) -> u_loadplan::core::Result<Vec<TruckCatalogRow>> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            Error::CatalogUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| Error::Serialization(e.to_string()))
    }
}
