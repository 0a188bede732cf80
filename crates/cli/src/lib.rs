//! Command-line front end for U-LoadPlan.
//!
//! This crate provides:
//! - JSON allocation requests and their conversion to engine inputs
//! - Parsing of request, configuration and truck catalog files
//! - A file-backed truck catalog for the catalog cache
//! - The JSON report of the `validate` subcommand

mod parser;
mod report;
mod request;

pub use parser::{FileCatalog, ParseError, RequestParser};
pub use report::ValidationReport;
pub use request::AllocationRequest;
