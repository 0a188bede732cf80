//! Outcome of the `validate` subcommand.

use crate::request::AllocationRequest;
use serde::Serialize;
use u_loadplan::core::{usable_trucks, validate_rows, TruckType, ValidationFailure};

/// Machine-readable verdict on a request, printed whether or not it passes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Whether the request would be accepted by the allocator.
    pub valid: bool,
    /// Why the request was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<ValidationFailure>,
}

impl ValidationReport {
    /// Runs the allocator's pre-packing checks on `request` against `trucks`.
    ///
    /// Trucks that cannot carry anything are left out first, as the
    /// allocator does.
    pub fn check(request: &AllocationRequest, trucks: &[TruckType]) -> Self {
        let trucks = usable_trucks(trucks);
        match validate_rows(&request.package_units(), &trucks) {
            Ok(()) => Self {
                valid: true,
                failure: None,
            },
            Err(failure) => Self {
                valid: false,
                failure: Some(failure),
            },
        }
    }
}
