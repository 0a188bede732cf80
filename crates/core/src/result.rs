//! Allocation results and user-facing options.

use crate::package::PackageId;
use crate::solver::Strategy;
use crate::truck::TruckId;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why a request was rejected before packing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum ValidationReason {
    /// The request carries no package lines.
    NoPackages,
    /// The catalog is empty.
    NoTrucks,
    /// A line has a zero quantity.
    InvalidQuantity,
    /// A line has a non-positive or non-finite dimension.
    InvalidDimensions,
    /// A package is longer than every truck's largest usable dimension.
    OversizedPackage {
        /// Largest dimension of the offending package (feet).
        max_dimension: f64,
        /// Largest usable dimension in the catalog (feet).
        limit: f64,
    },
    /// The same package id appears on more than one line.
    DuplicatePackageId,
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPackages => write!(f, "No packages to allocate"),
            Self::NoTrucks => write!(f, "No trucks available"),
            Self::InvalidQuantity => write!(f, "Package quantity must be at least 1"),
            Self::InvalidDimensions => write!(f, "Package dimensions must be positive numbers"),
            Self::OversizedPackage {
                max_dimension,
                limit,
            } => write!(
                f,
                "Package dimension {max_dimension:.2} ft exceeds the largest truck dimension {limit:.2} ft"
            ),
            Self::DuplicatePackageId => write!(f, "Package ids must be unique"),
        }
    }
}

/// A rejected request: the reason plus every offending package id.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValidationFailure {
    /// Reason taken from the first offending line.
    pub reason: ValidationReason,
    /// Ids of all offending lines, in input order.
    pub offending_package_ids: Vec<PackageId>,
}

impl ValidationFailure {
    /// Creates a failure with no offending ids yet.
    pub fn new(reason: ValidationReason) -> Self {
        Self {
            reason,
            offending_package_ids: Vec::new(),
        }
    }
}

/// Trucks of one type used by a plan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TruckAllocation {
    /// Truck type id.
    pub truck_id: TruckId,
    /// Truck display name.
    pub truck_name: String,
    /// Number of trucks of this type.
    pub count: usize,
    /// Packages carried by all trucks of this type.
    pub packages: usize,
    /// Occupied volume in CBM.
    pub used_volume: f64,
    /// Carried weight in kilograms.
    pub used_weight: f64,
    /// Known per-trip cost, 0 when unknown.
    pub cost_per_truck: f64,
    /// Currency of the cost.
    pub currency: String,
    /// `cost_per_truck × count`.
    pub line_total: f64,
}

impl TruckAllocation {
    /// Display part such as `"2 × 32ft Truck"`.
    pub fn label(&self) -> String {
        if self.count > 1 {
            format!("{} × {}", self.count, self.truck_name)
        } else {
            self.truck_name.clone()
        }
    }
}

/// Outcome of an allocation request.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "status", rename_all = "snake_case"))]
pub enum AllocationResult {
    /// Every package was placed.
    Success {
        /// Trucks used, per type.
        allocations: Vec<TruckAllocation>,
        /// Sum of known costs.
        total_cost: f64,
        /// Currency of the total.
        currency: String,
        /// Strategy that produced the plan.
        strategy: Strategy,
    },
    /// Some packages could not be placed anywhere.
    Partial {
        /// Trucks used, per type.
        allocations: Vec<TruckAllocation>,
        /// Units left unplaced.
        remaining_count: usize,
        /// Summary such as `"Allocated 5/7. 2 remain"`.
        message: String,
    },
    /// The request was rejected before packing.
    ValidationFailed {
        /// Why.
        reason: ValidationReason,
        /// Offending package ids.
        offending_package_ids: Vec<PackageId>,
    },
}

impl AllocationResult {
    /// Whether every package was placed.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Truck lines of the plan (empty on validation failure).
    pub fn allocations(&self) -> &[TruckAllocation] {
        match self {
            Self::Success { allocations, .. } | Self::Partial { allocations, .. } => allocations,
            Self::ValidationFailed { .. } => &[],
        }
    }

    /// Total number of trucks.
    pub fn truck_count(&self) -> usize {
        self.allocations().iter().map(|a| a.count).sum()
    }

    /// Units left unplaced.
    pub fn remaining_count(&self) -> usize {
        match self {
            Self::Partial {
                remaining_count, ..
            } => *remaining_count,
            _ => 0,
        }
    }
}

impl From<ValidationFailure> for AllocationResult {
    fn from(failure: ValidationFailure) -> Self {
        Self::ValidationFailed {
            reason: failure.reason,
            offending_package_ids: failure.offending_package_ids,
        }
    }
}

/// How an option was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OptionKind {
    /// Several trucks of one type.
    SingleType,
    /// A combination of good-value types.
    Mixed,
    /// The allocator's own plan.
    AlgorithmSuggested,
    /// The largest trucks in the catalog.
    HighCapacity,
}

/// A ranked, user-facing loading plan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AllocationOption {
    /// 1-based rank by cost.
    pub id: usize,
    /// Display name.
    pub name: String,
    /// Derivation.
    pub kind: OptionKind,
    /// Trucks used, per type.
    pub allocations: Vec<TruckAllocation>,
    /// Sum of line totals.
    pub total_cost: f64,
    /// Currency of the total.
    pub currency: String,
    /// Number of trucks.
    pub truck_count: usize,
    /// Packages covered.
    pub total_packages: usize,
}

impl AllocationOption {
    /// Total cost in cents, used to detect duplicate options.
    pub fn cost_cents(&self) -> i64 {
        (self.total_cost * 100.0).round() as i64
    }
}
