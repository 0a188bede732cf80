//! Package rows, per-unit packages and quantity-weighted package groups.
//!
//! Raw rows arrive from the enquiry store (or a request body) in any length
//! unit. They are converted to feet ([`PackageUnit`]), validated against the
//! truck catalog, and merged into [`PackageGroup`]s by identical shape,
//! weight and stackability. Groups come out in consumption order: hard to
//! place items first, stackable fillers last.

use crate::result::{ValidationFailure, ValidationReason};
use crate::truck::TruckType;
use crate::units::{cubic_feet_to_cbm, LengthUnit};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Package identifier.
pub type PackageId = String;

/// One package line as entered by the user.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackageRow {
    /// External identifier.
    pub id: PackageId,
    /// Number of identical packages on this line.
    #[cfg_attr(feature = "serde", serde(default = "default_quantity"))]
    pub quantity: usize,
    /// Length in the request's unit.
    pub length: f64,
    /// Width in the request's unit.
    pub width: f64,
    /// Height in the request's unit.
    pub height: f64,
    /// Total weight of the line in kilograms.
    #[cfg_attr(feature = "serde", serde(default))]
    pub weight: f64,
    /// Whether other packages may be stacked on top.
    #[cfg_attr(feature = "serde", serde(default = "default_stackable"))]
    pub stackable: bool,
}

#[cfg(feature = "serde")]
fn default_quantity() -> usize {
    1
}

#[cfg(feature = "serde")]
fn default_stackable() -> bool {
    true
}

impl PackageRow {
    /// Creates a single stackable, weightless package line.
    pub fn new(id: impl Into<PackageId>, length: f64, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            quantity: 1,
            length,
            width,
            height,
            weight: 0.0,
            stackable: true,
        }
    }

    /// Sets the quantity.
    pub fn with_quantity(mut self, n: usize) -> Self {
        self.quantity = n;
        self
    }

    /// Sets the total line weight.
    pub fn with_weight(mut self, kg: f64) -> Self {
        self.weight = kg;
        self
    }

    /// Sets whether the package is stackable.
    pub fn with_stackable(mut self, stackable: bool) -> Self {
        self.stackable = stackable;
        self
    }

    /// Converts the line to feet and derives volume and per-unit weight.
    pub fn to_unit(&self, unit: LengthUnit) -> PackageUnit {
        let length = unit.to_feet(self.length);
        let width = unit.to_feet(self.width);
        let height = unit.to_feet(self.height);
        PackageUnit {
            id: self.id.clone(),
            quantity: self.quantity,
            length,
            width,
            height,
            volume: cubic_feet_to_cbm(length, width, height),
            weight: self.weight / self.quantity.max(1) as f64,
            stackable: self.stackable,
        }
    }
}

/// A package line in feet with derived volume and per-unit weight.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackageUnit {
    /// External identifier.
    pub id: PackageId,
    /// Number of units.
    pub quantity: usize,
    /// Length in feet.
    pub length: f64,
    /// Width in feet.
    pub width: f64,
    /// Height in feet.
    pub height: f64,
    /// Volume of one unit in CBM.
    pub volume: f64,
    /// Weight of one unit in kilograms.
    pub weight: f64,
    /// Whether other packages may be stacked on top.
    pub stackable: bool,
}

impl PackageUnit {
    /// Largest of the three dimensions.
    pub fn max_dimension(&self) -> f64 {
        self.length.max(self.width).max(self.height)
    }

    /// Smallest of the three dimensions.
    pub fn min_dimension(&self) -> f64 {
        self.length.min(self.width).min(self.height)
    }

    /// Checks quantity and dimensions of this line.
    ///
    /// A dimension must be finite and strictly positive.
    pub fn validate(&self) -> std::result::Result<(), ValidationReason> {
        if self.quantity == 0 {
            return Err(ValidationReason::InvalidQuantity);
        }
        let valid = |d: f64| d.is_finite() && d > 0.0;
        if !(valid(self.length) && valid(self.width) && valid(self.height)) {
            return Err(ValidationReason::InvalidDimensions);
        }
        Ok(())
    }
}

/// Checks package lines against the truck catalog before any packing.
///
/// Every line is inspected so that all offending ids are reported together;
/// the first offending line decides the reason. An id repeated on a later
/// line offends on that line.
pub fn validate_rows(
    units: &[PackageUnit],
    trucks: &[TruckType],
) -> std::result::Result<(), ValidationFailure> {
    if units.is_empty() {
        return Err(ValidationFailure::new(ValidationReason::NoPackages));
    }
    if trucks.is_empty() {
        return Err(ValidationFailure::new(ValidationReason::NoTrucks));
    }

    let limit = trucks
        .iter()
        .map(TruckType::max_usable_dimension)
        .fold(0.0_f64, f64::max);

    let mut seen: HashSet<&str> = HashSet::with_capacity(units.len());
    let mut failure: Option<ValidationFailure> = None;
    for unit in units {
        let first_use = seen.insert(unit.id.as_str());
        let reason = match unit.validate() {
            Err(reason) => reason,
            Ok(()) if unit.max_dimension() > limit => ValidationReason::OversizedPackage {
                max_dimension: unit.max_dimension(),
                limit,
            },
            Ok(()) if !first_use => ValidationReason::DuplicatePackageId,
            Ok(()) => continue,
        };

        failure
            .get_or_insert_with(|| ValidationFailure::new(reason))
            .offending_package_ids
            .push(unit.id.clone());
    }

    match failure {
        Some(f) => Err(f),
        None => Ok(()),
    }
}

/// Packages merged across lines with identical shape, weight and
/// stackability.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackageGroup {
    package_ids: Vec<PackageId>,
    quantity: usize,
    length: f64,
    width: f64,
    height: f64,
    volume: f64,
    weight: f64,
    stackable: bool,
}

impl PackageGroup {
    /// Creates a group directly from per-unit values (feet, CBM, kg).
    pub fn new(
        id: impl Into<PackageId>,
        length: f64,
        width: f64,
        height: f64,
        weight: f64,
        stackable: bool,
    ) -> Self {
        Self {
            package_ids: vec![id.into()],
            quantity: 1,
            length,
            width,
            height,
            volume: cubic_feet_to_cbm(length, width, height),
            weight,
            stackable,
        }
    }

    /// Sets the combined quantity.
    pub fn with_quantity(mut self, n: usize) -> Self {
        self.quantity = n;
        self
    }

    fn from_unit(unit: &PackageUnit) -> Self {
        Self {
            package_ids: vec![unit.id.clone()],
            quantity: unit.quantity,
            length: unit.length,
            width: unit.width,
            height: unit.height,
            volume: unit.volume,
            weight: unit.weight,
            stackable: unit.stackable,
        }
    }

    /// Identity key of the group: its smallest originating id.
    pub fn key(&self) -> &str {
        self.package_ids.first().map(String::as_str).unwrap_or("")
    }

    /// Originating package ids, sorted.
    pub fn package_ids(&self) -> &[PackageId] {
        &self.package_ids
    }

    /// Combined quantity.
    pub fn quantity(&self) -> usize {
        self.quantity
    }

    /// Length in feet.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Width in feet.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height in feet.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Volume of one unit in CBM.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Weight of one unit in kilograms.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Whether other packages may be stacked on top.
    pub fn is_stackable(&self) -> bool {
        self.stackable
    }

    /// Largest of the three dimensions.
    pub fn max_dimension(&self) -> f64 {
        self.length.max(self.width).max(self.height)
    }

    /// Larger of the two horizontal dimensions.
    pub fn max_footprint_side(&self) -> f64 {
        self.length.max(self.width)
    }

    /// Volume of one unit in cubic feet.
    pub fn cubic_feet(&self) -> f64 {
        self.length * self.width * self.height
    }

    /// Whether one unit fits the truck's usable space.
    pub fn fits_truck(&self, truck: &TruckType) -> bool {
        truck.can_hold(self.length, self.width, self.height)
    }
}

type GroupKey = (u64, u64, u64, u64, bool);

fn group_key(unit: &PackageUnit) -> GroupKey {
    (
        unit.length.to_bits(),
        unit.width.to_bits(),
        unit.height.to_bits(),
        unit.weight.to_bits(),
        unit.stackable,
    )
}

/// Consumption order: largest dimension first, then non-stackable before
/// stackable, then larger volume first.
fn consumption_order(a: &PackageGroup, b: &PackageGroup) -> Ordering {
    b.max_dimension()
        .total_cmp(&a.max_dimension())
        .then(a.stackable.cmp(&b.stackable))
        .then(b.cubic_feet().total_cmp(&a.cubic_feet()))
        .then(a.length.total_cmp(&b.length))
        .then(a.width.total_cmp(&b.width))
        .then(a.height.total_cmp(&b.height))
        .then(a.weight.total_cmp(&b.weight))
        .then_with(|| a.key().cmp(b.key()))
}

/// Merges package units into groups and sorts them in consumption order.
///
/// The result does not depend on the order of `units`.
pub fn normalize(units: &[PackageUnit]) -> Vec<PackageGroup> {
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<PackageGroup> = Vec::new();

    for unit in units {
        match index.get(&group_key(unit)) {
            Some(&slot) => {
                let group = &mut groups[slot];
                group.package_ids.push(unit.id.clone());
                group.quantity += unit.quantity;
            }
            None => {
                index.insert(group_key(unit), groups.len());
                groups.push(PackageGroup::from_unit(unit));
            }
        }
    }

    for group in &mut groups {
        group.package_ids.sort();
        group.package_ids.dedup();
    }
    groups.sort_by(consumption_order);

    log::debug!(
        "Normalized {} package lines into {} groups",
        units.len(),
        groups.len()
    );
    groups
}

/// Total number of units across groups.
pub fn total_quantity(groups: &[PackageGroup]) -> usize {
    groups.iter().map(PackageGroup::quantity).sum()
}
