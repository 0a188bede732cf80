//! Truck catalog entries, usable space and per-trip costs.

use crate::units::cubic_feet_to_cbm;
use crate::{Error, Result};
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Truck type identifier.
pub type TruckId = String;

/// Clearance subtracted from every catalog dimension, in feet.
pub const DEFAULT_CLEARANCE: f64 = 0.25;

/// A truck type as stored in the vehicle catalog.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TruckCatalogRow {
    /// Catalog identifier.
    pub id: TruckId,
    /// Display name.
    pub name: String,
    /// Cargo bed length in feet.
    pub length: f64,
    /// Cargo bed width in feet.
    pub width: f64,
    /// Cargo bed height in feet.
    pub height: f64,
    /// Volumetric capacity in CBM (0 = derive from dimensions).
    #[cfg_attr(feature = "serde", serde(default))]
    pub volume_capacity: f64,
    /// Payload capacity in kilograms.
    pub weight_capacity: f64,
}

/// A truck type prepared for loading: usable dimensions and capacities.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TruckType {
    id: TruckId,
    name: String,
    usable_length: f64,
    usable_width: f64,
    usable_height: f64,
    volume_capacity: f64,
    weight_capacity: f64,
}

impl TruckType {
    /// Creates a truck type from usable dimensions (feet) and capacities.
    pub fn new(
        id: impl Into<TruckId>,
        name: impl Into<String>,
        usable_length: f64,
        usable_width: f64,
        usable_height: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            usable_length,
            usable_width,
            usable_height,
            volume_capacity: cubic_feet_to_cbm(usable_length, usable_width, usable_height),
            weight_capacity: f64::MAX,
        }
    }

    /// Sets the volumetric capacity in CBM.
    pub fn with_volume_capacity(mut self, cbm: f64) -> Self {
        self.volume_capacity = cbm;
        self
    }

    /// Sets the payload capacity in kilograms.
    pub fn with_weight_capacity(mut self, kg: f64) -> Self {
        self.weight_capacity = kg;
        self
    }

    /// Builds a truck type from a catalog row, subtracting `clearance` from
    /// each dimension.
    ///
    /// A missing (non-positive) volumetric capacity is derived from the
    /// usable box.
    pub fn from_catalog(row: &TruckCatalogRow, clearance: f64) -> Self {
        let usable_length = (row.length - clearance).max(0.0);
        let usable_width = (row.width - clearance).max(0.0);
        let usable_height = (row.height - clearance).max(0.0);

        let volume_capacity = if row.volume_capacity > 0.0 {
            row.volume_capacity
        } else {
            cubic_feet_to_cbm(usable_length, usable_width, usable_height)
        };

        Self {
            id: row.id.clone(),
            name: row.name.clone(),
            usable_length,
            usable_width,
            usable_height,
            volume_capacity,
            weight_capacity: row.weight_capacity.max(0.0),
        }
    }

    /// Returns the identifier.
    pub fn id(&self) -> &TruckId {
        &self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Usable length in feet.
    pub fn usable_length(&self) -> f64 {
        self.usable_length
    }

    /// Usable width in feet.
    pub fn usable_width(&self) -> f64 {
        self.usable_width
    }

    /// Usable height in feet.
    pub fn usable_height(&self) -> f64 {
        self.usable_height
    }

    /// Volumetric capacity in CBM.
    pub fn volume_capacity(&self) -> f64 {
        self.volume_capacity
    }

    /// Payload capacity in kilograms.
    pub fn weight_capacity(&self) -> f64 {
        self.weight_capacity
    }

    /// Largest of the three usable dimensions.
    pub fn max_usable_dimension(&self) -> f64 {
        self.usable_length
            .max(self.usable_width)
            .max(self.usable_height)
    }

    /// Whether a single box fits the usable space in either horizontal
    /// orientation. Height is never rotated.
    pub fn can_hold(&self, length: f64, width: f64, height: f64) -> bool {
        if height > self.usable_height {
            return false;
        }
        (length <= self.usable_length && width <= self.usable_width)
            || (width <= self.usable_length && length <= self.usable_width)
    }

    /// Checks that the truck can carry anything at all.
    pub fn validate(&self) -> Result<()> {
        let valid = |d: f64| d.is_finite() && d > 0.0;
        if !(valid(self.usable_length) && valid(self.usable_width) && valid(self.usable_height)) {
            return Err(Error::InvalidTruck(format!(
                "Usable dimensions for '{}' must be positive",
                self.id
            )));
        }
        if !valid(self.volume_capacity) {
            return Err(Error::InvalidTruck(format!(
                "Volume capacity for '{}' must be positive",
                self.id
            )));
        }
        Ok(())
    }
}

/// Trucks of the catalog that pass [`TruckType::validate`], in order.
///
/// Rejected trucks are logged and left out.
pub fn usable_trucks(trucks: &[TruckType]) -> Vec<TruckType> {
    trucks
        .iter()
        .filter(|truck| match truck.validate() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Skipping truck: {e}");
                false
            }
        })
        .cloned()
        .collect()
}

/// Per-trip cost of one truck of a given type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TruckCost {
    /// Cost of one trip.
    pub amount: f64,
    /// ISO currency code.
    pub currency: String,
}

impl TruckCost {
    /// Creates a new cost.
    pub fn new(amount: f64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }

    /// Applies a percentage mark-up on top of the contract rate.
    pub fn with_appreciation(mut self, percent: f64) -> Self {
        self.amount += self.amount * percent / 100.0;
        self
    }
}

/// Costs keyed by truck id. Trucks without an entry have no known rate.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CostMap {
    entries: HashMap<TruckId, TruckCost>,
}

impl CostMap {
    /// Creates an empty cost map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the cost for `truck_id`.
    pub fn insert(&mut self, truck_id: impl Into<TruckId>, cost: TruckCost) {
        self.entries.insert(truck_id.into(), cost);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, truck_id: impl Into<TruckId>, cost: TruckCost) -> Self {
        self.insert(truck_id, cost);
        self
    }

    /// Returns the cost entry for a truck id.
    pub fn get(&self, truck_id: &str) -> Option<&TruckCost> {
        self.entries.get(truck_id)
    }

    /// Returns the trip amount for a truck id, if known and non-zero.
    pub fn rate(&self, truck_id: &str) -> Option<f64> {
        self.entries
            .get(truck_id)
            .map(|c| c.amount)
            .filter(|amount| *amount != 0.0)
    }

    /// Returns the currency for a truck id, if known.
    pub fn currency(&self, truck_id: &str) -> Option<&str> {
        self.entries.get(truck_id).map(|c| c.currency.as_str())
    }

    /// Whether any cost is known.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Applies the same percentage mark-up to every entry.
    pub fn with_appreciation(self, percent: f64) -> Self {
        Self {
            entries: self
                .entries
                .into_iter()
                .map(|(id, cost)| (id, cost.with_appreciation(percent)))
                .collect(),
        }
    }
}

impl FromIterator<(TruckId, TruckCost)> for CostMap {
    fn from_iter<I: IntoIterator<Item = (TruckId, TruckCost)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Returns the display symbol for a currency code, or the code itself.
pub fn currency_symbol(code: &str) -> &str {
    match code {
        "USD" => "$",
        "INR" => "₹",
        "EUR" => "€",
        "GBP" => "£",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn row() -> TruckCatalogRow {
        TruckCatalogRow {
            id: "T20".into(),
            name: "20ft Container".into(),
            length: 20.25,
            width: 8.25,
            height: 8.25,
            volume_capacity: 0.0,
            weight_capacity: 9000.0,
        }
    }

    #[test]
    fn test_usable_dimensions() {
        let truck = TruckType::from_catalog(&row(), DEFAULT_CLEARANCE);
        assert_eq!(truck.usable_length(), 20.0);
        assert_eq!(truck.usable_width(), 8.0);
        assert_eq!(truck.usable_height(), 8.0);
        assert_eq!(truck.max_usable_dimension(), 20.0);
    }

    #[test]
    fn test_capacity_derived_when_missing() {
        let truck = TruckType::from_catalog(&row(), DEFAULT_CLEARANCE);
        assert_eq!(truck.volume_capacity(), cubic_feet_to_cbm(20.0, 8.0, 8.0));

        let mut explicit = row();
        explicit.volume_capacity = 33.0;
        let truck = TruckType::from_catalog(&explicit, DEFAULT_CLEARANCE);
        assert_eq!(truck.volume_capacity(), 33.0);
    }

    #[test]
    fn test_clearance_floors_at_zero() {
        let mut tiny = row();
        tiny.height = 0.1;
        let truck = TruckType::from_catalog(&tiny, DEFAULT_CLEARANCE);
        assert_eq!(truck.usable_height(), 0.0);
        assert!(truck.validate().is_err());
    }

    #[test]
    fn test_usable_trucks_skips_invalid() {
        let good = TruckType::new("G", "Good", 10.0, 4.0, 4.0);
        let flat = TruckType::new("F", "Flat", 10.0, 4.0, 0.0);
        let empty = TruckType::new("E", "Empty", 10.0, 4.0, 4.0).with_volume_capacity(0.0);
        let odd = TruckType::new("N", "Odd", f64::NAN, 4.0, 4.0);

        let kept = usable_trucks(&[flat, good.clone(), empty, odd]);
        assert_eq!(kept, vec![good]);
    }

    #[test]
    fn test_can_hold_rotation() {
        let truck = TruckType::new("T", "T", 10.0, 4.0, 6.0);
        assert!(truck.can_hold(3.0, 9.0, 6.0));
        assert!(!truck.can_hold(3.0, 11.0, 1.0));
        assert!(!truck.can_hold(1.0, 1.0, 6.5));
    }

    #[test]
    fn test_appreciation() {
        let cost = TruckCost::new(1000.0, "INR").with_appreciation(12.5);
        assert_relative_eq!(cost.amount, 1125.0);
    }

    #[test]
    fn test_cost_map() {
        let costs = CostMap::new()
            .with("A", TruckCost::new(100.0, "USD"))
            .with("Z", TruckCost::new(0.0, "USD"));
        assert_eq!(costs.rate("A"), Some(100.0));
        assert_eq!(costs.rate("Z"), None);
        assert_eq!(costs.rate("B"), None);
        assert_eq!(costs.currency("A"), Some("USD"));
        assert_eq!(costs.len(), 2);
    }

    #[test]
    fn test_currency_symbol() {
        assert_eq!(currency_symbol("EUR"), "€");
        assert_eq!(currency_symbol("JPY"), "JPY");
    }
}
