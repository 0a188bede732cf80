//! Allocation request as read from JSON.

use serde::{Deserialize, Serialize};
use u_loadplan::core::{
    CostMap, LengthUnit, PackageRow, PackageUnit, TruckCatalogRow, TruckType,
};

/// One allocation request.
///
/// ```json
/// {
///   "unit": "cm",
///   "packages": [{"id": "P1", "quantity": 4, "length": 120, "width": 80, "height": 100}],
///   "trucks": [{"id": "T14", "name": "14ft Truck", "length": 14, "width": 6, "height": 6,
///               "weight_capacity": 2500}],
///   "costs": {"T14": {"amount": 4500, "currency": "INR"}},
///   "appreciation_percent": 10
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRequest {
    /// Unit of the package dimensions.
    #[serde(default)]
    pub unit: LengthUnit,

    /// Calculation-unit id of the enquiry catalog. Overrides `unit`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<u8>,

    /// Package lines.
    pub packages: Vec<PackageRow>,

    /// Truck catalog rows. May be empty when a catalog file is supplied.
    #[serde(default)]
    pub trucks: Vec<TruckCatalogRow>,

    /// Per-trip costs keyed by truck id.
    #[serde(default)]
    pub costs: CostMap,

    /// Mark-up applied to every cost, in percent.
    #[serde(default)]
    pub appreciation_percent: Option<f64>,
}

impl AllocationRequest {
    /// Unit of the package dimensions.
    pub fn length_unit(&self) -> LengthUnit {
        self.unit_id.map_or(self.unit, LengthUnit::from_id)
    }

    /// Package lines converted to feet.
    pub fn package_units(&self) -> Vec<PackageUnit> {
        let unit = self.length_unit();
        self.packages.iter().map(|row| row.to_unit(unit)).collect()
    }

    /// Usable truck types of the embedded catalog.
    pub fn truck_types(&self, clearance: f64) -> Vec<TruckType> {
        self.trucks
            .iter()
            .map(|row| TruckType::from_catalog(row, clearance))
            .collect()
    }

    /// Costs with the mark-up applied.
    pub fn cost_map(&self) -> CostMap {
        match self.appreciation_percent {
            Some(percent) if percent != 0.0 => self.costs.clone().with_appreciation(percent),
            _ => self.costs.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const REQUEST: &str = r#"{
        "unit": "cm",
        "packages": [
            {"id": "P1", "quantity": 4, "length": 120, "width": 80, "height": 100, "weight": 200},
            {"id": "P2", "length": 30.48, "width": 30.48, "height": 30.48, "stackable": false}
        ],
        "trucks": [
            {"id": "T14", "name": "14ft Truck", "length": 14, "width": 6, "height": 6,
             "weight_capacity": 2500}
        ],
        "costs": {"T14": {"amount": 4000, "currency": "INR"}},
        "appreciation_percent": 10
    }"#;

    #[test]
    fn test_parse_request() {
        let request: AllocationRequest = serde_json::from_str(REQUEST).unwrap();
        assert_eq!(request.unit, LengthUnit::Centimeter);
        assert_eq!(request.packages.len(), 2);
        assert_eq!(request.packages[1].quantity, 1);
        assert!(request.packages[0].stackable);
        assert!(!request.packages[1].stackable);

        let units = request.package_units();
        assert_relative_eq!(units[0].weight, 50.0);
        assert_relative_eq!(units[1].length, 1.0);

        let trucks = request.truck_types(0.25);
        assert_relative_eq!(trucks[0].usable_length(), 13.75);

        assert_relative_eq!(request.cost_map().rate("T14").unwrap(), 4400.0);
    }

    #[test]
    fn test_minimal_request() {
        let request: AllocationRequest =
            serde_json::from_str(r#"{"packages": []}"#).unwrap();
        assert_eq!(request.length_unit(), LengthUnit::Foot);
        assert!(request.trucks.is_empty());
        assert!(request.cost_map().is_empty());
    }

    #[test]
    fn test_unit_id_overrides_unit() {
        let request: AllocationRequest = serde_json::from_str(
            r#"{"unit": "ft", "unit_id": 2,
                "packages": [{"id": "P", "length": 24, "width": 12, "height": 6}]}"#,
        )
        .unwrap();
        assert_eq!(request.length_unit(), LengthUnit::Inch);

        let units = request.package_units();
        assert_relative_eq!(units[0].length, 2.0);
        assert_relative_eq!(units[0].height, 0.5);

        let unknown: AllocationRequest =
            serde_json::from_str(r#"{"unit": "cm", "unit_id": 9, "packages": []}"#).unwrap();
        assert_eq!(unknown.length_unit(), LengthUnit::Foot);
    }
}
