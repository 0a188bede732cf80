//! Integration tests for u-loadplan-fleet.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_loadplan_core::{
    cubic_feet_to_cbm, normalize, AllocationResult, CostMap, LengthUnit, PackageRow, PackageUnit,
    Planner, Strategy, TruckCost, TruckType, ValidationReason,
};
use u_loadplan_fleet::{allocate, generate_options, selector, Allocator, TruckInstance};

fn units(rows: &[PackageRow]) -> Vec<PackageUnit> {
    rows.iter().map(|r| r.to_unit(LengthUnit::Foot)).collect()
}

fn cube_truck(id: &str, length: f64) -> TruckType {
    TruckType::new(id, format!("{length}ft Truck"), length, 2.0, 2.0).with_volume_capacity(100.0)
}

fn assert_instance_invariants(instance: &TruckInstance) {
    let space = instance.space();
    let boxes = space.boxes();
    for (i, b) in boxes.iter().enumerate() {
        assert!(space.container().aabb().contains(&b.aabb()), "box {i} out of bounds");
        for other in &boxes[i + 1..] {
            assert!(!b.aabb().overlaps(&other.aabb()));
        }
    }
    assert!(space.used_volume() <= instance.truck().volume_capacity() + 1e-9);
    assert!(space.used_weight() <= instance.truck().weight_capacity() + 1e-9);
}

mod scenario_tests {
    use super::*;

    #[test]
    fn test_exact_fit_single_truck() {
        let packages = units(&[PackageRow::new("P1", 4.0, 2.0, 5.0).with_quantity(10)]);
        let trucks = [TruckType::new("T20", "20ft Truck", 20.0, 4.0, 5.0)
            .with_volume_capacity(cubic_feet_to_cbm(4.0, 2.0, 5.0) * 10.0)];
        let costs = CostMap::new().with("T20", TruckCost::new(9000.0, "INR"));

        let result = allocate(&packages, &trucks, &costs);
        match result {
            AllocationResult::Success {
                allocations,
                total_cost,
                currency,
                ..
            } => {
                assert_eq!(allocations.len(), 1);
                assert_eq!(allocations[0].count, 1);
                assert_eq!(allocations[0].packages, 10);
                assert_eq!(total_cost, 9000.0);
                assert_eq!(currency, "INR");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_oversized_package_rejected() {
        let packages = units(&[
            PackageRow::new("OK", 2.0, 2.0, 2.0),
            PackageRow::new("BIG", 50.0, 2.0, 2.0),
        ]);
        let trucks = [cube_truck("T40", 40.0)];

        match allocate(&packages, &trucks, &CostMap::new()) {
            AllocationResult::ValidationFailed {
                reason,
                offending_package_ids,
            } => {
                assert!(matches!(reason, ValidationReason::OversizedPackage { .. }));
                assert_eq!(offending_package_ids, ["BIG"]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_nan_dimension_rejected_before_packing() {
        let packages = units(&[PackageRow::new("NAN", 2.0, f64::NAN, 2.0)]);
        let trucks = [TruckType::new("T", "10ft Truck", 10.0, 4.0, 4.0)];

        let result = allocate(&packages, &trucks, &CostMap::new());
        assert!(generate_options(&packages, &trucks, &CostMap::new(), &result).is_empty());
        match result {
            AllocationResult::ValidationFailed {
                reason,
                offending_package_ids,
            } => {
                assert_eq!(reason, ValidationReason::InvalidDimensions);
                assert_eq!(offending_package_ids, ["NAN"]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_cheaper_per_unit_truck_wins() {
        // A holds 5 cubes for 100, B holds 20 cubes for 150.
        let packages = units(&[PackageRow::new("C", 2.0, 2.0, 2.0).with_quantity(20)]);
        let trucks = [cube_truck("A", 10.0), cube_truck("B", 40.0)];
        let costs = CostMap::new()
            .with("A", TruckCost::new(100.0, "INR"))
            .with("B", TruckCost::new(150.0, "INR"));

        match allocate(&packages, &trucks, &costs) {
            AllocationResult::Success {
                allocations,
                total_cost,
                ..
            } => {
                assert_eq!(allocations.len(), 1);
                assert_eq!(allocations[0].truck_id, "B");
                assert_eq!(allocations[0].count, 1);
                assert_eq!(total_cost, 150.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unplaceable_units_reported() {
        // The tall boxes pass validation but are higher than every truck.
        let packages = units(&[
            PackageRow::new("C", 2.0, 2.0, 2.0).with_quantity(5),
            PackageRow::new("TALL", 1.0, 1.0, 3.0).with_quantity(2),
        ]);
        let trucks = [cube_truck("T", 10.0)];
        let costs = CostMap::new().with("T", TruckCost::new(100.0, "INR"));

        let result = allocate(&packages, &trucks, &costs);
        assert_eq!(result.remaining_count(), 2);
        match result {
            AllocationResult::Partial {
                allocations,
                message,
                ..
            } => {
                assert_eq!(allocations[0].packages, 5);
                assert_eq!(message, "Allocated 5/7. 2 remain");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_cheap_small_trucks_kept() {
        // Three small trucks cost 30; the large truck alone costs 90.
        let packages = units(&[PackageRow::new("C", 2.0, 2.0, 2.0).with_quantity(3)]);
        let trucks = [cube_truck("S", 2.0), cube_truck("L", 6.0)];
        let costs = CostMap::new()
            .with("S", TruckCost::new(10.0, "INR"))
            .with("L", TruckCost::new(90.0, "INR"));

        match allocate(&packages, &trucks, &costs) {
            AllocationResult::Success {
                allocations,
                total_cost,
                strategy,
                ..
            } => {
                assert_eq!(total_cost, 30.0);
                assert_eq!(allocations[0].truck_id, "S");
                assert_eq!(allocations[0].count, 3);
                assert_ne!(strategy, Strategy::SingleTruck);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_single_truck_override() {
        // Group by group the small truck is cheaper per unit, so three are
        // opened (120); one large truck takes everything for 90.
        let packages = units(&[
            PackageRow::new("C", 2.0, 2.0, 2.0).with_quantity(2),
            PackageRow::new("D", 2.0, 2.0, 2.0).with_weight(5.0),
        ]);
        let trucks = [cube_truck("S", 2.0), cube_truck("L", 6.0)];
        let costs = CostMap::new()
            .with("S", TruckCost::new(40.0, "INR"))
            .with("L", TruckCost::new(90.0, "INR"));

        match allocate(&packages, &trucks, &costs) {
            AllocationResult::Success {
                allocations,
                total_cost,
                strategy,
                ..
            } => {
                assert_eq!(strategy, Strategy::SingleTruck);
                assert_eq!(total_cost, 90.0);
                assert_eq!(allocations.len(), 1);
                assert_eq!(allocations[0].truck_id, "L");
                assert_eq!(allocations[0].packages, 3);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}

mod invariant_tests {
    use super::*;

    fn random_rows(rng: &mut StdRng, n: usize) -> Vec<PackageRow> {
        (0..n)
            .map(|i| {
                let side = |rng: &mut StdRng| f64::from(rng.gen_range(2u32..=8)) * 0.5;
                let qty = rng.gen_range(1..=12);
                PackageRow::new(format!("P{i}"), side(rng), side(rng), side(rng))
                    .with_quantity(qty)
                    .with_weight(f64::from(rng.gen_range(1u32..=40)) * qty as f64)
                    .with_stackable(rng.gen_bool(0.7))
            })
            .collect()
    }

    fn catalog() -> (Vec<TruckType>, CostMap) {
        let trucks = vec![
            TruckType::new("T8", "8ft Pickup", 7.75, 4.75, 4.75).with_weight_capacity(750.0),
            TruckType::new("T14", "14ft Truck", 13.75, 5.75, 5.75).with_weight_capacity(2500.0),
            TruckType::new("T20", "20ft Truck", 19.75, 6.75, 6.75).with_weight_capacity(5000.0),
        ];
        let costs = CostMap::new()
            .with("T8", TruckCost::new(1200.0, "INR"))
            .with("T14", TruckCost::new(3500.0, "INR"))
            .with("T20", TruckCost::new(6000.0, "INR"));
        (trucks, costs)
    }

    #[test]
    fn test_conservation_for_every_strategy() {
        let mut rng = StdRng::seed_from_u64(11);
        let (trucks, costs) = catalog();
        let config = u_loadplan_core::Config::default();

        for _ in 0..6 {
            let packages = units(&random_rows(&mut rng, 4));
            let groups = normalize(&packages);
            for result in selector::evaluate(&groups, &trucks, &costs, &config) {
                let placed: usize = result.instances.iter().map(TruckInstance::packages).sum();
                assert_eq!(placed, result.total_allocated);
                assert_eq!(result.total_allocated + result.remaining(), result.total_required);
                result.instances.iter().for_each(assert_instance_invariants);
            }
        }
    }

    #[test]
    fn test_report_matches_plan() {
        let mut rng = StdRng::seed_from_u64(23);
        let (trucks, costs) = catalog();

        for _ in 0..6 {
            let packages = units(&random_rows(&mut rng, 3));
            let required: usize = packages.iter().map(|u| u.quantity).sum();
            let result = allocate(&packages, &trucks, &costs);

            let loaded: usize = result.allocations().iter().map(|a| a.packages).sum();
            assert_eq!(loaded + result.remaining_count(), required);
        }
    }

    #[test]
    fn test_input_order_does_not_change_plan() {
        let mut rng = StdRng::seed_from_u64(5);
        let (trucks, costs) = catalog();
        let packages = units(&random_rows(&mut rng, 5));
        let mut reversed = packages.clone();
        reversed.reverse();

        let allocator = Allocator::default_config();
        assert_eq!(
            allocator.allocate(&packages, &trucks, &costs),
            allocator.allocate(&reversed, &trucks, &costs)
        );
    }
}

mod options_tests {
    use super::*;

    #[test]
    fn test_options_ranked_and_unique() {
        let packages = units(&[PackageRow::new("C", 2.0, 2.0, 2.0).with_quantity(6)]);
        let trucks = [
            cube_truck("S", 4.0),
            cube_truck("M", 6.0),
            cube_truck("L", 12.0),
        ];
        let costs = CostMap::new()
            .with("S", TruckCost::new(60.0, "INR"))
            .with("M", TruckCost::new(80.0, "INR"))
            .with("L", TruckCost::new(150.0, "INR"));

        let result = allocate(&packages, &trucks, &costs);
        let options = generate_options(&packages, &trucks, &costs, &result);
        assert!(!options.is_empty());

        for pair in options.windows(2) {
            assert!(pair[0].total_cost <= pair[1].total_cost);
        }
        for (i, a) in options.iter().enumerate() {
            assert_eq!(a.id, i + 1);
            assert_eq!(a.total_packages, 6);
            for b in &options[i + 1..] {
                assert!((a.cost_cents(), a.truck_count) != (b.cost_cents(), b.truck_count));
            }
        }
        assert!(options
            .iter()
            .any(|o| o.name == "12ft Truck - Most Economical"));
    }

    #[test]
    fn test_uncosted_catalog_offers_suggested_plan() {
        let packages = units(&[PackageRow::new("C", 2.0, 2.0, 2.0).with_quantity(2)]);
        let trucks = [cube_truck("S", 4.0)];
        let costs = CostMap::new();

        let result = allocate(&packages, &trucks, &costs);
        assert!(result.is_success());
        // The suggested plan is the only candidate and it is uncosted.
        let options = generate_options(&packages, &trucks, &costs, &result);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].total_cost, 0.0);
        assert!(options[0].name.ends_with("Algorithm Suggested"));
    }
}
