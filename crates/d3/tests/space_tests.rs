//! Integration tests for u-loadplan-d3.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_loadplan_core::truck::TruckType;
use u_loadplan_d3::{fill, fill_max_fit, Container, LoadSpace, PackageGroup};

fn random_group(rng: &mut StdRng, id: usize) -> PackageGroup {
    let half_steps = |rng: &mut StdRng| f64::from(rng.gen_range(2u32..=8)) * 0.5;
    PackageGroup::new(
        format!("P{id}"),
        half_steps(rng),
        half_steps(rng),
        half_steps(rng),
        f64::from(rng.gen_range(1u32..=60)),
        rng.gen_bool(0.75),
    )
    .with_quantity(rng.gen_range(1..=25))
}

fn assert_invariants(space: &LoadSpace) {
    let c = space.container();
    let boxes = space.boxes();

    for (i, b) in boxes.iter().enumerate() {
        let p = &b.placement;
        assert!(p.x() >= 0.0 && p.y() >= 0.0 && p.z() >= 0.0);
        assert!(p.x() + p.length() <= c.length(), "box {i} exceeds length");
        assert!(p.y() + p.width() <= c.width(), "box {i} exceeds width");
        assert!(p.z() + p.height() <= c.height(), "box {i} exceeds height");

        for (j, other) in boxes.iter().enumerate().skip(i + 1) {
            assert!(
                !b.aabb().overlaps(&other.aabb()),
                "boxes {i} and {j} overlap: {:?} {:?}",
                p,
                other.placement
            );
        }
    }

    assert!(space.used_volume() <= c.volume_capacity() + 1e-9);
    assert!(space.used_weight() <= c.weight_capacity() + 1e-9);
}

mod invariant_tests {
    use super::*;

    #[test]
    fn test_random_loads_keep_invariants() {
        let mut rng = StdRng::seed_from_u64(42);

        for round in 0..12 {
            let truck = TruckType::new("T", "Test Truck", 12.0, 6.0, 6.0)
                .with_volume_capacity(10.0)
                .with_weight_capacity(2500.0);
            let mut space = LoadSpace::for_truck(&truck);

            for id in 0..6 {
                let group = random_group(&mut rng, round * 10 + id);
                fill_max_fit(&mut space, &group, group.quantity());
                assert_invariants(&space);
            }
        }
    }

    #[test]
    fn test_commit_matches_simulation() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut space = LoadSpace::new(Container::new(16.0, 7.0, 7.0));

        for id in 0..8 {
            let group = random_group(&mut rng, id);
            let before = space.clone();
            let fit = space.calculate_max_fit(&group, group.quantity());
            assert_eq!(space, before);

            let placed = fill(&mut space, &group, fit);
            assert_eq!(placed, fit);
            assert_eq!(space.placed_count(), before.placed_count() + fit);
        }
        assert_invariants(&space);
    }
}

mod scenario_tests {
    use super::*;

    #[test]
    fn test_exact_volume_capacity() {
        // Ten 40 ft³ cartons; the truck's volumetric capacity is exactly
        // ten carton volumes.
        let carton = PackageGroup::new("C", 4.0, 2.0, 5.0, 0.0, true).with_quantity(10);
        let truck = TruckType::new("T", "T", 20.0, 4.0, 5.0)
            .with_volume_capacity(carton.volume() * 10.0);
        let space = LoadSpace::for_truck(&truck);

        assert_eq!(space.calculate_max_fit(&carton, 10), 10);
        assert_eq!(space.calculate_max_fit(&carton, 12), 10);
    }

    #[test]
    fn test_long_non_stackable_rejected_next_to_small() {
        let mut space = LoadSpace::new(Container::new(20.0, 8.0, 8.0));
        let small = PackageGroup::new("S", 3.0, 3.0, 3.0, 5.0, false).with_quantity(4);
        assert_eq!(fill(&mut space, &small, 4), 4);

        let long = PackageGroup::new("L", 8.0, 3.0, 3.0, 5.0, false);
        assert_eq!(space.calculate_max_fit(&long, 3), 0);
    }

    #[test]
    fn test_stackable_fills_height() {
        let cube = PackageGroup::new("C", 2.0, 2.0, 2.0, 0.0, true);
        let space = LoadSpace::new(Container::new(4.0, 4.0, 6.0));
        assert_eq!(space.calculate_max_fit(&cube, 100), 12);
    }
}
