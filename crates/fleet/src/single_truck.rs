//! Replaces a multi-truck plan with one cheaper truck when everything fits.

use crate::instance::TruckInstance;
use crate::runner::StrategyResult;
use u_loadplan_core::package::{total_quantity, PackageGroup};
use u_loadplan_core::truck::{CostMap, TruckType};
use u_loadplan_core::{Config, Strategy};
use u_loadplan_d3::boundary::CAPACITY_EPSILON;

/// Tries every truck type, cheapest first, as a single truck for the whole
/// request.
pub struct SingleTruckOverride<'a> {
    groups: &'a [PackageGroup],
    costs: &'a CostMap,
    config: &'a Config,
}

impl<'a> SingleTruckOverride<'a> {
    /// Creates an override over normalized groups.
    pub fn new(groups: &'a [PackageGroup], costs: &'a CostMap, config: &'a Config) -> Self {
        Self {
            groups,
            costs,
            config,
        }
    }

    /// Returns the single-truck plan when one is strictly cheaper than
    /// `best`, otherwise `best` unchanged.
    pub fn apply(&self, best: StrategyResult, trucks: &[TruckType]) -> StrategyResult {
        let total_volume: f64 = self
            .groups
            .iter()
            .map(|g| g.volume() * g.quantity() as f64)
            .sum();
        let total_weight: f64 = self
            .groups
            .iter()
            .map(|g| g.weight() * g.quantity() as f64)
            .sum();

        let mut by_cost: Vec<(&TruckType, f64)> = trucks
            .iter()
            .map(|t| (t, self.config.effective_cost(self.costs, t.id())))
            .collect();
        by_cost.sort_by(|a, b| a.1.total_cmp(&b.1));

        for (truck, cost) in by_cost {
            if cost >= best.total_cost {
                continue;
            }
            if total_volume > truck.volume_capacity() + CAPACITY_EPSILON
                || total_weight > truck.weight_capacity() + CAPACITY_EPSILON
            {
                continue;
            }
            let Some(instance) = self.load_all(truck) else {
                continue;
            };

            log::debug!(
                "Single {} replaces {} trucks ({:.2} < {:.2})",
                truck.name(),
                best.instances.len(),
                cost,
                best.total_cost
            );
            let total_required = total_quantity(self.groups);
            return StrategyResult {
                strategy: Strategy::SingleTruck,
                instances: vec![instance],
                leftovers: Vec::new(),
                total_cost: cost,
                total_allocated: total_required,
                total_required,
            };
        }

        best
    }

    /// Loads every unit into one fresh truck, or `None` if any unit is left.
    fn load_all(&self, truck: &TruckType) -> Option<TruckInstance> {
        let mut instance = TruckInstance::new(truck);
        for group in self.groups {
            let qty = group.quantity();
            if instance.fitted(group, qty) < qty || instance.load(group, qty) < qty {
                return None;
            }
        }
        Some(instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::StrategyRunner;
    use u_loadplan_core::truck::TruckCost;

    fn setup() -> (Vec<PackageGroup>, Vec<TruckType>, CostMap) {
        let groups = vec![PackageGroup::new("A", 2.0, 2.0, 2.0, 10.0, true).with_quantity(4)];
        let trucks = vec![
            TruckType::new("S", "Small", 2.0, 2.0, 2.0).with_volume_capacity(100.0),
            TruckType::new("L", "Large", 4.0, 4.0, 2.0).with_volume_capacity(100.0),
        ];
        let costs = CostMap::new()
            .with("S", TruckCost::new(30.0, "INR"))
            .with("L", TruckCost::new(100.0, "INR"));
        (groups, trucks, costs)
    }

    #[test]
    fn test_replaces_costlier_plan() {
        let (groups, trucks, costs) = setup();
        let config = Config::default();
        // Four small trucks cost 120; one large truck costs 100.
        let multi = StrategyRunner::new(&groups, &costs, &config)
            .run(Strategy::SmallestCapacityFirst, &trucks[..1]);
        assert_eq!(multi.instances.len(), 4);

        let result = SingleTruckOverride::new(&groups, &costs, &config).apply(multi, &trucks);
        assert_eq!(result.strategy, Strategy::SingleTruck);
        assert_eq!(result.instances.len(), 1);
        assert_eq!(result.instances[0].truck().id(), "L");
        assert_eq!(result.total_cost, 100.0);
        assert!(result.is_perfect());
    }

    #[test]
    fn test_keeps_cheaper_plan() {
        let (groups, trucks, costs) = setup();
        let config = Config::default();
        let best = StrategyRunner::new(&groups, &costs, &config)
            .run(Strategy::LargestCapacityFirst, &trucks[1..]);

        let result = SingleTruckOverride::new(&groups, &costs, &config).apply(best, &trucks);
        assert_eq!(result.strategy, Strategy::LargestCapacityFirst);
    }

    #[test]
    fn test_weight_capacity_blocks_override() {
        let (groups, mut trucks, costs) = setup();
        trucks[1] = trucks[1].clone().with_weight_capacity(35.0);
        let config = Config::default();
        let multi = StrategyRunner::new(&groups, &costs, &config)
            .run(Strategy::SmallestCapacityFirst, &trucks[..1]);

        let result = SingleTruckOverride::new(&groups, &costs, &config).apply(multi, &trucks);
        assert_eq!(result.strategy, Strategy::SmallestCapacityFirst);
        assert_eq!(result.instances.len(), 4);
    }
}
