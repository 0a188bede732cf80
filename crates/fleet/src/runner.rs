//! Greedy allocation of package groups over one truck ordering.

use crate::instance::TruckInstance;
use u_loadplan_core::package::{total_quantity, PackageGroup};
use u_loadplan_core::truck::{CostMap, TruckType};
use u_loadplan_core::{Config, Strategy};
use u_loadplan_d3::LoadSpace;

/// Units of one group that no truck could take.
#[derive(Debug, Clone, PartialEq)]
pub struct Leftover {
    /// Key of the package group.
    pub group_key: String,
    /// Units left unplaced.
    pub quantity: usize,
}

/// Outcome of running one strategy.
#[derive(Debug, Clone)]
pub struct StrategyResult {
    /// Strategy that produced this result.
    pub strategy: Strategy,
    /// Opened trucks in creation order.
    pub instances: Vec<TruckInstance>,
    /// Groups with unplaced units.
    pub leftovers: Vec<Leftover>,
    /// Sum of effective costs, sentinel included.
    pub total_cost: f64,
    /// Units placed.
    pub total_allocated: usize,
    /// Units requested.
    pub total_required: usize,
}

impl StrategyResult {
    /// Whether every unit was placed.
    pub fn is_perfect(&self) -> bool {
        self.total_allocated == self.total_required
    }

    /// Units left unplaced.
    pub fn remaining(&self) -> usize {
        self.leftovers.iter().map(|l| l.quantity).sum()
    }
}

/// Runs the greedy loop for one truck ordering.
pub struct StrategyRunner<'a> {
    groups: &'a [PackageGroup],
    costs: &'a CostMap,
    config: &'a Config,
}

impl<'a> StrategyRunner<'a> {
    /// Creates a runner over normalized groups.
    pub fn new(groups: &'a [PackageGroup], costs: &'a CostMap, config: &'a Config) -> Self {
        Self {
            groups,
            costs,
            config,
        }
    }

    /// Allocates every group, filling open trucks before opening new ones.
    ///
    /// `trucks` must already be in the strategy's order; on equal
    /// cost per unit the earlier truck wins.
    pub fn run(&self, strategy: Strategy, trucks: &[TruckType]) -> StrategyResult {
        let mut instances: Vec<TruckInstance> = Vec::new();
        let mut leftovers = Vec::new();

        for group in self.groups {
            let mut remaining = group.quantity();

            for instance in instances.iter_mut() {
                if remaining == 0 {
                    break;
                }
                let fit = instance.fitted(group, remaining);
                if fit > 0 {
                    remaining -= instance.load(group, fit.min(remaining));
                }
            }

            while remaining > 0 {
                let Some((truck, fit)) = self.best_new_truck(group, remaining, trucks) else {
                    break;
                };
                let mut instance = TruckInstance::new(truck);
                let placed = instance.load(group, fit.min(remaining));
                if placed == 0 {
                    break;
                }
                remaining -= placed;
                instances.push(instance);
            }

            if remaining > 0 {
                leftovers.push(Leftover {
                    group_key: group.key().to_string(),
                    quantity: remaining,
                });
            }
        }

        let total_required = total_quantity(self.groups);
        let unplaced: usize = leftovers.iter().map(|l| l.quantity).sum();
        let total_cost = instances
            .iter()
            .map(|i| self.config.effective_cost(self.costs, i.truck().id()))
            .sum();

        log::debug!(
            "{}: {} trucks, {}/{} units, cost {:.2}",
            strategy,
            instances.len(),
            total_required - unplaced,
            total_required,
            total_cost
        );

        StrategyResult {
            strategy,
            instances,
            leftovers,
            total_cost,
            total_allocated: total_required - unplaced,
            total_required,
        }
    }

    /// Truck with the lowest cost per unit for a new instance.
    fn best_new_truck<'t>(
        &self,
        group: &PackageGroup,
        remaining: usize,
        trucks: &'t [TruckType],
    ) -> Option<(&'t TruckType, usize)> {
        let mut best: Option<(&TruckType, usize, f64)> = None;

        for truck in trucks {
            if !group.fits_truck(truck) {
                continue;
            }
            let fit = LoadSpace::for_truck(truck).calculate_max_fit(group, remaining);
            if fit == 0 {
                continue;
            }
            let per_unit = self.config.effective_cost(self.costs, truck.id()) / fit as f64;
            if best.map_or(true, |(_, _, b)| per_unit < b) {
                best = Some((truck, fit, per_unit));
            }
        }

        best.map(|(truck, fit, _)| (truck, fit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use u_loadplan_core::truck::TruckCost;

    fn truck(id: &str, length: f64) -> TruckType {
        TruckType::new(id, id, length, 2.0, 2.0).with_volume_capacity(1000.0)
    }

    #[test]
    fn test_conservation() {
        let groups = vec![
            PackageGroup::new("A", 2.0, 2.0, 2.0, 1.0, true).with_quantity(7),
            PackageGroup::new("B", 1.0, 1.0, 3.0, 1.0, true).with_quantity(3),
        ];
        let costs = CostMap::new();
        let config = Config::default();
        let result = StrategyRunner::new(&groups, &costs, &config)
            .run(Strategy::SmallestCapacityFirst, &[truck("T", 4.0)]);

        assert_eq!(result.total_allocated + result.remaining(), result.total_required);
        assert_eq!(result.total_allocated, 7);
        assert_eq!(result.remaining(), 3);
        assert_eq!(result.leftovers[0].group_key, "B");
        assert!(!result.is_perfect());
    }

    #[test]
    fn test_cheapest_per_unit_opens_first() {
        let groups = vec![PackageGroup::new("A", 2.0, 2.0, 2.0, 1.0, true).with_quantity(4)];
        let costs = CostMap::new()
            .with("S", TruckCost::new(100.0, "INR"))
            .with("L", TruckCost::new(150.0, "INR"));
        let config = Config::default();
        let trucks = [truck("S", 2.0), truck("L", 8.0)];
        let result = StrategyRunner::new(&groups, &costs, &config)
            .run(Strategy::SmallestCapacityFirst, &trucks);

        assert!(result.is_perfect());
        assert_eq!(result.instances.len(), 1);
        assert_eq!(result.instances[0].truck().id(), "L");
        assert_eq!(result.total_cost, 150.0);
    }

    #[test]
    fn test_open_instances_filled_first() {
        let groups = vec![
            PackageGroup::new("A", 2.0, 2.0, 2.0, 1.0, true).with_quantity(1),
            PackageGroup::new("B", 2.0, 2.0, 1.0, 1.0, true).with_quantity(2),
        ];
        let costs = CostMap::new();
        let config = Config::default();
        let result = StrategyRunner::new(&groups, &costs, &config)
            .run(Strategy::SmallestCapacityFirst, &[truck("T", 4.0)]);

        assert!(result.is_perfect());
        assert_eq!(result.instances.len(), 1);
        assert_eq!(result.instances[0].packages(), 3);
    }

    #[test]
    fn test_ties_keep_earlier_truck() {
        let groups = vec![PackageGroup::new("A", 2.0, 2.0, 2.0, 1.0, true)];
        let costs = CostMap::new();
        let config = Config::default();
        let trucks = [truck("X", 4.0), truck("Y", 4.0)];
        let result = StrategyRunner::new(&groups, &costs, &config)
            .run(Strategy::LargestCapacityFirst, &trucks);

        assert_eq!(result.instances[0].truck().id(), "X");
        assert_eq!(result.total_cost, config.missing_cost);
    }
}
