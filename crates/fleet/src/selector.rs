//! Truck orderings and selection of the best strategy result.

use crate::runner::{StrategyResult, StrategyRunner};
use rayon::prelude::*;
use u_loadplan_core::package::PackageGroup;
use u_loadplan_core::truck::{CostMap, TruckType};
use u_loadplan_core::{Config, Strategy};

/// Strategies evaluated for a cost map, in evaluation order.
pub fn strategies_for(costs: &CostMap) -> Vec<Strategy> {
    let mut strategies = Strategy::FIT_ORDERINGS.to_vec();
    if !costs.is_empty() {
        strategies.extend(Strategy::COST_ORDERINGS);
    }
    strategies
}

/// Sorts a copy of the catalog for `strategy`. Sorting is stable.
pub fn order_trucks(
    strategy: Strategy,
    trucks: &[TruckType],
    costs: &CostMap,
    config: &Config,
) -> Vec<TruckType> {
    let mut ordered = trucks.to_vec();
    match strategy {
        Strategy::SmallestCapacityFirst => {
            ordered.sort_by(|a, b| a.volume_capacity().total_cmp(&b.volume_capacity()));
        }
        Strategy::LargestCapacityFirst => {
            ordered.sort_by(|a, b| b.volume_capacity().total_cmp(&a.volume_capacity()));
        }
        Strategy::CheapestRateFirst => {
            ordered.sort_by(|a, b| {
                config
                    .effective_cost(costs, a.id())
                    .total_cmp(&config.effective_cost(costs, b.id()))
            });
        }
        Strategy::BestValueFirst => {
            let value = |t: &TruckType| {
                let capacity = if t.volume_capacity() > 0.0 {
                    t.volume_capacity()
                } else {
                    1.0
                };
                config.effective_cost(costs, t.id()) / capacity
            };
            ordered.sort_by(|a, b| value(a).total_cmp(&value(b)));
        }
        Strategy::SingleTruck => {}
    }
    ordered
}

/// Runs every applicable strategy. Results keep the strategy order.
pub fn evaluate(
    groups: &[PackageGroup],
    trucks: &[TruckType],
    costs: &CostMap,
    config: &Config,
) -> Vec<StrategyResult> {
    let runner = StrategyRunner::new(groups, costs, config);
    let run = |strategy: Strategy| {
        let ordered = order_trucks(strategy, trucks, costs, config);
        runner.run(strategy, &ordered)
    };

    let strategies = strategies_for(costs);
    if config.parallel_strategies {
        strategies.into_par_iter().map(run).collect()
    } else {
        strategies.into_iter().map(run).collect()
    }
}

/// Picks the winner: the cheapest perfect result, otherwise the result
/// placing the most units (cheapest on ties). Earlier results win exact
/// ties.
pub fn select(results: Vec<StrategyResult>) -> Option<StrategyResult> {
    let mut best: Option<StrategyResult> = None;

    for candidate in results {
        let better = match &best {
            None => true,
            Some(current) => match (candidate.is_perfect(), current.is_perfect()) {
                (true, false) => true,
                (false, true) => false,
                (true, true) => candidate.total_cost < current.total_cost,
                (false, false) => {
                    candidate.total_allocated > current.total_allocated
                        || (candidate.total_allocated == current.total_allocated
                            && candidate.total_cost < current.total_cost)
                }
            },
        };
        if better {
            best = Some(candidate);
        }
    }

    if let Some(winner) = &best {
        log::debug!(
            "Selected {} ({}/{} units, cost {:.2})",
            winner.strategy,
            winner.total_allocated,
            winner.total_required,
            winner.total_cost
        );
    }
    best
}
