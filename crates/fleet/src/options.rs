//! Ranked alternative loading plans.
//!
//! Four families of options are derived from the same grouped packages:
//! one truck type repeated (most economical), a combination of the best
//! value types (balanced), the allocator's own plan (algorithm suggested)
//! and the largest trucks in the catalog (high capacity). Every option is
//! verified by simulated packing before it is offered.

use crate::instance::{aggregate, TruckInstance};
use u_loadplan_core::package::{total_quantity, PackageGroup};
use u_loadplan_core::truck::{CostMap, TruckType};
use u_loadplan_core::{AllocationOption, AllocationResult, Config, OptionKind, TruckAllocation};

/// Builds options for one request.
pub struct OptionsGenerator<'a> {
    trucks: &'a [TruckType],
    costs: &'a CostMap,
    config: &'a Config,
}

impl<'a> OptionsGenerator<'a> {
    /// Creates a generator over the catalog and its costs.
    pub fn new(trucks: &'a [TruckType], costs: &'a CostMap, config: &'a Config) -> Self {
        Self {
            trucks,
            costs,
            config,
        }
    }

    /// Generates, ranks and de-duplicates every option family.
    pub fn generate(
        &self,
        groups: &[PackageGroup],
        result: &AllocationResult,
    ) -> Vec<AllocationOption> {
        let total = total_quantity(groups);
        if groups.is_empty() || total == 0 {
            return Vec::new();
        }

        let mut options = self.single_type(groups, total);
        options.extend(self.mixed(groups, total));
        if let Some(suggested) = self.suggested(result, &options) {
            options.push(suggested);
        }
        options.extend(self.high_capacity(groups, total));

        finalize(options)
    }

    /// Units one fresh truck takes when each group is loaded in turn.
    pub fn per_truck_capacity(&self, truck: &TruckType, groups: &[PackageGroup]) -> usize {
        let mut instance = TruckInstance::new(truck);
        groups
            .iter()
            .map(|group| {
                let fit = instance.fitted(group, group.quantity());
                if fit > 0 {
                    instance.load(group, fit)
                } else {
                    0
                }
            })
            .sum()
    }

    /// Packs `count` trucks of one type, each capped at `per_truck` units.
    ///
    /// Returns the loaded trucks when nothing is left over.
    pub fn simulate_fleet(
        &self,
        truck: &TruckType,
        count: usize,
        per_truck: usize,
        groups: &[PackageGroup],
    ) -> Option<Vec<TruckInstance>> {
        let mut remaining: Vec<usize> = groups.iter().map(PackageGroup::quantity).collect();
        let mut instances = Vec::with_capacity(count);

        for _ in 0..count {
            let mut instance = TruckInstance::new(truck);
            let mut placed_here = 0;

            for (group, left) in groups.iter().zip(remaining.iter_mut()) {
                if placed_here >= per_truck {
                    break;
                }
                if *left == 0 {
                    continue;
                }
                let fit = instance.fitted(group, (*left).min(per_truck - placed_here));
                if fit > 0 {
                    let placed = instance.load(group, fit);
                    placed_here += placed;
                    *left -= placed;
                }
            }
            instances.push(instance);
        }

        remaining.iter().all(|&left| left == 0).then_some(instances)
    }

    /// Trucks with a known rate, cheapest first.
    fn costed_by_rate(&self) -> Vec<(&'a TruckType, f64)> {
        let mut costed: Vec<(&TruckType, f64)> = self
            .trucks
            .iter()
            .filter_map(|t| self.costs.rate(t.id()).map(|rate| (t, rate)))
            .collect();
        costed.sort_by(|a, b| a.1.total_cmp(&b.1));
        costed
    }

    /// Trucks needed and their verified loads for one repeated type.
    fn repeated_type(
        &self,
        truck: &TruckType,
        groups: &[PackageGroup],
        total: usize,
    ) -> Option<Vec<TruckInstance>> {
        let per_truck = self.per_truck_capacity(truck, groups);
        if per_truck == 0 {
            return None;
        }
        let count = total.div_ceil(per_truck);
        if count > self.config.max_trucks_per_option {
            log::debug!(
                "{} needs {} trucks, over the limit of {}",
                truck.name(),
                count,
                self.config.max_trucks_per_option
            );
            return None;
        }
        let loaded = self.simulate_fleet(truck, count, per_truck, groups);
        if loaded.is_none() {
            log::warn!("{} × {} failed verification", count, truck.name());
        }
        loaded
    }

    fn single_type(&self, groups: &[PackageGroup], total: usize) -> Vec<AllocationOption> {
        self.costed_by_rate()
            .into_iter()
            .take(self.config.single_type_candidates)
            .filter_map(|(truck, _)| {
                let instances = self.repeated_type(truck, groups, total)?;
                let allocations = aggregate(&instances, self.costs, self.config);
                let name = format!("{} - Most Economical", joined_labels(&allocations));
                Some(self.option_from_lines(OptionKind::SingleType, name, allocations, total))
            })
            .take(self.config.max_single_type_options)
            .collect()
    }

    fn mixed(&self, groups: &[PackageGroup], total: usize) -> Vec<AllocationOption> {
        let value = |t: &TruckType, rate: f64| rate / t.volume_capacity();
        let mut by_value: Vec<(&TruckType, f64)> = self
            .costed_by_rate()
            .into_iter()
            .filter(|(t, _)| t.volume_capacity() > 0.0)
            .collect();
        by_value.sort_by(|a, b| value(a.0, a.1).total_cmp(&value(b.0, b.1)));

        let combinations: [&[usize]; 3] = [&[0, 1], &[0, 2], &[0, 1, 2]];
        let mut options = Vec::new();

        for combination in combinations {
            if options.len() >= self.config.max_mixed_options {
                break;
            }
            let Some(trucks) = combination
                .iter()
                .map(|&i| by_value.get(i).map(|(t, _)| *t))
                .collect::<Option<Vec<_>>>()
            else {
                continue;
            };
            let Some(instances) = self.combined_load(&trucks, groups) else {
                continue;
            };
            let allocations = aggregate(&instances, self.costs, self.config);
            let name = format!("{} - Balanced", joined_labels(&allocations));
            options.push(self.option_from_lines(OptionKind::Mixed, name, allocations, total));
        }

        options
    }

    /// One truck of each type in order, each greedily taking what fits.
    fn combined_load(
        &self,
        trucks: &[&TruckType],
        groups: &[PackageGroup],
    ) -> Option<Vec<TruckInstance>> {
        let mut remaining: Vec<usize> = groups.iter().map(PackageGroup::quantity).collect();
        let mut instances = Vec::new();

        for truck in trucks {
            let mut instance = TruckInstance::new(truck);
            for (group, left) in groups.iter().zip(remaining.iter_mut()) {
                if *left == 0 {
                    continue;
                }
                let fit = instance.fitted(group, *left);
                if fit > 0 {
                    *left -= instance.load(group, fit);
                }
            }
            if instance.packages() > 0 {
                instances.push(instance);
            }
        }

        remaining.iter().all(|&left| left == 0).then_some(instances)
    }

    fn suggested(
        &self,
        result: &AllocationResult,
        existing: &[AllocationOption],
    ) -> Option<AllocationOption> {
        let AllocationResult::Success {
            allocations,
            total_cost,
            currency,
            ..
        } = result
        else {
            return None;
        };

        let option = AllocationOption {
            id: 0,
            name: format!("{} - Algorithm Suggested", joined_labels(allocations)),
            kind: OptionKind::AlgorithmSuggested,
            allocations: allocations.clone(),
            total_cost: *total_cost,
            currency: currency.clone(),
            truck_count: allocations.iter().map(|a| a.count).sum(),
            total_packages: allocations.iter().map(|a| a.packages).sum(),
        };

        let duplicate = existing.iter().any(|o| {
            (o.total_cost - option.total_cost).abs() < 0.01
                && o.truck_count == option.truck_count
                && o.allocations.len() == option.allocations.len()
        });
        if duplicate {
            log::debug!("Suggested plan duplicates an existing option");
            return None;
        }
        Some(option)
    }

    fn high_capacity(&self, groups: &[PackageGroup], total: usize) -> Vec<AllocationOption> {
        let Some(largest) = groups.first() else {
            return Vec::new();
        };

        let mut by_volume: Vec<&TruckType> = self
            .trucks
            .iter()
            .filter(|t| t.volume_capacity() > 0.0)
            .collect();
        by_volume.sort_by(|a, b| b.volume_capacity().total_cmp(&a.volume_capacity()));

        by_volume
            .into_iter()
            .take(self.config.high_capacity_candidates)
            .filter(|t| self.costs.rate(t.id()).is_some() && largest.fits_truck(t))
            .filter_map(|truck| {
                let instances = self.repeated_type(truck, groups, total)?;
                let allocations = aggregate(&instances, self.costs, self.config);
                let name = format!("{} (High Capacity)", joined_labels(&allocations));
                Some(self.option_from_lines(OptionKind::HighCapacity, name, allocations, total))
            })
            .take(self.config.max_high_capacity_options)
            .collect()
    }

    fn option_from_lines(
        &self,
        kind: OptionKind,
        name: String,
        allocations: Vec<TruckAllocation>,
        total: usize,
    ) -> AllocationOption {
        let currency = allocations
            .iter()
            .find(|a| a.cost_per_truck != 0.0)
            .map(|a| a.currency.clone())
            .unwrap_or_else(|| self.config.default_currency.clone());

        AllocationOption {
            id: 0,
            name,
            kind,
            total_cost: allocations.iter().map(|a| a.line_total).sum(),
            currency,
            truck_count: allocations.iter().map(|a| a.count).sum(),
            total_packages: total,
            allocations,
        }
    }
}

/// Line labels joined with `" + "`, merging lines of the same name.
fn joined_labels(allocations: &[TruckAllocation]) -> String {
    let mut merged: Vec<TruckAllocation> = Vec::new();
    for a in allocations {
        match merged.iter().position(|m| m.truck_name == a.truck_name) {
            Some(slot) => merged[slot].count += a.count,
            None => merged.push(a.clone()),
        }
    }
    merged
        .iter()
        .map(TruckAllocation::label)
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Sorts by cost, drops options with the same cost and truck count as a
/// cheaper-or-earlier one, and numbers the rest from 1.
pub fn finalize(mut options: Vec<AllocationOption>) -> Vec<AllocationOption> {
    options.sort_by(|a, b| a.total_cost.total_cmp(&b.total_cost));

    let mut seen: Vec<(i64, usize)> = Vec::new();
    options.retain(|o| {
        let key = (o.cost_cents(), o.truck_count);
        if seen.contains(&key) {
            false
        } else {
            seen.push(key);
            true
        }
    });

    for (i, option) in options.iter_mut().enumerate() {
        option.id = i + 1;
    }
    log::debug!("Generated {} options", options.len());
    options
}
