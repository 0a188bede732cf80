//! One physical truck opened during allocation.

use u_loadplan_core::package::PackageGroup;
use u_loadplan_core::truck::{CostMap, TruckType};
use u_loadplan_core::{Config, TruckAllocation};
use u_loadplan_d3::{fill, LoadSpace};

/// A truck of a given type together with its load.
#[derive(Debug, Clone, PartialEq)]
pub struct TruckInstance {
    truck: TruckType,
    space: LoadSpace,
}

impl TruckInstance {
    /// Opens an empty truck of the given type.
    pub fn new(truck: &TruckType) -> Self {
        Self {
            truck: truck.clone(),
            space: LoadSpace::for_truck(truck),
        }
    }

    /// Truck type of this instance.
    pub fn truck(&self) -> &TruckType {
        &self.truck
    }

    /// Current load.
    pub fn space(&self) -> &LoadSpace {
        &self.space
    }

    /// Number of packages loaded.
    pub fn packages(&self) -> usize {
        self.space.placed_count()
    }

    /// Occupied volume in CBM.
    pub fn used_volume(&self) -> f64 {
        self.space.used_volume()
    }

    /// Carried weight in kilograms.
    pub fn used_weight(&self) -> f64 {
        self.space.used_weight()
    }

    /// How many more units of `group` (up to `max_qty`) this truck would take.
    pub fn fitted(&self, group: &PackageGroup, max_qty: usize) -> usize {
        if !group.fits_truck(&self.truck) {
            return 0;
        }
        self.space.calculate_max_fit(group, max_qty)
    }

    /// Loads up to `qty` units and returns how many were placed.
    pub fn load(&mut self, group: &PackageGroup, qty: usize) -> usize {
        fill(&mut self.space, group, qty)
    }
}

/// Currency of a plan: that of its first costed truck, else the default.
pub fn plan_currency(instances: &[TruckInstance], costs: &CostMap, config: &Config) -> String {
    instances
        .iter()
        .map(|i| i.truck().id())
        .find(|id| costs.rate(id).is_some())
        .and_then(|id| costs.currency(id))
        .unwrap_or(&config.default_currency)
        .to_string()
}

/// Merges instances into one line per truck type, in first-use order.
///
/// Trucks without a known rate are reported at cost 0.
pub fn aggregate(
    instances: &[TruckInstance],
    costs: &CostMap,
    config: &Config,
) -> Vec<TruckAllocation> {
    let currency = plan_currency(instances, costs, config);
    let mut lines: Vec<TruckAllocation> = Vec::new();

    for instance in instances {
        let truck = instance.truck();
        let existing = lines.iter().position(|l| &l.truck_id == truck.id());
        let line = match existing {
            Some(slot) => &mut lines[slot],
            None => {
                let cost_per_truck = costs.rate(truck.id()).unwrap_or(0.0);
                let line_currency = match costs.rate(truck.id()) {
                    Some(_) => costs.currency(truck.id()).unwrap_or(currency.as_str()),
                    None => currency.as_str(),
                };
                lines.push(TruckAllocation {
                    truck_id: truck.id().clone(),
                    truck_name: truck.name().to_string(),
                    count: 0,
                    packages: 0,
                    used_volume: 0.0,
                    used_weight: 0.0,
                    cost_per_truck,
                    currency: line_currency.to_string(),
                    line_total: 0.0,
                });
                let last = lines.len() - 1;
                &mut lines[last]
            }
        };

        line.count += 1;
        line.packages += instance.packages();
        line.used_volume += instance.used_volume();
        line.used_weight += instance.used_weight();
        line.line_total = line.cost_per_truck * line.count as f64;
    }

    lines
}
