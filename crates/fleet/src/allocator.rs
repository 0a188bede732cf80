//! Request-level allocation: validate, group, select, override, report.

use crate::instance::{aggregate, plan_currency};
use crate::options::OptionsGenerator;
use crate::runner::StrategyResult;
use crate::selector;
use crate::single_truck::SingleTruckOverride;
use u_loadplan_core::package::{normalize, validate_rows, PackageGroup, PackageUnit};
use u_loadplan_core::truck::{usable_trucks, CostMap, TruckType};
use u_loadplan_core::{AllocationOption, AllocationResult, Config, Planner};

/// Truck allocator.
///
/// Runs every applicable ordering, keeps the best plan and then tries to
/// replace it with a single cheaper truck.
///
/// # Example
///
/// ```
/// use u_loadplan_core::{CostMap, PackageRow, LengthUnit, Planner, TruckCost, TruckType};
/// use u_loadplan_fleet::Allocator;
///
/// let packages = vec![PackageRow::new("P1", 2.0, 2.0, 2.0)
///     .with_quantity(4)
///     .to_unit(LengthUnit::Foot)];
/// let trucks = vec![TruckType::new("T1", "14ft Truck", 14.0, 6.0, 6.0)];
/// let costs = CostMap::new().with("T1", TruckCost::new(4500.0, "INR"));
///
/// let result = Allocator::default_config().allocate(&packages, &trucks, &costs);
/// assert!(result.is_success());
/// assert_eq!(result.truck_count(), 1);
/// ```
pub struct Allocator {
    config: Config,
}

impl Allocator {
    /// Creates an allocator with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Creates an allocator with default configuration.
    pub fn default_config() -> Self {
        Self::new(Config::default())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Drops unusable trucks, validates and groups the request, or reports
    /// why it was rejected.
    fn prepare(
        &self,
        packages: &[PackageUnit],
        trucks: &[TruckType],
    ) -> Result<(Vec<PackageGroup>, Vec<TruckType>), AllocationResult> {
        let trucks = usable_trucks(trucks);
        if let Err(failure) = validate_rows(packages, &trucks) {
            log::warn!(
                "Validation failed: {} ({:?})",
                failure.reason,
                failure.offending_package_ids
            );
            return Err(failure.into());
        }
        Ok((normalize(packages), trucks))
    }

    /// Best strategy result after the single-truck override.
    pub fn plan(
        &self,
        groups: &[PackageGroup],
        trucks: &[TruckType],
        costs: &CostMap,
    ) -> Option<StrategyResult> {
        let results = selector::evaluate(groups, trucks, costs, &self.config);
        let best = selector::select(results)?;
        Some(SingleTruckOverride::new(groups, costs, &self.config).apply(best, trucks))
    }

    fn report(&self, best: StrategyResult, costs: &CostMap) -> AllocationResult {
        let allocations = aggregate(&best.instances, costs, &self.config);
        let remaining = best.remaining();

        if remaining > 0 {
            return AllocationResult::Partial {
                allocations,
                remaining_count: remaining,
                message: format!(
                    "Allocated {}/{}. {} remain",
                    best.total_allocated, best.total_required, remaining
                ),
            };
        }

        AllocationResult::Success {
            total_cost: allocations.iter().map(|a| a.line_total).sum(),
            currency: plan_currency(&best.instances, costs, &self.config),
            strategy: best.strategy,
            allocations,
        }
    }
}

impl Default for Allocator {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Planner for Allocator {
    fn allocate(
        &self,
        packages: &[PackageUnit],
        trucks: &[TruckType],
        costs: &CostMap,
    ) -> AllocationResult {
        let (groups, trucks) = match self.prepare(packages, trucks) {
            Ok(prepared) => prepared,
            Err(rejected) => return rejected,
        };

        match self.plan(&groups, &trucks, costs) {
            Some(best) => self.report(best, costs),
            None => {
                let required: usize = groups.iter().map(PackageGroup::quantity).sum();
                AllocationResult::Partial {
                    allocations: Vec::new(),
                    remaining_count: required,
                    message: format!("Allocated 0/{required}. {required} remain"),
                }
            }
        }
    }

    fn generate_options(
        &self,
        packages: &[PackageUnit],
        trucks: &[TruckType],
        costs: &CostMap,
        result: &AllocationResult,
    ) -> Vec<AllocationOption> {
        let Ok((groups, trucks)) = self.prepare(packages, trucks) else {
            return Vec::new();
        };
        OptionsGenerator::new(&trucks, costs, &self.config).generate(&groups, result)
    }
}

/// [`Planner::allocate`] with the default configuration.
pub fn allocate(
    packages: &[PackageUnit],
    trucks: &[TruckType],
    costs: &CostMap,
) -> AllocationResult {
    Allocator::default_config().allocate(packages, trucks, costs)
}

/// [`Planner::generate_options`] with the default configuration.
pub fn generate_options(
    packages: &[PackageUnit],
    trucks: &[TruckType],
    costs: &CostMap,
    result: &AllocationResult,
) -> Vec<AllocationOption> {
    Allocator::default_config().generate_options(packages, trucks, costs, result)
}
