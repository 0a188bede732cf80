//! Commit helpers shared by the fleet planners.
//!
//! Every planner simulates with [`LoadSpace::calculate_max_fit`] and then
//! commits with one of these helpers, so the position sequence of a commit
//! always matches the simulation that sized it.

use crate::space::LoadSpace;
use u_loadplan_core::package::PackageGroup;

/// Places up to `qty` units of `group`, one best position at a time.
///
/// Stops early when no position is left or the next unit would exceed the
/// volume or weight capacity. Returns the number placed.
pub fn fill(space: &mut LoadSpace, group: &PackageGroup, qty: usize) -> usize {
    let mut placed = 0;
    while placed < qty {
        let Some(position) = space.find_best_position(group) else {
            break;
        };
        if !space.has_capacity_for(group) {
            break;
        }
        space.place_box(group, position);
        placed += 1;
    }
    if placed < qty {
        log::trace!("Placed {}/{} units of group {}", placed, qty, group.key());
    }
    placed
}

/// Sizes with [`LoadSpace::calculate_max_fit`] and commits that many units.
pub fn fill_max_fit(space: &mut LoadSpace, group: &PackageGroup, qty: usize) -> usize {
    let fit = space.calculate_max_fit(group, qty);
    if fit == 0 {
        return 0;
    }
    fill(space, group, fit)
}
