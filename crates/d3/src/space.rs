//! Placement space of one truck instance.

use crate::boundary::Container;
use crate::search::{self, SearchPass};
use u_loadplan_core::package::PackageGroup;
use u_loadplan_core::truck::TruckType;
use u_loadplan_core::{Aabb3D, Placement};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A package committed to a space.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacedBox {
    /// Position and oriented dimensions.
    pub placement: Placement,
    /// Key of the owning package group.
    pub group_key: String,
    /// Whether other packages may rest on this one.
    pub stackable: bool,
}

impl PlacedBox {
    /// Bounding box.
    pub fn aabb(&self) -> Aabb3D {
        self.placement.aabb()
    }

    /// Larger horizontal side.
    pub fn max_footprint_side(&self) -> f64 {
        self.placement.length().max(self.placement.width())
    }
}

/// Usable box of one truck with the packages placed in it so far.
///
/// Cloning a space is how trial placements are simulated: the clone is
/// mutated and dropped, the original is left untouched.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoadSpace {
    container: Container,
    boxes: Vec<PlacedBox>,
    used_volume: f64,
    used_weight: f64,
    group_counts: Vec<(String, usize)>,
}

impl LoadSpace {
    /// Creates an empty space.
    pub fn new(container: Container) -> Self {
        Self {
            container,
            boxes: Vec::new(),
            used_volume: 0.0,
            used_weight: 0.0,
            group_counts: Vec::new(),
        }
    }

    /// Creates an empty space for a truck type.
    pub fn for_truck(truck: &TruckType) -> Self {
        Self::new(Container::from_truck(truck))
    }

    /// Returns the container.
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Placed boxes in placement order.
    pub fn boxes(&self) -> &[PlacedBox] {
        &self.boxes
    }

    /// Occupied volume in CBM.
    pub fn used_volume(&self) -> f64 {
        self.used_volume
    }

    /// Carried weight in kilograms.
    pub fn used_weight(&self) -> f64 {
        self.used_weight
    }

    /// Number of placed boxes.
    pub fn placed_count(&self) -> usize {
        self.boxes.len()
    }

    /// Whether nothing has been placed yet.
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Placed quantity per group key, in first-placement order.
    pub fn group_counts(&self) -> &[(String, usize)] {
        &self.group_counts
    }

    /// Placed quantity of one group.
    pub fn group_count(&self, key: &str) -> usize {
        self.group_counts
            .iter()
            .find(|(k, _)| k == key)
            .map_or(0, |(_, n)| *n)
    }

    /// Whether a box fits inside the usable space without overlapping any
    /// placed box.
    pub fn can_place(&self, x: f64, y: f64, z: f64, length: f64, width: f64, height: f64) -> bool {
        if x + length > self.container.length()
            || y + width > self.container.width()
            || z + height > self.container.height()
        {
            return false;
        }

        let candidate = Aabb3D::from_origin(x, y, z, length, width, height);
        !self.boxes.iter().any(|b| b.aabb().overlaps(&candidate))
    }

    /// [`can_place`](Self::can_place) for a ready-made placement.
    pub fn can_place_at(&self, p: &Placement) -> bool {
        self.can_place(p.x(), p.y(), p.z(), p.length(), p.width(), p.height())
    }

    /// Whether one more unit of `group` stays within volume and weight
    /// capacity.
    pub fn has_capacity_for(&self, group: &PackageGroup) -> bool {
        self.container.volume_allows(self.used_volume, group.volume())
            && self.container.weight_allows(self.used_weight, group.weight())
    }

    /// First free position for one unit of `group`.
    pub fn find_best_position(&self, group: &PackageGroup) -> Option<Placement> {
        self.find_position_with_pass(group).map(|(_, p)| p)
    }

    /// Like [`find_best_position`](Self::find_best_position), also reporting
    /// the search pass that produced the position.
    pub fn find_position_with_pass(&self, group: &PackageGroup) -> Option<(SearchPass, Placement)> {
        search::find_position(self, group)
    }

    /// Commits one unit of `group` at `placement`.
    ///
    /// Capacity is not checked here; callers test
    /// [`has_capacity_for`](Self::has_capacity_for) first.
    pub fn place_box(&mut self, group: &PackageGroup, placement: Placement) {
        self.boxes.push(PlacedBox {
            placement,
            group_key: group.key().to_string(),
            stackable: group.is_stackable(),
        });
        self.used_volume += group.volume();
        self.used_weight += group.weight();

        match self.group_counts.iter_mut().find(|(k, _)| k == group.key()) {
            Some((_, n)) => *n += 1,
            None => self.group_counts.push((group.key().to_string(), 1)),
        }
    }

    /// Whether a non-stackable package may share this truck with the
    /// non-stackable boxes already in it: their larger horizontal sides
    /// must be within a factor of two.
    fn mixes_with(&self, group: &PackageGroup) -> bool {
        if group.is_stackable() {
            return true;
        }
        let side = group.max_footprint_side();
        self.boxes.iter().filter(|b| !b.stackable).all(|b| {
            let other = b.max_footprint_side();
            !(side > other * 2.0 || other > side * 2.0)
        })
    }

    /// Number of units of `group` (up to `max_qty`) that would fit if placed
    /// one after another. `self` is not modified.
    pub fn calculate_max_fit(&self, group: &PackageGroup, max_qty: usize) -> usize {
        let mut trial = self.clone();
        let mut fitted = 0;

        while fitted < max_qty {
            let Some(position) = trial.find_best_position(group) else {
                break;
            };
            if !trial.container.volume_allows(trial.used_volume, group.volume()) {
                break;
            }
            if !trial.container.weight_allows(trial.used_weight, group.weight()) {
                break;
            }
            if !trial.is_empty() && !trial.mixes_with(group) {
                break;
            }
            trial.place_box(group, position);
            fitted += 1;
        }

        fitted
    }
}
