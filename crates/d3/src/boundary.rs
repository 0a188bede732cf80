//! Cargo bed of a single truck.

use nalgebra::Vector3;
use u_loadplan_core::truck::TruckType;
use u_loadplan_core::Aabb3D;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Capacity slack for accumulated floating-point totals.
pub const CAPACITY_EPSILON: f64 = 1e-9;

/// Usable box and capacities of one truck (feet, CBM, kg).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Container {
    /// Usable length (x), width (y) and height (z).
    dimensions: Vector3<f64>,

    /// Volumetric capacity in CBM.
    volume_capacity: f64,

    /// Payload capacity in kilograms.
    weight_capacity: f64,
}

impl Container {
    /// Creates a container limited only by its geometry.
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            dimensions: Vector3::new(length, width, height),
            volume_capacity: f64::MAX,
            weight_capacity: f64::MAX,
        }
    }

    /// Usable space of a truck type.
    pub fn from_truck(truck: &TruckType) -> Self {
        Self {
            dimensions: Vector3::new(
                truck.usable_length(),
                truck.usable_width(),
                truck.usable_height(),
            ),
            volume_capacity: truck.volume_capacity(),
            weight_capacity: truck.weight_capacity(),
        }
    }

    /// Sets the volumetric capacity.
    pub fn with_volume_capacity(mut self, cbm: f64) -> Self {
        self.volume_capacity = cbm;
        self
    }

    /// Sets the payload capacity.
    pub fn with_weight_capacity(mut self, kg: f64) -> Self {
        self.weight_capacity = kg;
        self
    }

    /// Returns the dimensions (length, width, height).
    pub fn dimensions(&self) -> &Vector3<f64> {
        &self.dimensions
    }

    /// Usable length.
    pub fn length(&self) -> f64 {
        self.dimensions.x
    }

    /// Usable width.
    pub fn width(&self) -> f64 {
        self.dimensions.y
    }

    /// Usable height.
    pub fn height(&self) -> f64 {
        self.dimensions.z
    }

    /// Volumetric capacity in CBM.
    pub fn volume_capacity(&self) -> f64 {
        self.volume_capacity
    }

    /// Payload capacity in kilograms.
    pub fn weight_capacity(&self) -> f64 {
        self.weight_capacity
    }

    /// Bounding box of the usable space.
    pub fn aabb(&self) -> Aabb3D {
        Aabb3D::new(
            0.0,
            0.0,
            0.0,
            self.dimensions.x,
            self.dimensions.y,
            self.dimensions.z,
        )
    }

    /// Whether adding `volume` to `used` stays within capacity.
    pub fn volume_allows(&self, used: f64, volume: f64) -> bool {
        used + volume <= self.volume_capacity + CAPACITY_EPSILON
    }

    /// Whether adding `weight` to `used` stays within capacity.
    pub fn weight_allows(&self, used: f64, weight: f64) -> bool {
        used + weight <= self.weight_capacity + CAPACITY_EPSILON
    }
}
