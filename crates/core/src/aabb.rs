//! Axis-aligned bounding boxes for cargo placements.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Penetration below this depth is treated as touching.
pub const OVERLAP_TOLERANCE: f64 = 1e-9;

/// Axis-aligned bounding box in truck coordinates (feet).
///
/// `x` runs along the truck length, `y` across its width, `z` up from the
/// floor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb3D {
    /// Minimum x coordinate.
    pub min_x: f64,
    /// Minimum y coordinate.
    pub min_y: f64,
    /// Minimum z coordinate.
    pub min_z: f64,
    /// Maximum x coordinate.
    pub max_x: f64,
    /// Maximum y coordinate.
    pub max_y: f64,
    /// Maximum z coordinate.
    pub max_z: f64,
}

impl Aabb3D {
    /// Creates a new AABB from min/max coordinates.
    pub fn new(min_x: f64, min_y: f64, min_z: f64, max_x: f64, max_y: f64, max_z: f64) -> Self {
        Self {
            min_x,
            min_y,
            min_z,
            max_x,
            max_y,
            max_z,
        }
    }

    /// Creates an AABB from a corner and extents.
    pub fn from_origin(x: f64, y: f64, z: f64, length: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, z, x + length, y + width, z + height)
    }

    /// Extent along x.
    pub fn length(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Extent along y.
    pub fn width(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Extent along z.
    pub fn height(&self) -> f64 {
        self.max_z - self.min_z
    }

    /// Returns the volume of the AABB.
    pub fn volume(&self) -> f64 {
        self.length() * self.width() * self.height()
    }

    /// Floor area of the AABB.
    pub fn footprint_area(&self) -> f64 {
        self.length() * self.width()
    }

    /// Checks if two boxes share interior volume. Touching faces do not
    /// overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        let separated_x = self.min_x >= other.max_x - OVERLAP_TOLERANCE
            || other.min_x >= self.max_x - OVERLAP_TOLERANCE;
        let separated_y = self.min_y >= other.max_y - OVERLAP_TOLERANCE
            || other.min_y >= self.max_y - OVERLAP_TOLERANCE;
        let separated_z = self.min_z >= other.max_z - OVERLAP_TOLERANCE
            || other.min_z >= self.max_z - OVERLAP_TOLERANCE;

        !(separated_x || separated_y || separated_z)
    }

    /// Checks if `other` lies completely inside this box.
    pub fn contains(&self, other: &Self) -> bool {
        other.min_x >= self.min_x - OVERLAP_TOLERANCE
            && other.min_y >= self.min_y - OVERLAP_TOLERANCE
            && other.min_z >= self.min_z - OVERLAP_TOLERANCE
            && other.max_x <= self.max_x + OVERLAP_TOLERANCE
            && other.max_y <= self.max_y + OVERLAP_TOLERANCE
            && other.max_z <= self.max_z + OVERLAP_TOLERANCE
    }
}
