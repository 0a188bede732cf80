//! Placement of a single package inside a truck.

use crate::aabb::Aabb3D;
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position and oriented dimensions of one placed package (feet).
///
/// `dimensions` already reflects the chosen horizontal rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// Corner closest to the truck origin.
    pub position: Vector3<f64>,
    /// Oriented length (x), width (y) and height (z).
    pub dimensions: Vector3<f64>,
}

impl Placement {
    /// Creates a new placement.
    pub fn new(x: f64, y: f64, z: f64, length: f64, width: f64, height: f64) -> Self {
        Self {
            position: Vector3::new(x, y, z),
            dimensions: Vector3::new(length, width, height),
        }
    }

    /// Returns the x coordinate.
    pub fn x(&self) -> f64 {
        self.position.x
    }

    /// Returns the y coordinate.
    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// Returns the z coordinate.
    pub fn z(&self) -> f64 {
        self.position.z
    }

    /// Oriented length.
    pub fn length(&self) -> f64 {
        self.dimensions.x
    }

    /// Oriented width.
    pub fn width(&self) -> f64 {
        self.dimensions.y
    }

    /// Height.
    pub fn height(&self) -> f64 {
        self.dimensions.z
    }

    /// Height of the top face above the floor.
    pub fn top(&self) -> f64 {
        self.position.z + self.dimensions.z
    }

    /// Opposite corner.
    pub fn max_corner(&self) -> Vector3<f64> {
        self.position + self.dimensions
    }

    /// Bounding box of the placement.
    pub fn aabb(&self) -> Aabb3D {
        let max = self.max_corner();
        Aabb3D::new(
            self.position.x,
            self.position.y,
            self.position.z,
            max.x,
            max.y,
            max.z,
        )
    }

    /// Volume in cubic feet.
    pub fn volume(&self) -> f64 {
        self.dimensions.x * self.dimensions.y * self.dimensions.z
    }

    /// Whether a `length × width` footprint fits on this top face in either
    /// horizontal orientation.
    pub fn supports_footprint(&self, length: f64, width: f64) -> bool {
        (length <= self.length() && width <= self.width())
            || (width <= self.length() && length <= self.width())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_placement_accessors() {
        let p = Placement::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        assert_eq!(p.x(), 1.0);
        assert_eq!(p.width(), 5.0);
        assert_eq!(p.top(), 9.0);
        assert_relative_eq!(p.volume(), 120.0);
        assert_eq!(p.aabb(), Aabb3D::new(1.0, 2.0, 3.0, 5.0, 7.0, 9.0));
    }

    #[test]
    fn test_supports_footprint() {
        let p = Placement::new(0.0, 0.0, 0.0, 4.0, 2.0, 1.0);
        assert!(p.supports_footprint(2.0, 4.0));
        assert!(p.supports_footprint(4.0, 2.0));
        assert!(!p.supports_footprint(4.5, 1.0));
    }
}
