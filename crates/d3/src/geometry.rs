//! Package orientations.
//!
//! Packages are only turned about the vertical axis: the height of a
//! package is never rotated.

use u_loadplan_core::package::PackageGroup;
use u_loadplan_core::Placement;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Horizontal orientation of a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Orientation {
    /// Package length along the truck length.
    #[default]
    Original,
    /// Package turned 90° about the vertical axis.
    Rotated,
}

impl Orientation {
    /// Orientations in search order.
    pub const ALL: [Orientation; 2] = [Orientation::Original, Orientation::Rotated];
}

/// Footprint of a package in one orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    /// Extent along the truck length.
    pub length: f64,
    /// Extent across the truck width.
    pub width: f64,
    /// Package height.
    pub height: f64,
}

impl Footprint {
    /// Footprint of `group` in `orientation`.
    pub fn of(group: &PackageGroup, orientation: Orientation) -> Self {
        let (length, width) = match orientation {
            Orientation::Original => (group.length(), group.width()),
            Orientation::Rotated => (group.width(), group.length()),
        };
        Self {
            length,
            width,
            height: group.height(),
        }
    }

    /// Both footprints of `group` in search order.
    pub fn all(group: &PackageGroup) -> [Self; 2] {
        Orientation::ALL.map(|o| Self::of(group, o))
    }

    /// Placement of this footprint at a position.
    pub fn at(&self, x: f64, y: f64, z: f64) -> Placement {
        Placement::new(x, y, z, self.length, self.width, self.height)
    }

    /// Whether this footprint rests fully on the top face of `base`.
    pub fn rests_on(&self, base: &Placement) -> bool {
        base.supports_footprint(self.length, self.width)
    }
}
