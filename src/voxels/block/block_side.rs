//! # Block Side Module
//!
//! This module defines the six faces of a voxel and the three axes they lie on.
//! The integer value of each side is part of the packed face format consumed by
//! the renderer, so the order is fixed.

use cgmath::Vector3;
use num_derive::FromPrimitive;

/// One of the three coordinate axes.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum Axis {
    /// The X axis
    X = 0,
    /// The Y axis (up)
    Y = 1,
    /// The Z axis
    Z = 2,
}

impl Axis {
    /// All axes in sweep order.
    pub fn all() -> [Axis; 3] {
        [Axis::X, Axis::Y, Axis::Z]
    }

    /// Returns the `(row, bit)` axes spanning a layer perpendicular to this axis.
    ///
    /// Rows follow the outer coordinate and bits the inner coordinate of the
    /// fixed x-outer / z-middle / y-inner order with this axis removed:
    /// X layers are `(z, y)`, Y layers are `(x, z)` and Z layers are `(x, y)`.
    pub fn layer_axes(self) -> (Axis, Axis) {
        match self {
            Axis::X => (Axis::Z, Axis::Y),
            Axis::Y => (Axis::X, Axis::Z),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }

    /// Builds an `[x, y, z]` coordinate from a layer index and a `(row, bit)` pair
    /// on the layer perpendicular to this axis.
    #[inline]
    pub fn compose(self, layer: usize, row: usize, bit: usize) -> [usize; 3] {
        match self {
            Axis::X => [layer, bit, row],
            Axis::Y => [row, layer, bit],
            Axis::Z => [row, bit, layer],
        }
    }

    /// Inverse of [`Axis::compose`]: the `(row, bit)` pair of `[x, y, z]` on a
    /// layer perpendicular to this axis.
    #[inline]
    pub fn decompose(self, position: [usize; 3]) -> (usize, usize) {
        let [x, y, z] = position;
        match self {
            Axis::X => (z, y),
            Axis::Y => (x, z),
            Axis::Z => (x, y),
        }
    }
}

/// Represents the six possible faces of a voxel.
///
/// Each variant is assigned `axis * 2 + positive`, which is the value stored in
/// the side field of a packed face and the index of the face's opaque mesh
/// bucket.
///
/// The order is: [LEFT, RIGHT, BOTTOM, TOP, BACK, FRONT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug, FromPrimitive)]
pub enum BlockSide {
    /// The left face (facing negative X)
    LEFT = 0,

    /// The right face (facing positive X)
    RIGHT = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The top face (facing positive Y)
    TOP = 3,

    /// The back face (facing negative Z)
    BACK = 4,

    /// The front face (facing positive Z)
    FRONT = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in a consistent order.
    ///
    /// The order is: [LEFT, RIGHT, BOTTOM, TOP, BACK, FRONT]
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::LEFT,
            BlockSide::RIGHT,
            BlockSide::BOTTOM,
            BlockSide::TOP,
            BlockSide::BACK,
            BlockSide::FRONT,
        ]
    }

    /// Returns the side facing along `axis`, in the positive direction if `positive`.
    pub fn from_axis(axis: Axis, positive: bool) -> Self {
        match (axis, positive) {
            (Axis::X, false) => BlockSide::LEFT,
            (Axis::X, true) => BlockSide::RIGHT,
            (Axis::Y, false) => BlockSide::BOTTOM,
            (Axis::Y, true) => BlockSide::TOP,
            (Axis::Z, false) => BlockSide::BACK,
            (Axis::Z, true) => BlockSide::FRONT,
        }
    }

    /// The axis this side's normal lies on.
    pub fn axis(self) -> Axis {
        match self {
            BlockSide::LEFT | BlockSide::RIGHT => Axis::X,
            BlockSide::BOTTOM | BlockSide::TOP => Axis::Y,
            BlockSide::BACK | BlockSide::FRONT => Axis::Z,
        }
    }

    /// Whether this side faces the positive direction of its axis.
    pub fn is_positive(self) -> bool {
        (self as u8) & 1 == 1
    }

    /// The side facing the other way on the same axis.
    pub fn opposite(self) -> Self {
        Self::from_axis(self.axis(), !self.is_positive())
    }

    /// The outward unit normal of this side.
    pub fn normal(self) -> Vector3<i32> {
        let sign = if self.is_positive() { 1 } else { -1 };
        match self.axis() {
            Axis::X => Vector3::new(sign, 0, 0),
            Axis::Y => Vector3::new(0, sign, 0),
            Axis::Z => Vector3::new(0, 0, sign),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;

    #[test]
    fn side_values_follow_axis_and_direction() {
        for side in BlockSide::all() {
            assert_eq!(side as u8, side.axis() as u8 * 2 + side.is_positive() as u8);
            assert_eq!(BlockSide::from_u8(side as u8), Some(side));
            assert_eq!(side.opposite().opposite(), side);
            assert_eq!(side.normal(), -side.opposite().normal());
        }
        assert_eq!(BlockSide::from_u8(6), None);
    }

    #[test]
    fn compose_places_layer_on_axis() {
        assert_eq!(Axis::X.compose(3, 1, 2), [3, 2, 1]);
        assert_eq!(Axis::Y.compose(3, 1, 2), [1, 3, 2]);
        assert_eq!(Axis::Z.compose(3, 1, 2), [1, 2, 3]);

        for axis in Axis::all() {
            assert_eq!(axis.decompose(axis.compose(3, 1, 2)), (1, 2));
        }
    }
}
