//! # Node Module
//!
//! The encoded octree is a flat byte arena. Every node starts with a one byte
//! tag followed by its payload:
//!
//! | tag  | node        | payload                                        |
//! |------|-------------|------------------------------------------------|
//! | 0x00 | Homogeneous | 1 material byte                                |
//! | 0x01 | Detail      | 8 material bytes for a 2×2×2 leaf              |
//! | 0x02 | Splitter    | 7 big-endian 24-bit offsets, then the children |
//!
//! Splitter offsets locate children 1 through 7 relative to the splitter's tag
//! byte. Child 0 starts immediately after the header.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use crate::voxels::block::Material;

/// Size in bytes of one child offset.
pub const OFFSET_LEN: usize = 3;

/// Size in bytes of a splitter's tag plus its seven child offsets.
pub const SPLITTER_HEADER_LEN: usize = 1 + 7 * OFFSET_LEN;

/// Largest edge exponent whose encoding is guaranteed to fit 24-bit offsets.
pub const MAX_EDGE_EXPONENT: u8 = 7;

/// Largest value a child offset can hold.
pub const MAX_OFFSET: usize = (1 << (8 * OFFSET_LEN)) - 1;

/// The leading byte of every encoded node.
#[derive(PartialEq, Eq, Copy, Clone, Debug, FromPrimitive)]
#[repr(u8)]
pub enum NodeTag {
    /// Whole subtree is one material
    Homogeneous = 0x00,
    /// 2×2×2 leaf with explicit materials
    Detail = 0x01,
    /// Interior node with eight children
    Splitter = 0x02,
}

/// A decoded view of the node starting at some position in the arena.
#[derive(Copy, Clone, Debug)]
pub enum Node<'a> {
    /// Every cell in the subtree holds this material.
    Homogeneous(Material),
    /// The eight cells of a 2×2×2 leaf, in octant order.
    Detail(&'a [Material]),
    /// An interior node whose tag byte sits at `at`.
    Splitter {
        /// Position of the splitter's tag byte
        at: usize,
    },
}

impl<'a> Node<'a> {
    /// Decodes the node whose tag byte is `data[at]`.
    ///
    /// The arena is trusted: a tag outside the known set is read as a
    /// homogeneous node in release builds.
    #[inline]
    pub fn read(data: &'a [u8], at: usize) -> Self {
        match NodeTag::from_u8(data[at]) {
            Some(NodeTag::Detail) => Node::Detail(&data[at + 1..at + 9]),
            Some(NodeTag::Splitter) => Node::Splitter { at },
            tag => {
                debug_assert!(tag.is_some(), "unknown node tag {:#04x}", data[at]);
                Node::Homogeneous(data[at + 1])
            }
        }
    }
}

/// Position of child `octant` of the splitter whose tag byte is `data[at]`.
#[inline]
pub fn child_position(data: &[u8], at: usize, octant: usize) -> usize {
    if octant == 0 {
        return at + SPLITTER_HEADER_LEN;
    }
    let slot = at + 1 + (octant - 1) * OFFSET_LEN;
    at + read_u24(&data[slot..slot + OFFSET_LEN])
}

/// Reads a big-endian 24-bit unsigned integer.
#[inline]
pub fn read_u24(bytes: &[u8]) -> usize {
    ((bytes[0] as usize) << 16) | ((bytes[1] as usize) << 8) | bytes[2] as usize
}

/// Octant index of a cell given the bit of each coordinate at the current level.
///
/// X is the outer bit, Z the middle and Y the inner one.
#[inline]
pub fn octant(x_bit: usize, y_bit: usize, z_bit: usize) -> usize {
    (x_bit << 2) | (z_bit << 1) | y_bit
}

/// Offset of `octant` from its parent's origin, for children of edge `half`.
#[inline]
pub fn octant_origin(octant: usize, half: usize) -> [usize; 3] {
    [
        ((octant >> 2) & 1) * half,
        (octant & 1) * half,
        ((octant >> 1) & 1) * half,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn octant_order_is_x_z_y() {
        assert_eq!(octant(0, 1, 0), 1);
        assert_eq!(octant(0, 0, 1), 2);
        assert_eq!(octant(1, 0, 0), 4);
        for i in 0..8 {
            let [x, y, z] = octant_origin(i, 1);
            assert_eq!(octant(x, y, z), i);
        }
    }

    #[test]
    fn child_positions_follow_header_and_offsets() {
        let mut data = vec![NodeTag::Splitter as u8];
        for child in 1..8u8 {
            data.extend_from_slice(&[0, 0x01, child]);
        }
        assert_eq!(data.len(), SPLITTER_HEADER_LEN);

        assert_eq!(child_position(&data, 0, 0), 22);
        assert_eq!(child_position(&data, 0, 3), 256 + 3);
        assert_eq!(read_u24(&[0x12, 0x34, 0x56]), 0x12_34_56);
    }

    #[test]
    fn read_decodes_each_tag() {
        let data = [0x00, 7, 0x01, 1, 2, 3, 4, 5, 6, 7, 8];
        assert!(matches!(Node::read(&data, 0), Node::Homogeneous(7)));
        match Node::read(&data, 2) {
            Node::Detail(cells) => assert_eq!(cells, &[1, 2, 3, 4, 5, 6, 7, 8]),
            other => panic!("unexpected node {:?}", other),
        }
    }
}
