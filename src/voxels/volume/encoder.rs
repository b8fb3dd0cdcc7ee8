//! # Encoder Module
//!
//! Builds the minimal octree encoding of a [`DenseVolume`]. A subtree is written
//! as a homogeneous node whenever all of its cells agree, as a detail leaf when
//! it is a mixed 2×2×2 cube, and as a splitter otherwise. Splitter headers are
//! reserved before the children are written and back-patched once each child's
//! position is known.

use cgmath::Point3;

use crate::voxels::chunk::DenseVolume;

use super::node::{octant_origin, NodeTag, MAX_OFFSET, OFFSET_LEN, SPLITTER_HEADER_LEN};

/// Growable output arena with support for patching reserved offset slots.
#[derive(Default, Debug)]
pub struct ByteBuffer {
    bytes: Vec<u8>,
}

impl ByteBuffer {
    /// Creates an empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        ByteBuffer {
            bytes: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether nothing has been written yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Appends one byte.
    #[inline]
    pub fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    /// Appends `len` zero bytes and returns the position of the first one.
    pub fn reserve_zeroed(&mut self, len: usize) -> usize {
        let at = self.bytes.len();
        self.bytes.resize(at + len, 0);
        at
    }

    /// Overwrites three bytes at `at` with `value` in big-endian order.
    pub fn patch_u24(&mut self, at: usize, value: usize) {
        debug_assert!(value <= MAX_OFFSET, "offset {value} does not fit 24 bits");
        self.bytes[at] = (value >> 16) as u8;
        self.bytes[at + 1] = (value >> 8) as u8;
        self.bytes[at + 2] = value as u8;
    }

    /// Consumes the buffer, returning the written bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}

/// Encodes `volume` into its canonical compressed form.
pub fn encode(volume: &DenseVolume) -> Vec<u8> {
    // Uniform volumes are by far the common case; start small.
    let mut buffer = ByteBuffer::with_capacity(64);
    encode_node(&mut buffer, volume, Point3::new(0, 0, 0), volume.edge());
    buffer.into_vec()
}

fn encode_node(buffer: &mut ByteBuffer, volume: &DenseVolume, origin: Point3<usize>, size: usize) {
    if let Some(material) = volume.uniform_material(origin, size) {
        buffer.push(NodeTag::Homogeneous as u8);
        buffer.push(material);
        return;
    }

    if size == 2 {
        buffer.push(NodeTag::Detail as u8);
        for i in 0..8 {
            let [dx, dy, dz] = octant_origin(i, 1);
            buffer.push(volume.get(origin.x + dx, origin.y + dy, origin.z + dz));
        }
        return;
    }

    let start = buffer.len();
    buffer.push(NodeTag::Splitter as u8);
    buffer.reserve_zeroed(SPLITTER_HEADER_LEN - 1);

    let half = size / 2;
    for i in 0..8 {
        if i > 0 {
            let slot = start + 1 + (i - 1) * OFFSET_LEN;
            let offset = buffer.len() - start;
            buffer.patch_u24(slot, offset);
        }
        let [dx, dy, dz] = octant_origin(i, half);
        encode_node(
            buffer,
            volume,
            Point3::new(origin.x + dx, origin.y + dy, origin.z + dz),
            half,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::volume::node::child_position;

    #[test]
    fn buffer_patches_reserved_slots() {
        let mut buffer = ByteBuffer::default();
        assert!(buffer.is_empty());
        buffer.push(0xaa);
        assert_eq!(buffer.reserve_zeroed(OFFSET_LEN), 1);
        buffer.patch_u24(1, 0x01_02_03);
        assert!(!buffer.is_empty());
        assert_eq!(buffer.into_vec(), vec![0xaa, 0x01, 0x02, 0x03]);
    }

    #[test]
    fn uniform_volume_is_two_bytes() {
        assert_eq!(encode(&DenseVolume::new(5, 3)), vec![0x00, 3]);
    }

    #[test]
    fn mixed_leaf_is_a_detail_node() {
        let mut volume = DenseVolume::new(1, 0);
        volume.set(1, 0, 1, 9);
        // (1, 0, 1) is octant 0b110.
        assert_eq!(encode(&volume), vec![0x01, 0, 0, 0, 0, 0, 0, 9, 0]);
    }

    #[test]
    fn splitter_offsets_point_at_children() {
        let mut volume = DenseVolume::new(2, 1);
        volume.set(3, 3, 3, 2);

        let data = encode(&volume);
        assert_eq!(data[0], NodeTag::Splitter as u8);
        // Seven homogeneous children and one detail leaf.
        assert_eq!(data.len(), SPLITTER_HEADER_LEN + 7 * 2 + 9);
        for i in 0..7 {
            assert_eq!(child_position(&data, 0, i), SPLITTER_HEADER_LEN + 2 * i);
            assert_eq!(&data[SPLITTER_HEADER_LEN + 2 * i..][..2], &[0x00, 1]);
        }
        let last = child_position(&data, 0, 7);
        assert_eq!(data[last], NodeTag::Detail as u8);
        assert_eq!(&data[last + 1..], &[1, 1, 1, 1, 1, 1, 1, 2]);
    }
}
