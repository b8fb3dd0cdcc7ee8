//! # Traversal Module
//!
//! Every read of an encoded volume is the same clipped top-down walk: subtrees
//! outside the requested window are skipped, homogeneous subtrees are expanded
//! only over the part that overlaps it, and each sampled cell is handed to a
//! sink. Full, region, level-of-detail and face layer decompression differ only
//! in their window and sink.

use crate::voxels::block::Material;

use super::node::{child_position, octant, octant_origin, Node};

/// A half-open box of source cells, sampled every `step` cells from `min`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Window {
    /// Inclusive min corner; also the origin of the sampling grid
    pub min: [usize; 3],
    /// Exclusive max corner
    pub max: [usize; 3],
    /// Distance between samples along each axis
    pub step: usize,
}

impl Window {
    /// The whole cube of edge `edge`, sampled every `step` cells.
    pub fn cube(edge: usize, step: usize) -> Self {
        Window {
            min: [0; 3],
            max: [edge; 3],
            step,
        }
    }

    /// Whether `position` lies inside the window and on its sampling grid.
    #[inline]
    fn samples(&self, position: [usize; 3]) -> bool {
        (0..3).all(|a| {
            position[a] >= self.min[a]
                && position[a] < self.max[a]
                && (position[a] - self.min[a]) % self.step == 0
        })
    }

    /// The first sample on axis `a` at or after `from`.
    #[inline]
    fn first_sample(&self, a: usize, from: usize) -> usize {
        let skipped = from - self.min[a];
        self.min[a] + skipped.div_ceil(self.step) * self.step
    }

    /// Converts a sampled source position into its position in the output grid.
    #[inline]
    pub fn output_position(&self, position: [usize; 3]) -> [usize; 3] {
        [
            (position[0] - self.min[0]) / self.step,
            (position[1] - self.min[1]) / self.step,
            (position[2] - self.min[2]) / self.step,
        ]
    }
}

/// Walks the encoded cube of edge `edge` in `data`, calling `sink` with the
/// source position and material of every sample in `window`.
///
/// Samples are emitted in octant order within each node and x / z / y order
/// within homogeneous spans.
pub fn walk<F>(data: &[u8], edge: usize, window: &Window, sink: &mut F)
where
    F: FnMut([usize; 3], Material),
{
    walk_node(data, 0, [0; 3], edge, window, sink);
}

fn walk_node<F>(
    data: &[u8],
    at: usize,
    origin: [usize; 3],
    size: usize,
    window: &Window,
    sink: &mut F,
) where
    F: FnMut([usize; 3], Material),
{
    let mut lo = [0; 3];
    let mut hi = [0; 3];
    for a in 0..3 {
        lo[a] = origin[a].max(window.min[a]);
        hi[a] = (origin[a] + size).min(window.max[a]);
        if lo[a] >= hi[a] {
            return;
        }
    }

    match Node::read(data, at) {
        Node::Homogeneous(material) => {
            let step = window.step;
            for x in (window.first_sample(0, lo[0])..hi[0]).step_by(step) {
                for z in (window.first_sample(2, lo[2])..hi[2]).step_by(step) {
                    for y in (window.first_sample(1, lo[1])..hi[1]).step_by(step) {
                        sink([x, y, z], material);
                    }
                }
            }
        }
        Node::Detail(cells) => {
            for (i, &material) in cells.iter().enumerate() {
                let [dx, dy, dz] = octant_origin(i, 1);
                let position = [origin[0] + dx, origin[1] + dy, origin[2] + dz];
                if window.samples(position) {
                    sink(position, material);
                }
            }
        }
        Node::Splitter { at } => {
            let half = size / 2;
            for i in 0..8 {
                let [dx, dy, dz] = octant_origin(i, half);
                walk_node(
                    data,
                    child_position(data, at, i),
                    [origin[0] + dx, origin[1] + dy, origin[2] + dz],
                    half,
                    window,
                    sink,
                );
            }
        }
    }
}

/// Descends to the leaf holding `(x, y, z)` in a cube of edge `2^edge_exponent`.
pub fn material_at(data: &[u8], edge_exponent: u8, x: usize, y: usize, z: usize) -> Material {
    let mut at = 0;
    let mut level = edge_exponent as u32;
    loop {
        match Node::read(data, at) {
            Node::Homogeneous(material) => return material,
            Node::Detail(cells) => return cells[octant(x & 1, y & 1, z & 1)],
            Node::Splitter { at: splitter } => {
                let bit = level - 1;
                let i = octant((x >> bit) & 1, (y >> bit) & 1, (z >> bit) & 1);
                at = child_position(data, splitter, i);
                level -= 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::{chunk::DenseVolume, volume::encoder::encode};

    fn sample_volume() -> DenseVolume {
        let mut volume = DenseVolume::new(3, 1);
        volume.fill_box((4, 0, 0).into(), (4, 8, 8).into(), 2);
        volume.set(1, 2, 3, 7);
        volume.set(6, 7, 0, 9);
        volume
    }

    #[test]
    fn clipped_walk_visits_only_the_window() {
        let volume = sample_volume();
        let data = encode(&volume);
        let window = Window {
            min: [1, 2, 3],
            max: [7, 8, 4],
            step: 1,
        };

        let mut visited = Vec::new();
        walk(&data, 8, &window, &mut |p, m| visited.push((p, m)));

        assert_eq!(visited.len(), 6 * 6);
        for ([x, y, z], m) in visited {
            assert!((1..7).contains(&x) && (2..8).contains(&y) && z == 3);
            assert_eq!(m, volume.get(x, y, z));
        }
    }

    #[test]
    fn stepped_walk_samples_min_corners() {
        let volume = sample_volume();
        let data = encode(&volume);
        let window = Window::cube(8, 4);

        let mut visited = Vec::new();
        walk(&data, 8, &window, &mut |p, m| visited.push((p, m)));

        assert_eq!(visited.len(), 8);
        for (p, m) in visited {
            assert!(p.iter().all(|c| c % 4 == 0));
            assert_eq!(m, volume.get(p[0], p[1], p[2]));
        }
    }

    #[test]
    fn material_at_matches_dense() {
        let volume = sample_volume();
        let data = encode(&volume);
        for x in 0..8 {
            for y in 0..8 {
                for z in 0..8 {
                    assert_eq!(material_at(&data, 3, x, y, z), volume.get(x, y, z));
                }
            }
        }
    }
}
