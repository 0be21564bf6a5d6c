//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::TAU;

/// Irregular asteroid polygon around the origin (unrotated).
///
/// Vertex `i` sits at angle `TAU * i / n` with radius `size * (0.7 + 0.3 sin 2i)`,
/// so every asteroid shares the same silhouette at a different scale.
pub fn asteroid_outline(size: f32, vertices: usize) -> Vec<Vec2> {
    let n = vertices.max(3);
    (0..n)
        .map(|i| {
            let angle = TAU / n as f32 * i as f32;
            let r = size * (0.7 + (i as f32 * 2.0).sin() * 0.3);
            Vec2::new(angle.cos() * r, angle.sin() * r)
        })
        .collect()
}
