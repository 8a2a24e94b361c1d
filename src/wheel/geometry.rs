//! Wedge geometry for renderers
//!
//! Encodes the same layout convention the resolver assumes: wedge 0 starts
//! at the top pointer (screen angle -90°, y-down) and wedges advance
//! clockwise. The current rotation is a renderer transform applied on top;
//! everything here is the unrotated layout, so a renderer consuming these
//! helpers cannot disagree with [`Wheel::resolve_index`](super::Wheel::resolve_index).

use glam::Vec2;

use crate::polar_to_cartesian;

/// Angular bounds of wedge `index` on an `n`-segment wheel, in degrees
/// (screen convention: 0° along +x, top at -90°)
pub fn wedge_bounds_deg(n: usize, index: usize) -> (f64, f64) {
    let width = 360.0 / n as f64;
    let start = width * index as f64 - 90.0;
    (start, start + width)
}

/// Mid-angle of a wedge in degrees; renderers rotate label text to this
/// angle
pub fn wedge_mid_angle_deg(n: usize, index: usize) -> f64 {
    let (start, end) = wedge_bounds_deg(n, index);
    (start + end) / 2.0
}

/// Anchor point for a wedge's label, `text_radius` out from `center` along
/// the wedge mid-angle
pub fn label_anchor(center: Vec2, text_radius: f32, n: usize, index: usize) -> Vec2 {
    let theta = wedge_mid_angle_deg(n, index).to_radians() as f32;
    center + polar_to_cartesian(text_radius, theta)
}

/// Outline of a wedge: the center point followed by `arc_samples + 1`
/// points along the rim from start to end angle. Three or more samples
/// approximate the arc well enough for polygon fills; SVG renderers can
/// instead take just the first and last rim points and draw a true arc.
pub fn wedge_outline(
    center: Vec2,
    radius: f32,
    n: usize,
    index: usize,
    arc_samples: usize,
) -> Vec<Vec2> {
    let (start, end) = wedge_bounds_deg(n, index);
    let samples = arc_samples.max(1);

    let mut points = Vec::with_capacity(samples + 2);
    points.push(center);
    for i in 0..=samples {
        let t = i as f64 / samples as f64;
        let theta = (start + t * (end - start)).to_radians() as f32;
        points.push(center + polar_to_cartesian(radius, theta));
    }
    points
}
