//! Wheel segments and rotation-to-segment resolution
//!
//! Segments are laid out clockwise starting at the top pointer: index 0
//! begins at screen angle -90° and indices advance clockwise. The wheel
//! rotates clockwise, so the segment under the fixed pointer after a spin
//! is the one that sat at the *negated* rotation before it - hence the
//! angle inversion in [`Wheel::resolve_index`]. A renderer that draws
//! counter-clockwise or anchors the pointer elsewhere must not reuse this
//! formula; the sign convention is part of the layout.

use serde::{Deserialize, Serialize};

use crate::normalize_degrees;

/// One fixed slice of the wheel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Display label; also the key into the outcome action table
    pub label: String,
    /// Fill color (CSS hex)
    pub color: String,
}

impl Segment {
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
        }
    }
}

/// An ordered set of segments, fixed for the engine's lifetime
///
/// Order is significant: it defines each segment's angular position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wheel {
    segments: Vec<Segment>,
}

impl Wheel {
    /// Build a wheel from segments in display order (clockwise from top).
    ///
    /// Panics if `segments` is empty.
    pub fn new(segments: Vec<Segment>) -> Self {
        assert!(!segments.is_empty(), "wheel needs at least one segment");
        Self { segments }
    }

    /// The wheel the site ships: seven tasks, pink palette
    pub fn site_default() -> Self {
        Self::new(vec![
            Segment::new("Send Mommy $20", "#FF6B9D"),
            Segment::new("Like 15 of Mommy's Posts", "#FF8FA3"),
            Segment::new("Tweet this", "#FFB3C1"),
            Segment::new("Buy a gift for Mommy", "#FF6B9D"),
            Segment::new("Pretty link to click", "#E91E63"),
            Segment::new("Two more spins!", "#FF1744"),
            Segment::new("Good girl!", "#C2185B"),
        ])
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        false // constructor rejects empty wheels
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// Angular width of one segment in degrees
    pub fn segment_angle(&self) -> f64 {
        360.0 / self.segments.len() as f64
    }

    /// Which segment sits under the pointer for a given total rotation.
    ///
    /// An exact multiple of 360° lands on index 0.
    pub fn resolve_index(&self, total_rotation_degrees: f64) -> usize {
        let final_angle = normalize_degrees(total_rotation_degrees);
        // Undo the clockwise rotation to find what ended up at the pointer
        let adjusted_angle = normalize_degrees(360.0 - final_angle);
        let index = (adjusted_angle / self.segment_angle()).floor() as usize;
        index % self.segments.len()
    }
}
