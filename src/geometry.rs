//! Drawing-plane geometry shared by the interpreter and its consumers.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Unit displacement for a turtle facing `heading` radians.
///
/// The x component is `sin(heading)` and the y component is `cos(heading)`,
/// i.e. heading `0` points along `+Y` and positive angles turn towards `+X`.
/// This is rotated a quarter turn from the usual `(cos, sin)` convention.
/// Curves are matched against reference renderings made with this
/// convention, so switching to `(cos, sin)` would silently rotate every
/// fractal by 90°.
#[inline]
pub fn heading_vector(heading: f64) -> DVec2 {
    let (sin, cos) = heading.sin_cos();
    DVec2::new(sin, cos)
}

/// One pen stroke in drawing-plane coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: DVec2,
    pub to: DVec2,
}

impl Segment {
    pub fn new(from: DVec2, to: DVec2) -> Self {
        Self { from, to }
    }

    pub fn length(&self) -> f64 {
        self.from.distance(self.to)
    }

    pub fn reversed(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }
}

/// Pen-up / pen-down form of a path, as consumed by canvas-like surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    /// Lift the pen and place it at the point.
    MoveTo(DVec2),
    /// Draw a straight line from the pen position to the point.
    LineTo(DVec2),
}

/// Axis-aligned bounding box of a set of segments.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    /// Returns `None` for an empty slice.
    pub fn of_segments(segments: &[Segment]) -> Option<Self> {
        let first = segments.first()?;
        let init = Self {
            min: first.from.min(first.to),
            max: first.from.max(first.to),
        };
        Some(segments[1..].iter().fold(init, |b, s| Self {
            min: b.min.min(s.from).min(s.to),
            max: b.max.max(s.from).max(s.to),
        }))
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }
}
