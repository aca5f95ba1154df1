//! Host-side camera and rendering sink.
//!
//! Nothing in the grammar engine or the interpreter depends on this module.
//! A host owns a [`ViewportState`], mutates it from its own input handling,
//! and passes it by reference to [`render`] every frame together with the
//! cached segments.

use crate::error::{LsysError, Result};
use crate::geometry::{PathCommand, Segment};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Step sizes and limits for camera movement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Translation applied per pan request, in drawing-plane units.
    pub pan_step: f64,
    /// Scale change per zoom request.
    pub zoom_step: f64,
    /// Smallest scale zooming out may reach. Must be positive.
    pub min_scale: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            pan_step: 20.0,
            zoom_step: 0.05,
            min_scale: 0.05,
        }
    }
}

/// Direction of a pan request, named after the arrow key that issues it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanDirection {
    Left,
    Right,
    Up,
    Down,
}

/// Camera transform: translate, then scale.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub translation: DVec2,
    pub scale: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            translation: DVec2::ZERO,
            scale: 1.0,
        }
    }
}

impl ViewportState {
    pub fn new(translation: DVec2, scale: f64) -> Result<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(LsysError::invalid(
                "scale",
                format!("must be positive and finite, got {}", scale),
            ));
        }
        if !translation.is_finite() {
            return Err(LsysError::invalid("translation", "must be finite"));
        }
        Ok(Self { translation, scale })
    }

    /// Moves the camera one `pan_step`. Panning left shifts the content right.
    pub fn pan(&mut self, direction: PanDirection, config: &ViewportConfig) {
        let step = config.pan_step;
        self.translation += match direction {
            PanDirection::Left => DVec2::new(step, 0.0),
            PanDirection::Right => DVec2::new(-step, 0.0),
            PanDirection::Up => DVec2::new(0.0, step),
            PanDirection::Down => DVec2::new(0.0, -step),
        };
    }

    pub fn zoom_in(&mut self, config: &ViewportConfig) {
        self.scale += config.zoom_step;
    }

    /// Zooms out, never going below `min_scale`.
    pub fn zoom_out(&mut self, config: &ViewportConfig) {
        self.scale = (self.scale - config.zoom_step).max(config.min_scale);
    }

    /// Maps a drawing-plane point to screen space.
    pub fn to_screen(&self, point: DVec2) -> DVec2 {
        (point + self.translation) * self.scale
    }
}

/// A drawing surface accepting canvas-style path commands.
pub trait PathSink {
    fn move_to(&mut self, point: DVec2);
    fn line_to(&mut self, point: DVec2);
    /// Paints the path accumulated since the last stroke.
    fn stroke(&mut self);
}

/// Paints `segments` in order through `viewport`, then strokes once.
///
/// Connected segments are emitted as a single run of `line_to` calls.
pub fn render<S: PathSink + ?Sized>(segments: &[Segment], viewport: &ViewportState, sink: &mut S) {
    let mut pen: Option<DVec2> = None;
    for segment in segments {
        if pen != Some(segment.from) {
            sink.move_to(viewport.to_screen(segment.from));
        }
        sink.line_to(viewport.to_screen(segment.to));
        pen = Some(segment.to);
    }
    sink.stroke();
}

/// Replays precomputed path commands through `viewport`, then strokes once.
pub fn replay<S: PathSink + ?Sized>(
    commands: &[PathCommand],
    viewport: &ViewportState,
    sink: &mut S,
) {
    for command in commands {
        match *command {
            PathCommand::MoveTo(p) => sink.move_to(viewport.to_screen(p)),
            PathCommand::LineTo(p) => sink.line_to(viewport.to_screen(p)),
        }
    }
    sink.stroke();
}
