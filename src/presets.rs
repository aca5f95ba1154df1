//! Built-in fractal families.
//!
//! Each preset bundles a [`GrammarSpec`] with the [`DrawingParams`] it was tuned
//! for. All presets use the [`ActionTable::standard`](crate::turtle::ActionTable::standard)
//! alphabet and rely on terminal-symbol semantics for `+` and `-`.

use crate::grammar::{GrammarSpec, RuleTable};
use crate::interpreter::DrawingParams;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FractalPreset {
    /// `F-G-G`, `F -> F-G+F+G-F`, `G -> GG`, 120° turns.
    SierpinskiTriangle,
    /// `F`, `F -> F+F-F-F+F`, 90° turns.
    KochCurve,
    /// `FX`, `X -> X+YF+`, `Y -> -FX-Y`, 90° turns.
    DragonCurve,
}

impl FractalPreset {
    pub fn all() -> [FractalPreset; 3] {
        [
            FractalPreset::SierpinskiTriangle,
            FractalPreset::KochCurve,
            FractalPreset::DragonCurve,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            FractalPreset::SierpinskiTriangle => "Sierpinski triangle",
            FractalPreset::KochCurve => "Koch curve",
            FractalPreset::DragonCurve => "Dragon curve",
        }
    }

    pub fn grammar(self) -> GrammarSpec {
        match self {
            FractalPreset::SierpinskiTriangle => GrammarSpec::new(
                "F-G-G",
                RuleTable::new()
                    .with_rule('F', "F-G+F+G-F")
                    .with_rule('G', "GG"),
                8,
            ),
            FractalPreset::KochCurve => {
                GrammarSpec::new("F", RuleTable::new().with_rule('F', "F+F-F-F+F"), 6)
            }
            FractalPreset::DragonCurve => GrammarSpec::new(
                "FX",
                RuleTable::new()
                    .with_rule('X', "X+YF+")
                    .with_rule('Y', "-FX-Y"),
                10,
            ),
        }
    }

    pub fn drawing_params(self) -> DrawingParams {
        let rotation = match self {
            FractalPreset::SierpinskiTriangle => 2.0944,
            FractalPreset::KochCurve => 1.5708,
            FractalPreset::DragonCurve => FRAC_PI_2,
        };
        DrawingParams {
            step_length: 10.0,
            rotation,
            initial_heading: -FRAC_PI_2,
            initial_position: DVec2::new(200.0, 200.0),
        }
    }
}
