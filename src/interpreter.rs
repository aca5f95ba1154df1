//! Interpreter that converts an expanded symbol string into line segments.
//!
//! The entry point is [`TurtleInterpreter`]. Configure it with [`DrawingParams`],
//! register symbol-to-action mappings via [`TurtleInterpreter::set_action`] or
//! [`TurtleInterpreter::populate_standard_symbols`], then call
//! [`TurtleInterpreter::interpret`] with the output of the
//! [`GrammarEngine`](crate::grammar::GrammarEngine).

use crate::error::{LsysError, Result};
use crate::geometry::{PathCommand, Segment};
use crate::grammar::Symbol;
use crate::turtle::{ActionTable, TurtleAction, TurtleState};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use tracing::debug;

/// Drawing parameters for one interpretation pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawingParams {
    /// Distance covered by every forward, backward or pen-up move. Must be positive.
    pub step_length: f64,
    /// Heading change (radians) applied by the rotate actions.
    pub rotation: f64,
    /// Heading (radians) the turtle starts each pass with.
    pub initial_heading: f64,
    /// Position the turtle starts each pass at.
    pub initial_position: DVec2,
}

impl Default for DrawingParams {
    fn default() -> Self {
        Self {
            step_length: 10.0,
            rotation: FRAC_PI_2,
            initial_heading: -FRAC_PI_2,
            initial_position: DVec2::ZERO,
        }
    }
}

impl DrawingParams {
    /// Checks that every parameter is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.step_length.is_finite() || self.step_length <= 0.0 {
            return Err(LsysError::invalid(
                "step_length",
                format!("must be positive and finite, got {}", self.step_length),
            ));
        }
        if !self.rotation.is_finite() {
            return Err(LsysError::invalid("rotation", "must be finite"));
        }
        if !self.initial_heading.is_finite() {
            return Err(LsysError::invalid("initial_heading", "must be finite"));
        }
        if !self.initial_position.is_finite() {
            return Err(LsysError::invalid("initial_position", "must be finite"));
        }
        Ok(())
    }
}

/// How the interpreter treats symbols missing from its [`ActionTable`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolPolicy {
    /// Unmapped symbols are silently skipped.
    #[default]
    Permissive,
    /// Unmapped symbols fail with [`LsysError::UnknownSymbol`]. Symbols mapped
    /// to [`TurtleAction::NoOp`] are still accepted.
    Strict,
}

/// Turtle movement produced by a single symbol.
enum Stroke {
    Draw(Segment),
    Jump,
}

/// Interprets symbol strings as 2D turtle-graphics commands.
#[derive(Clone, Debug)]
pub struct TurtleInterpreter {
    actions: ActionTable,
    params: DrawingParams,
    policy: SymbolPolicy,
}

impl TurtleInterpreter {
    /// Creates an interpreter with the given parameters and an empty action table.
    ///
    /// Register actions with [`set_action`](Self::set_action) or
    /// [`populate_standard_symbols`](Self::populate_standard_symbols) before
    /// calling [`interpret`](Self::interpret).
    pub fn new(params: DrawingParams) -> Self {
        Self {
            actions: ActionTable::new(),
            params,
            policy: SymbolPolicy::default(),
        }
    }

    /// Replaces the entire action table in one step (builder pattern).
    pub fn with_actions(mut self, actions: ActionTable) -> Self {
        self.actions = actions;
        self
    }

    pub fn with_policy(mut self, policy: SymbolPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Assigns a single [`TurtleAction`] to a symbol.
    pub fn set_action(&mut self, symbol: Symbol, action: TurtleAction) {
        self.actions.set(symbol, action);
    }

    /// Registers the conventional mappings from [`ActionTable::standard`],
    /// keeping any mapping already set for other symbols.
    pub fn populate_standard_symbols(&mut self) {
        for (symbol, action) in ActionTable::standard().iter() {
            self.actions.set(symbol, action);
        }
    }

    pub fn params(&self) -> &DrawingParams {
        &self.params
    }

    pub fn actions(&self) -> &ActionTable {
        &self.actions
    }

    pub fn policy(&self) -> SymbolPolicy {
        self.policy
    }

    /// Interprets `symbols` and returns the drawn segments in stroke order.
    ///
    /// The turtle starts at `initial_position` facing `initial_heading`.
    /// Exactly one segment is emitted per symbol mapped to
    /// [`TurtleAction::Forward`] or [`TurtleAction::Backward`]. Headings
    /// accumulate without wrapping and positions accumulate without re-basing,
    /// so very long strings carry additive floating-point drift.
    ///
    /// # Errors
    ///
    /// [`LsysError::InvalidParameter`] if the drawing parameters are invalid, and
    /// [`LsysError::UnknownSymbol`] for an unmapped symbol under
    /// [`SymbolPolicy::Strict`]. Both are detected before any turtle movement.
    pub fn interpret(&self, symbols: &str) -> Result<Vec<Segment>> {
        let mut segments = Vec::with_capacity(self.actions.count_draws(symbols));
        self.walk(symbols, |stroke| {
            if let Stroke::Draw(segment) = stroke {
                segments.push(segment);
            }
        })?;
        debug!(
            symbols = symbols.len(),
            segments = segments.len(),
            "symbols interpreted"
        );
        Ok(segments)
    }

    /// Interprets `symbols` into move-to / line-to commands.
    ///
    /// Consecutive connected segments share one pen-down run; a
    /// [`PathCommand::MoveTo`] is emitted at the start and after every pen-up
    /// move. The drawn geometry is identical to [`interpret`](Self::interpret).
    pub fn path_commands(&self, symbols: &str) -> Result<Vec<PathCommand>> {
        let mut commands = Vec::new();
        let mut pen: Option<DVec2> = None;
        self.walk(symbols, |stroke| match stroke {
            Stroke::Draw(segment) => {
                if pen != Some(segment.from) {
                    commands.push(PathCommand::MoveTo(segment.from));
                }
                commands.push(PathCommand::LineTo(segment.to));
                pen = Some(segment.to);
            }
            Stroke::Jump => pen = None,
        })?;
        Ok(commands)
    }

    fn walk(&self, symbols: &str, mut emit: impl FnMut(Stroke)) -> Result<()> {
        self.params.validate()?;
        if self.policy == SymbolPolicy::Strict
            && let Some((index, symbol)) = symbols
                .chars()
                .enumerate()
                .find(|&(_, s)| self.actions.get(s).is_none())
        {
            return Err(LsysError::UnknownSymbol { symbol, index });
        }

        let step = self.params.step_length;
        let angle = self.params.rotation;
        let mut turtle =
            TurtleState::new(self.params.initial_position, self.params.initial_heading);

        for symbol in symbols.chars() {
            match self.actions.get(symbol).unwrap_or(TurtleAction::NoOp) {
                TurtleAction::Forward => emit(Stroke::Draw(turtle.advance(step))),
                TurtleAction::Backward => emit(Stroke::Draw(turtle.advance(-step))),
                TurtleAction::Move => {
                    turtle.advance(step);
                    emit(Stroke::Jump);
                }
                TurtleAction::RotateLeft => turtle.rotate(angle),
                TurtleAction::RotateRight => turtle.rotate(-angle),
                TurtleAction::NoOp => {}
            }
        }

        Ok(())
    }
}
