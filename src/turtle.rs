//! Turtle state and the actions a symbol can trigger.

use crate::geometry::{Segment, heading_vector};
use crate::grammar::Symbol;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The state of the drawing turtle.
///
/// Lives for a single interpretation pass and is rebuilt from the
/// [`DrawingParams`](crate::interpreter::DrawingParams) at the start of each one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleState {
    /// Current drawing-plane position of the pen.
    pub position: DVec2,

    /// Current heading in radians. Accumulates without wrapping.
    pub heading: f64,
}

impl Default for TurtleState {
    fn default() -> Self {
        Self {
            position: DVec2::ZERO,
            heading: 0.0,
        }
    }
}

impl TurtleState {
    pub fn new(position: DVec2, heading: f64) -> Self {
        Self { position, heading }
    }

    /// Unit vector the turtle is facing. See [`heading_vector`].
    pub fn direction(&self) -> DVec2 {
        heading_vector(self.heading)
    }

    /// Moves `distance` along the heading and returns the path travelled.
    ///
    /// Negative distances walk backwards without changing the heading.
    pub fn advance(&mut self, distance: f64) -> Segment {
        let from = self.position;
        self.position += self.direction() * distance;
        Segment::new(from, self.position)
    }

    /// Adds `angle` radians to the heading.
    pub fn rotate(&mut self, angle: f64) {
        self.heading += angle;
    }
}

/// Operations a symbol can be mapped to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurtleAction {
    /// Draw one step forward (`F`, `G`).
    Forward,
    /// Draw one step backward, keeping the heading (`B`).
    Backward,
    /// Move one step forward with the pen up (`f`).
    Move,
    /// Add the rotation increment to the heading (`+`).
    RotateLeft,
    /// Subtract the rotation increment from the heading (`-`).
    RotateRight,
    /// Explicitly declared placeholder; accepted by strict interpretation.
    NoOp,
}

impl TurtleAction {
    /// Returns `true` for actions that emit a segment.
    pub fn draws(self) -> bool {
        matches!(self, TurtleAction::Forward | TurtleAction::Backward)
    }
}

/// Symbol-to-action mapping supplied as configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionTable {
    actions: HashMap<Symbol, TurtleAction>,
}

impl ActionTable {
    /// An empty table: every symbol is unmapped.
    pub fn new() -> Self {
        Self::default()
    }

    /// The conventional turtle alphabet.
    ///
    /// | Symbol | Action |
    /// |--------|--------|
    /// | `F`, `G` | [`Forward`](TurtleAction::Forward) |
    /// | `B` | [`Backward`](TurtleAction::Backward) |
    /// | `f` | [`Move`](TurtleAction::Move) |
    /// | `+` | [`RotateLeft`](TurtleAction::RotateLeft) |
    /// | `-` | [`RotateRight`](TurtleAction::RotateRight) |
    pub fn standard() -> Self {
        [
            ('F', TurtleAction::Forward),
            ('G', TurtleAction::Forward),
            ('B', TurtleAction::Backward),
            ('f', TurtleAction::Move),
            ('+', TurtleAction::RotateLeft),
            ('-', TurtleAction::RotateRight),
        ]
        .into_iter()
        .collect()
    }

    /// Assigns an action to a symbol (builder pattern).
    pub fn with(mut self, symbol: Symbol, action: TurtleAction) -> Self {
        self.set(symbol, action);
        self
    }

    /// Assigns an action to a symbol, returning the previous mapping.
    pub fn set(&mut self, symbol: Symbol, action: TurtleAction) -> Option<TurtleAction> {
        self.actions.insert(symbol, action)
    }

    pub fn get(&self, symbol: Symbol) -> Option<TurtleAction> {
        self.actions.get(&symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, TurtleAction)> + '_ {
        self.actions.iter().map(|(&s, &a)| (s, a))
    }

    /// Number of symbols in `symbols` mapped to a drawing action.
    pub fn count_draws(&self, symbols: &str) -> usize {
        symbols
            .chars()
            .filter(|&s| self.get(s).is_some_and(TurtleAction::draws))
            .count()
    }
}

impl FromIterator<(Symbol, TurtleAction)> for ActionTable {
    fn from_iter<I: IntoIterator<Item = (Symbol, TurtleAction)>>(iter: I) -> Self {
        Self {
            actions: iter.into_iter().collect(),
        }
    }
}
