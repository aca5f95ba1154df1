//! # symbios-curve
//!
//! Generates self-similar curves from L-System grammars and interprets them as
//! 2D turtle graphics.
//!
//! The pipeline has two pure stages:
//!
//! 1. [`GrammarEngine`] rewrites an axiom with a [`RuleTable`] for a number of
//!    passes, refusing expansions larger than a configured ceiling.
//! 2. [`TurtleInterpreter`] walks the expanded string through an
//!    [`ActionTable`] and returns stroke-ordered [`Segment`]s in an abstract
//!    drawing plane.
//!
//! Camera handling and painting stay with the host; the [`viewport`] module
//! provides a [`ViewportState`] and a [`PathSink`] seam for that.
//!
//! ```
//! use symbios_curve::{FractalPreset, GrammarEngine, TurtleInterpreter};
//!
//! let preset = FractalPreset::KochCurve;
//! let symbols = GrammarEngine::default().expand_spec(&preset.grammar()).unwrap();
//!
//! let mut turtle = TurtleInterpreter::new(preset.drawing_params());
//! turtle.populate_standard_symbols();
//! let segments = turtle.interpret(&symbols).unwrap();
//! assert_eq!(segments.len(), 5usize.pow(6));
//! ```

pub mod cache;
pub mod error;
pub mod geometry;
pub mod grammar;
pub mod interpreter;
pub mod presets;
pub mod turtle;
pub mod viewport;

pub use cache::*;
pub use error::*;
pub use geometry::*;
pub use grammar::*;
pub use interpreter::*;
pub use presets::*;
pub use turtle::*;
pub use viewport::*;
