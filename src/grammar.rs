//! Grammar engine: deterministic rewriting of an axiom by a rule table.
//!
//! The entry point is [`GrammarEngine`]. Configure it with a [`GrammarConfig`]
//! (the output ceiling), then call [`GrammarEngine::expand`] with an axiom, a
//! [`RuleTable`] and an iteration count, or [`GrammarEngine::expand_spec`] with a
//! bundled [`GrammarSpec`].
//!
//! # Terminal symbols
//!
//! A symbol with no entry in the [`RuleTable`] is a *terminal*: each rewrite
//! pass replaces it with itself. Grammars therefore never need identity rules
//! such as `+ -> +` for their turtle commands.

use crate::error::{LsysError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, trace};

/// A single grammar symbol.
pub type Symbol = char;

/// Production rules mapping a symbol to its replacement string.
///
/// Backed by an ordered map so that two tables with the same rules compare,
/// hash and serialise identically regardless of insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTable {
    rules: BTreeMap<Symbol, String>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a production (builder pattern). A later rule for the same symbol
    /// replaces the earlier one.
    pub fn with_rule(mut self, symbol: Symbol, replacement: impl Into<String>) -> Self {
        self.insert(symbol, replacement);
        self
    }

    /// Inserts a production, returning the replacement it overwrote.
    pub fn insert(&mut self, symbol: Symbol, replacement: impl Into<String>) -> Option<String> {
        self.rules.insert(symbol, replacement.into())
    }

    /// The replacement registered for `symbol`, or `None` for a terminal.
    pub fn replacement(&self, symbol: Symbol) -> Option<&str> {
        self.rules.get(&symbol).map(String::as_str)
    }

    /// Returns `true` when `symbol` has no production and rewrites to itself.
    pub fn is_terminal(&self, symbol: Symbol) -> bool {
        !self.rules.contains_key(&symbol)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &str)> {
        self.rules.iter().map(|(&s, r)| (s, r.as_str()))
    }

    /// Applies a single rewrite pass to `input`.
    pub fn rewrite(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.rewrite_into(input, &mut out);
        out
    }

    fn rewrite_into(&self, input: &str, out: &mut String) {
        for symbol in input.chars() {
            match self.rules.get(&symbol) {
                Some(replacement) => out.push_str(replacement),
                None => out.push(symbol),
            }
        }
    }
}

impl<S: Into<String>> FromIterator<(Symbol, S)> for RuleTable {
    fn from_iter<I: IntoIterator<Item = (Symbol, S)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().map(|(s, r)| (s, r.into())).collect(),
        }
    }
}

/// Immutable description of one fractal: axiom, rules and pass count.
///
/// Fields are read-only; changing any parameter means building a new spec.
/// Specs are `Hash + Eq` on their content so expansions can be cached by value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GrammarSpec {
    axiom: String,
    rules: RuleTable,
    iterations: u32,
}

impl GrammarSpec {
    pub fn new(axiom: impl Into<String>, rules: RuleTable, iterations: u32) -> Self {
        Self {
            axiom: axiom.into(),
            rules,
            iterations,
        }
    }

    /// Builds a spec from a signed iteration count, as typed by a user.
    ///
    /// Negative counts fail with [`LsysError::InvalidParameter`]; they are never
    /// clamped to zero.
    pub fn try_new(axiom: impl Into<String>, rules: RuleTable, iterations: i64) -> Result<Self> {
        if iterations < 0 {
            return Err(LsysError::invalid(
                "iterations",
                format!("must be non-negative, got {}", iterations),
            ));
        }
        let iterations = u32::try_from(iterations).map_err(|_| {
            LsysError::invalid(
                "iterations",
                format!("must be at most {}, got {}", u32::MAX, iterations),
            )
        })?;
        Ok(Self::new(axiom, rules, iterations))
    }

    pub fn axiom(&self) -> &str {
        &self.axiom
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}

/// Configuration for grammar expansion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrammarConfig {
    /// Maximum number of symbols (`char`s) an expansion may produce.
    ///
    /// Symbols take 1 to 4 bytes each, so the output buffer needs up to four
    /// times this many bytes; the alphabet actually used decides how many.
    pub max_output_len: usize,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            max_output_len: 16 * 1024 * 1024,
        }
    }
}

/// Expands grammars under a fixed output ceiling.
///
/// The engine holds no mutable state and can be shared across threads.
#[derive(Clone, Debug, Default)]
pub struct GrammarEngine {
    config: GrammarConfig,
}

impl GrammarEngine {
    pub fn new(config: GrammarConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GrammarConfig {
        &self.config
    }

    /// Predicts the symbol count of `iterations` passes without building any string.
    ///
    /// Works on per-symbol occurrence counts, so the cost is proportional to the
    /// alphabet size rather than the output length. Fails with
    /// [`LsysError::GrammarTooLarge`] on the first pass whose total exceeds
    /// `max_output_len` (pass `0` means the axiom alone is too long).
    pub fn measure(&self, axiom: &str, rules: &RuleTable, iterations: u32) -> Result<usize> {
        self.predict(axiom, rules, iterations, None).map(|p| p.symbols)
    }

    fn predict(
        &self,
        axiom: &str,
        rules: &RuleTable,
        iterations: u32,
        cancel: Option<&AtomicBool>,
    ) -> Result<Prediction> {
        let limit = self.config.max_output_len;
        let too_large = |pass| LsysError::GrammarTooLarge { limit, pass };

        let mut counts: BTreeMap<Symbol, usize> = BTreeMap::new();
        for symbol in axiom.chars() {
            *counts.entry(symbol).or_insert(0) += 1;
        }
        let mut total: usize = counts.values().sum();
        if total > limit {
            return Err(too_large(0));
        }

        for pass in 1..=iterations {
            // No rewrite pass has run while predicting.
            if is_raised(cancel) {
                return Err(LsysError::Cancelled {
                    completed_passes: 0,
                });
            }

            let mut next: BTreeMap<Symbol, usize> = BTreeMap::new();
            let mut next_total: usize = 0;
            for (&symbol, &count) in &counts {
                let mut emit = |s: Symbol| -> Result<()> {
                    next_total = next_total
                        .checked_add(count)
                        .filter(|&t| t <= limit)
                        .ok_or_else(|| too_large(pass))?;
                    *next.entry(s).or_insert(0) += count;
                    Ok(())
                };
                match rules.replacement(symbol) {
                    Some(replacement) => replacement.chars().try_for_each(&mut emit)?,
                    None => emit(symbol)?,
                }
            }
            // Counts are a pure function of the previous counts; once they
            // repeat, every later pass has the same length.
            if next == counts {
                break;
            }
            counts = next;
            total = next_total;
        }

        let bytes = counts
            .iter()
            .map(|(s, &n)| n.saturating_mul(s.len_utf8()))
            .fold(0usize, usize::saturating_add);
        Ok(Prediction {
            symbols: total,
            bytes,
        })
    }

    /// Rewrites `axiom` by `rules` exactly `iterations` times.
    ///
    /// `iterations == 0` returns the axiom unchanged. The output length is
    /// checked against the ceiling before any pass runs.
    pub fn expand(&self, axiom: &str, rules: &RuleTable, iterations: u32) -> Result<String> {
        self.run(axiom, rules, iterations, None)
    }

    pub fn expand_spec(&self, spec: &GrammarSpec) -> Result<String> {
        self.run(spec.axiom(), spec.rules(), spec.iterations(), None)
    }

    /// Like [`expand`](Self::expand), but polls `cancel` once per pass, both
    /// while predicting the output length and while rewriting, and fails with
    /// [`LsysError::Cancelled`] when it is set.
    pub fn expand_cancellable(
        &self,
        axiom: &str,
        rules: &RuleTable,
        iterations: u32,
        cancel: &AtomicBool,
    ) -> Result<String> {
        self.run(axiom, rules, iterations, Some(cancel))
    }

    fn run(
        &self,
        axiom: &str,
        rules: &RuleTable,
        iterations: u32,
        cancel: Option<&AtomicBool>,
    ) -> Result<String> {
        let predicted = self.predict(axiom, rules, iterations, cancel)?;

        let mut current = String::with_capacity(predicted.bytes.max(axiom.len()));
        current.push_str(axiom);
        let mut next = String::with_capacity(predicted.bytes);

        for pass in 0..iterations {
            if is_raised(cancel) {
                return Err(LsysError::Cancelled {
                    completed_passes: pass,
                });
            }

            next.clear();
            rules.rewrite_into(&current, &mut next);
            trace!(pass = pass + 1, len = next.len(), "rewrite pass");

            if next == current {
                trace!(pass = pass + 1, "fixed point reached");
                break;
            }
            std::mem::swap(&mut current, &mut next);
        }

        debug!(
            iterations,
            axiom_len = axiom.len(),
            output_len = predicted.symbols,
            "grammar expanded"
        );
        Ok(current)
    }
}

/// Final size of an expansion, known before it is built.
struct Prediction {
    symbols: usize,
    bytes: usize,
}

fn is_raised(cancel: Option<&AtomicBool>) -> bool {
    cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
}
