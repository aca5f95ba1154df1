// tests/curve_scenarios.rs
use glam::DVec2;
use std::f64::consts::{FRAC_PI_2, PI};
use std::sync::atomic::AtomicBool;
use std::time::{Duration, Instant};
use symbios_curve::{
    ActionTable, Bounds, DrawingParams, FractalPreset, GrammarConfig, GrammarEngine, GrammarSpec,
    LsysError, PathCommand, RuleTable, SymbolPolicy, TurtleAction, TurtleInterpreter,
};

const EPS: f64 = 1e-9;

fn sierpinski_rules() -> RuleTable {
    RuleTable::new()
        .with_rule('F', "F-G+F+G-F")
        .with_rule('G', "GG")
}

fn interpreter(heading: f64, rotation: f64) -> TurtleInterpreter {
    let mut interpreter = TurtleInterpreter::new(DrawingParams {
        step_length: 10.0,
        rotation,
        initial_heading: heading,
        initial_position: DVec2::ZERO,
    });
    interpreter.populate_standard_symbols();
    interpreter
}

fn assert_point(actual: DVec2, expected: DVec2) {
    assert!(
        actual.abs_diff_eq(expected, EPS),
        "expected {expected:?}, got {actual:?}"
    );
}

// --- Grammar engine ---

#[test]
fn test_sierpinski_two_passes_matches_hand_expansion() {
    let engine = GrammarEngine::default();

    // Pass 1: F-G-G -> (F-G+F+G-F) - (GG) - (GG)
    let once = engine.expand("F-G-G", &sierpinski_rules(), 1).unwrap();
    assert_eq!(once, "F-G+F+G-F-GG-GG");

    // Pass 2: every F becomes F-G+F+G-F, every G becomes GG, +/- are terminals.
    let twice = engine.expand("F-G-G", &sierpinski_rules(), 2).unwrap();
    assert_eq!(twice, "F-G+F+G-F-GG+F-G+F+G-F+GG-F-G+F+G-F-GGGG-GGGG");
    assert_eq!(twice.len(), 45);
    assert_eq!(engine.measure("F-G-G", &sierpinski_rules(), 2).unwrap(), 45);
}

#[test]
fn test_zero_iterations_returns_axiom() {
    let engine = GrammarEngine::default();
    assert_eq!(engine.expand("F-G-G", &sierpinski_rules(), 0).unwrap(), "F-G-G");
    assert_eq!(engine.expand("", &sierpinski_rules(), 5).unwrap(), "");
}

#[test]
fn test_symbols_without_rules_are_terminals() {
    let rules = RuleTable::new().with_rule('X', "XY");
    assert!(rules.is_terminal('+'));
    assert!(!rules.is_terminal('X'));

    let engine = GrammarEngine::default();
    assert_eq!(engine.expand("X+Y", &rules, 1).unwrap(), "XY+Y");
    assert_eq!(engine.expand("X+Y", &rules, 2).unwrap(), "XYY+Y");
}

#[test]
fn test_negative_iterations_are_rejected() {
    let err = GrammarSpec::try_new("F", sierpinski_rules(), -1).unwrap_err();
    assert!(matches!(
        err,
        LsysError::InvalidParameter {
            name: "iterations",
            ..
        }
    ));

    let spec = GrammarSpec::try_new("F", sierpinski_rules(), 3).unwrap();
    assert_eq!(spec.iterations(), 3);
    assert_eq!(spec.axiom(), "F");
    assert_eq!(spec.rules(), &sierpinski_rules());
}

#[test]
fn test_oversized_grammar_is_rejected_before_expansion() {
    // Branching factor 2: pass 9 yields 512 symbols, pass 10 would yield 1024.
    let engine = GrammarEngine::new(GrammarConfig {
        max_output_len: 1000,
    });
    let rules = RuleTable::new().with_rule('A', "AA");

    let err = engine.expand("A", &rules, 20).unwrap_err();
    assert_eq!(
        err,
        LsysError::GrammarTooLarge {
            limit: 1000,
            pass: 10
        }
    );
    assert_eq!(engine.expand("A", &rules, 9).unwrap().len(), 512);
}

#[test]
fn test_oversized_axiom_fails_at_pass_zero() {
    let engine = GrammarEngine::new(GrammarConfig { max_output_len: 3 });
    let err = engine.expand("FFFF", &RuleTable::new(), 0).unwrap_err();
    assert_eq!(err, LsysError::GrammarTooLarge { limit: 3, pass: 0 });
}

#[test]
fn test_fixed_point_stops_early() {
    // Only terminals: every pass is the identity, so a huge count is instant.
    let engine = GrammarEngine::default();
    let out = engine.expand("F+F", &RuleTable::new(), u32::MAX).unwrap();
    assert_eq!(out, "F+F");
}

#[test]
fn test_cancellation_is_checked_between_passes() {
    let engine = GrammarEngine::default();
    let raised = AtomicBool::new(true);

    let err = engine
        .expand_cancellable("F-G-G", &sierpinski_rules(), 3, &raised)
        .unwrap_err();
    assert_eq!(err, LsysError::Cancelled { completed_passes: 0 });

    let lowered = AtomicBool::new(false);
    let out = engine
        .expand_cancellable("F-G-G", &sierpinski_rules(), 1, &lowered)
        .unwrap();
    assert_eq!(out, "F-G+F+G-F-GG-GG");
}

#[test]
fn test_raised_flag_stops_length_prediction() {
    // A -> B -> A never grows and never settles, so only the flag can end it.
    let engine = GrammarEngine::default();
    let rules = RuleTable::new().with_rule('A', "B").with_rule('B', "A");
    let raised = AtomicBool::new(true);

    let started = Instant::now();
    let err = engine
        .expand_cancellable("A", &rules, 20_000_000, &raised)
        .unwrap_err();

    assert_eq!(err, LsysError::Cancelled { completed_passes: 0 });
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[test]
fn test_ceiling_counts_symbols_not_bytes() {
    // Four two-byte symbols fit a four-symbol ceiling.
    let engine = GrammarEngine::new(GrammarConfig { max_output_len: 4 });
    let rules = RuleTable::new().with_rule('α', "αβ");

    let out = engine.expand("α", &rules, 3).unwrap();
    assert_eq!(out, "αβββ");
    assert_eq!(out.len(), 8);
    assert_eq!(engine.measure("α", &rules, 3).unwrap(), 4);
    assert_eq!(
        engine.expand("α", &rules, 4).unwrap_err(),
        LsysError::GrammarTooLarge { limit: 4, pass: 4 }
    );
}

// --- Turtle interpreter ---

#[test]
fn test_heading_accumulation() {
    // Forward is (sin, cos) on purpose, see `heading_vector`; do not swap it to (cos, sin).
    // Heading -π/2 faces -X under the (sin, cos) convention.
    // F: (0,0) -> (-10,0). '+' adds π/2, heading 0 faces +Y. F: (-10,0) -> (-10,10).
    let segments = interpreter(-FRAC_PI_2, FRAC_PI_2).interpret("F+F").unwrap();

    assert_eq!(segments.len(), 2);
    assert_point(segments[0].from, DVec2::ZERO);
    assert_point(segments[0].to, DVec2::new(-10.0, 0.0));
    assert_point(segments[1].from, DVec2::new(-10.0, 0.0));
    assert_point(segments[1].to, DVec2::new(-10.0, 10.0));
}

#[test]
fn test_remapped_rotation_mirrors_the_path() {
    // Heading π/2 faces +X; mapping '+' to RotateRight brings it back to +Y.
    let mut interpreter = interpreter(FRAC_PI_2, FRAC_PI_2);
    interpreter.set_action('+', TurtleAction::RotateRight);
    let segments = interpreter.interpret("F+F").unwrap();

    assert_point(segments[0].to, DVec2::new(10.0, 0.0));
    assert_point(segments[1].from, DVec2::new(10.0, 0.0));
    assert_point(segments[1].to, DVec2::new(10.0, 10.0));
}

#[test]
fn test_sierpinski_path_is_closed() {
    let symbols = GrammarEngine::default()
        .expand("F-G-G", &sierpinski_rules(), 2)
        .unwrap();
    let segments = interpreter(-FRAC_PI_2, 2.0 * PI / 3.0)
        .interpret(&symbols)
        .unwrap();

    assert_eq!(segments.len(), 27);
    assert_point(segments[0].from, DVec2::ZERO);
    assert_point(segments.last().unwrap().to, DVec2::ZERO);
    for pair in segments.windows(2) {
        assert_eq!(pair[0].to, pair[1].from, "path must be continuous");
    }
}

#[test]
fn test_unmapped_symbols_are_ignored() {
    let interpreter = interpreter(0.0, FRAC_PI_2);
    let plain = interpreter.interpret("F+F").unwrap();
    let noisy = interpreter.interpret("XF?+YF#").unwrap();
    assert_eq!(plain, noisy);
    assert!(interpreter.interpret("XYZ").unwrap().is_empty());
}

#[test]
fn test_strict_mode_rejects_unknown_symbols() {
    let strict = interpreter(0.0, FRAC_PI_2).with_policy(SymbolPolicy::Strict);

    let err = strict.interpret("F+XF").unwrap_err();
    assert_eq!(
        err,
        LsysError::UnknownSymbol {
            symbol: 'X',
            index: 2
        }
    );

    // Declared placeholders are fine.
    let mut strict = strict;
    strict.set_action('X', TurtleAction::NoOp);
    assert_eq!(strict.interpret("F+XF").unwrap().len(), 2);
}

#[test]
fn test_invalid_step_length_is_rejected() {
    for step_length in [0.0, -10.0, f64::NAN, f64::INFINITY] {
        let interpreter = TurtleInterpreter::new(DrawingParams {
            step_length,
            ..Default::default()
        })
        .with_actions(ActionTable::standard());
        let err = interpreter.interpret("F").unwrap_err();
        assert!(matches!(
            err,
            LsysError::InvalidParameter {
                name: "step_length",
                ..
            }
        ));
    }
}

#[test]
fn test_backward_draws_against_heading() {
    let segments = interpreter(0.0, FRAC_PI_2).interpret("FB").unwrap();
    assert_eq!(segments.len(), 2);
    assert_point(segments[0].to, DVec2::new(0.0, 10.0));
    assert_eq!(segments[1], segments[0].reversed());
}

#[test]
fn test_pen_up_moves_break_the_path() {
    let interpreter = interpreter(0.0, FRAC_PI_2);

    let segments = interpreter.interpret("FfF").unwrap();
    assert_eq!(segments.len(), 2);
    assert_point(segments[1].from, DVec2::new(0.0, 20.0));

    let commands = interpreter.path_commands("FFfF").unwrap();
    assert_eq!(
        commands,
        vec![
            PathCommand::MoveTo(DVec2::ZERO),
            PathCommand::LineTo(DVec2::new(0.0, 10.0)),
            PathCommand::LineTo(DVec2::new(0.0, 20.0)),
            PathCommand::MoveTo(DVec2::new(0.0, 30.0)),
            PathCommand::LineTo(DVec2::new(0.0, 40.0)),
        ]
    );
}

#[test]
fn test_presets_emit_one_segment_per_draw_symbol() {
    let engine = GrammarEngine::default();
    for preset in FractalPreset::all() {
        let symbols = engine.expand_spec(&preset.grammar()).unwrap();
        let mut interpreter = TurtleInterpreter::new(preset.drawing_params());
        interpreter.populate_standard_symbols();

        let segments = interpreter.interpret(&symbols).unwrap();
        assert_eq!(
            segments.len(),
            interpreter.actions().count_draws(&symbols),
            "{}",
            preset.name()
        );
        assert_eq!(segments, interpreter.interpret(&symbols).unwrap());
        assert_eq!(segments[0].from, DVec2::new(200.0, 200.0));
    }
}

#[test]
fn test_bounds_cover_every_segment() {
    let segments = interpreter(0.0, FRAC_PI_2).interpret("F+F+F").unwrap();
    let bounds = Bounds::of_segments(&segments).unwrap();

    assert_point(bounds.min, DVec2::new(0.0, 0.0));
    assert_point(bounds.max, DVec2::new(10.0, 10.0));
    assert_point(bounds.center(), DVec2::new(5.0, 5.0));
    assert!(Bounds::of_segments(&[]).is_none());
}

// --- Configuration as data ---

#[test]
fn test_grammar_spec_loads_from_json() {
    let json = r#"{ "axiom": "F", "rules": { "F": "F+F-F-F+F" }, "iterations": 6 }"#;
    let spec: GrammarSpec = serde_json::from_str(json).unwrap();
    assert_eq!(spec, FractalPreset::KochCurve.grammar());

    let negative = r#"{ "axiom": "F", "rules": {}, "iterations": -1 }"#;
    assert!(serde_json::from_str::<GrammarSpec>(negative).is_err());
}

#[test]
fn test_action_table_loads_from_json() {
    let json = r#"{ "A": "Forward", "b": "Move", "<": "RotateLeft", ">": "RotateRight", "~": "NoOp" }"#;
    let table: ActionTable = serde_json::from_str(json).unwrap();
    assert_eq!(table.get('A'), Some(TurtleAction::Forward));
    assert_eq!(table.get('~'), Some(TurtleAction::NoOp));
    assert_eq!(table.count_draws("AbA<A~"), 3);
}
