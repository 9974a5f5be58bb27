use zzroll::roller::Roller;
use zzroll::*;

/// Test the worked example from the docs: precedence, brackets, `%`.
#[test]
fn test_mixed_arithmetic() {
    let mut resolver = DiceResolver::new();
    assert_eq!(resolver.resolve("(12+2^3)/10*8%5"), 1);
}

/// Test dice-free expressions against hand-computed values.
#[test]
fn test_standard_evaluation_order() {
    let mut resolver = DiceResolver::new();

    let cases = [
        ("1 + 2 * 3", 7),
        ("(1 + 2) * 3", 9),
        ("2 ^ 3 * 2", 16),
        ("2 * 3 ^ 2", 18),
        ("20 / 3", 6),
        ("20 % 3 + 1", 3),
        ("100 - 10 - 1", 89),
        ("((2 + 3) * (4 - 1)) / 5", 3),
        ("0 - 7 / 2", -3),
        ("10 - 20", -10),
    ];

    for (expression, expected) in cases {
        assert_eq!(resolver.resolve(expression), expected, "{}", expression);
        assert!(!resolver.has_error(), "{}", expression);
    }
}

/// Test that dice-free expressions always give the same answer.
#[test]
fn test_determinism_without_dice() {
    let mut resolver = DiceResolver::new();
    let first = resolver.resolve("(7 + 3) * 4 ^ 2 % 9 - 5C3");
    for _ in 0..100 {
        assert_eq!(resolver.resolve("(7 + 3) * 4 ^ 2 % 9 - 5C3"), first);
    }
}

/// Test the dice range invariant for a single roll group.
#[test]
fn test_three_d_six_range() {
    let mut resolver = DiceResolver::seeded(1);
    for _ in 0..10_000 {
        let value = resolver.resolve("3d6");
        assert!((3..=18).contains(&value), "3d6 gave {}", value);
    }
}

/// Test the dice range invariant for a mixed expression.
#[test]
fn test_mixed_dice_range() {
    let mut resolver = DiceResolver::seeded(2);
    for _ in 0..10_000 {
        let value = resolver.resolve("2d4 + 3d6 - 1");
        assert!((4..=25).contains(&value), "2d4 + 3d6 - 1 gave {}", value);
    }
}

/// Test that the empirical mean of 3d6 approaches 10.5.
#[test]
fn test_three_d_six_mean() {
    let mut resolver = DiceResolver::seeded(3);
    let report = resolver.sample("3d6", 20_000).unwrap();
    assert!(
        (report.mean() - 10.5).abs() < 0.15,
        "mean was {}",
        report.mean()
    );
}

/// Test that both extremes of 3d6 show up eventually.
#[test]
fn test_three_d_six_extremes_reachable() {
    let mut resolver = DiceResolver::seeded(4);
    let report = resolver.sample("3d6", 50_000).unwrap();
    assert!(report.count(3) > 0);
    assert!(report.count(18) > 0);
    assert_eq!(report.counts.len(), 16);
}

/// Test malformed input resolving to 0.
#[test]
fn test_malformed_input_resolves_to_zero() {
    let mut resolver = DiceResolver::new();

    assert_eq!(resolver.resolve("(9*7"), 0);
    assert_eq!(resolver.last_error(), Some(&RollError::UnbalancedBracket));

    assert_eq!(resolver.resolve("*oas"), 0);
    assert!(matches!(
        resolver.last_error(),
        Some(RollError::InsufficientOperands { .. })
    ));

    assert_eq!(resolver.resolve(""), 0);
    assert_eq!(resolver.last_error(), Some(&RollError::EmptyExpression));
}

/// Test that division by zero is reported, not silently valued.
#[test]
fn test_division_by_zero_is_reported() {
    let mut resolver = DiceResolver::new();
    assert_eq!(resolver.resolve("5 / (3 - 3)"), 0);
    assert_eq!(
        resolver.last_error(),
        Some(&RollError::DivisionByZero {
            op: Operator::Divide
        })
    );
}

/// Test the postfix rendering and evaluating the same compiled form.
#[test]
fn test_postfix_round_trip() {
    let mut resolver = DiceResolver::new();
    assert_eq!(resolver.to_postfix("1 + 2 * 3"), "1 2 3 * +");

    let postfix = resolver.compile("1 + 2 * 3").unwrap();
    assert_eq!(
        postfix.tokens(),
        &[
            Token::Integer(1),
            Token::Integer(2),
            Token::Integer(3),
            Token::Operator(Operator::Multiply),
            Token::Operator(Operator::Add),
        ]
    );
    assert_eq!(resolver.evaluate(&postfix), Ok(7));

    let rebuilt = Postfix::from_tokens(postfix.tokens().to_vec());
    assert_eq!(rebuilt, postfix);
    assert_eq!(resolver.evaluate(&rebuilt), Ok(7));
}

/// Test factorial and choose through the full pipeline.
#[test]
fn test_factorial_and_choose() {
    let mut resolver = DiceResolver::new();
    assert_eq!(resolver.resolve("0!"), 1);
    assert_eq!(resolver.resolve("1!"), 1);
    assert_eq!(resolver.resolve("5!"), 120);
    assert_eq!(resolver.resolve("5C2"), 10);
    assert_eq!(resolver.resolve("5c2"), 10);
    assert_eq!(resolver.resolve("2C5"), 0);
    assert!(!resolver.has_error());
}

/// Test the residue policy in both modes.
#[test]
fn test_residual_values() {
    let mut lenient = DiceResolver::new();
    assert_eq!(lenient.resolve("1 2"), 2);
    assert!(!lenient.has_error());

    let strict_config = EngineConfig::from_json(r#"{ "strict": true }"#).unwrap();
    let mut strict = DiceResolver::with_config(strict_config);
    assert_eq!(strict.resolve("1 2"), 0);
    assert_eq!(
        strict.last_error(),
        Some(&RollError::ResidualOperands { count: 2 })
    );
}

/// A roller that counts how often it is asked for a roll.
struct CountingRoller {
    calls: usize,
}

impl Roller for CountingRoller {
    fn roll(&mut self, _faces: i64) -> i64 {
        self.calls += 1;
        1
    }
}

/// Test that every evaluation of a compiled form rolls again.
#[test]
fn test_sampling_rolls_every_trial() {
    let mut resolver =
        DiceResolver::with_roller(EngineConfig::default(), CountingRoller { calls: 0 });
    let report = resolver.sample("2d6", 250).unwrap();

    assert_eq!(report.count(2), 250);
    assert_eq!(resolver.roller_mut().calls, 500);
}

/// Test that the same seed reproduces a histogram exactly.
#[test]
fn test_seeded_histograms_match() {
    let mut a = DiceResolver::seeded(77);
    let mut b = DiceResolver::seeded(77);
    assert_eq!(a.histogram("4d8 - 2", 2_000), b.histogram("4d8 - 2", 2_000));
}

/// Test powers of 0, 1 and -1 with exponents beyond 32 bits.
#[test]
fn test_power_of_unit_bases() {
    let mut resolver = DiceResolver::new();
    assert_eq!(resolver.resolve("1^4294967296"), 1);
    assert_eq!(resolver.resolve("0^4294967296"), 0);
    assert_eq!(resolver.resolve("0^4294967296 + 5"), 5);
    assert_eq!(resolver.resolve("(0-1)^4294967297"), -1);
    assert!(!resolver.has_error());

    assert_eq!(resolver.resolve("2^4294967296"), 0);
    assert_eq!(
        resolver.last_error(),
        Some(&RollError::Overflow { op: Operator::Power })
    );
}

/// Test a custom precedence table from configuration.
#[test]
fn test_configured_precedence() {
    let config = EngineConfig::from_json(r#"{ "precedence": { "add": 6 } }"#).unwrap();
    let mut resolver = DiceResolver::with_config(config);
    assert_eq!(resolver.to_postfix("1 + 2 * 3"), "1 2 + 3 *");
    assert_eq!(resolver.resolve("1 + 2 * 3"), 9);
}

/// Test that an invalid precedence table is rejected.
#[test]
fn test_invalid_precedence_config() {
    let result = EngineConfig::from_json(r#"{ "precedence": { "dice": 0 } }"#);
    assert!(matches!(result, Err(RollError::Config(_))));
}
