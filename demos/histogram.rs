//! Histogram example: compile an expression once and sample it
//!
//! This example demonstrates:
//! - Rendering the postfix form of an expression
//! - Resolving deterministic and dice expressions
//! - Sampling an outcome distribution and reading its statistics

use zzroll::*;

fn main() -> Result<(), RollError> {
    // Seeded so the output is the same on every run
    let mut resolver = DiceResolver::seeded(2021);

    let expression = "2d4 + 3d6 - 1";
    println!("Expression: {}", expression);
    println!("RPN:        {}", resolver.to_postfix(expression));

    // Plain arithmetic always gives the same answer
    println!("\n(12+2^3)/10*8%5 = {}", resolver.resolve("(12+2^3)/10*8%5"));

    // Dice expressions vary from roll to roll
    println!("\nFive rolls of {}:", expression);
    let postfix = resolver.compile(expression)?;
    for _ in 0..5 {
        println!("  {}", resolver.evaluate(&postfix)?);
    }

    // Sample the distribution
    let report = resolver.sample(expression, 100_000)?;
    println!("\n=== Statistics ===");
    println!("Trials: {}", report.trials);
    println!("Mean:   {:.2}", report.mean());
    if let Some(mode) = report.mode() {
        println!("Mode:   {} ({:.2}%)", mode, report.percentage(mode));
    }

    println!();
    print!("{}", report.render(80));

    Ok(())
}
