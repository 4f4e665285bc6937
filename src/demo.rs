//! Edge-case walkthrough for [`add_two_numbers`]
//!
//! Each scenario prints its inputs, lets the helper log through `tracing`
//! between two dashed rules, then prints the outcome.

use crate::add::{add_two_numbers, Operand};
use std::io::{self, Write};

const BANNER_WIDTH: usize = 60;
const LOG_RULE_WIDTH: usize = 40;

/// One demo call
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub description: &'static str,
    pub num1: Operand,
    pub num2: Operand,
    pub correlation_id: Option<&'static str>,
}

impl Scenario {
    pub fn new(
        description: &'static str,
        num1: impl Into<Operand>,
        num2: impl Into<Operand>,
    ) -> Self {
        Self {
            description,
            num1: num1.into(),
            num2: num2.into(),
            correlation_id: None,
        }
    }

    pub fn with_correlation_id(mut self, id: &'static str) -> Self {
        self.correlation_id = Some(id);
        self
    }
}

/// Totals for a demo run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DemoSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// The built-in scenario list
pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new("Normal successful addition", 5, 10),
        Scenario::new("Basic invalid input - non-numeric string", "hello", 5),
        Scenario::new("None as first input", Operand::Missing, 5),
        Scenario::new("None as second input", 5, Operand::Missing),
        Scenario::new("Both inputs None", Operand::Missing, Operand::Missing),
        Scenario::new("Empty string as first input", "", 5),
        Scenario::new("Empty string as second input", 5, ""),
        Scenario::new("Whitespace-only first input", "   ", 5),
        Scenario::new("Tab and newline input", "\t\n", 5),
        Scenario::new("Float string inputs", "3.14", "2.71"),
        Scenario::new("Scientific notation", "1e5", "2e3"),
        Scenario::new("Unicode full-width digits", "５", "３"),
        Scenario::new("Hexadecimal strings", "0xFF", "0x10"),
        Scenario::new("Very large numbers", "9".repeat(50), "1".repeat(50)),
        Scenario::new("Custom correlation ID with error", "invalid", 5)
            .with_correlation_id("custom-test-id-123"),
        Scenario::new("Empty correlation ID", "invalid", 5).with_correlation_id(""),
        Scenario::new(
            "Potential log injection",
            "5\nFAKE ERROR: correlation_ID:hacker-id Something bad",
            5,
        ),
        Scenario::new("One valid, one invalid", 10, "not_a_number"),
    ]
}

/// Run one scenario, writing its report to `out`
pub fn run_scenario<W: Write + ?Sized>(scenario: &Scenario, out: &mut W) -> io::Result<bool> {
    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(BANNER_WIDTH))?;
    writeln!(out, "SCENARIO: {}", scenario.description)?;
    writeln!(out, "{}", "=".repeat(BANNER_WIDTH))?;
    writeln!(
        out,
        "Input: add_two_numbers({}, {})",
        scenario.num1, scenario.num2
    )?;
    if let Some(id) = scenario.correlation_id {
        writeln!(out, "Correlation ID: '{}'", id.escape_debug())?;
    }
    writeln!(out, "Log Output:")?;
    writeln!(out, "{}", "-".repeat(LOG_RULE_WIDTH))?;
    // The helper logs through its own sink; emit the header first.
    out.flush()?;

    let result = add_two_numbers(
        scenario.num1.clone(),
        scenario.num2.clone(),
        scenario.correlation_id,
    );

    writeln!(out, "{}", "-".repeat(LOG_RULE_WIDTH))?;
    let succeeded = match result {
        Ok(sum) => {
            writeln!(out, "Return Value: {}", sum)?;
            true
        }
        Err(e) => {
            writeln!(out, "Failure: {}", e)?;
            false
        }
    };
    writeln!(out, "{}", "=".repeat(BANNER_WIDTH))?;
    Ok(succeeded)
}

/// Run every scenario in order
pub fn run_demo<W: Write + ?Sized>(scenarios: &[Scenario], out: &mut W) -> io::Result<DemoSummary> {
    writeln!(out, "DEMONSTRATION: Application Log Outputs for Edge Cases")?;
    writeln!(out, "{}", "=".repeat(70))?;

    let mut summary = DemoSummary::default();
    for scenario in scenarios {
        if run_scenario(scenario, out)? {
            summary.succeeded += 1;
        } else {
            summary.failed += 1;
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "{} scenario(s): {} succeeded, {} failed",
        scenarios.len(),
        summary.succeeded,
        summary.failed
    )?;
    out.flush()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::LogCapture;

    fn render(scenario: &Scenario) -> (String, bool) {
        let mut out = Vec::new();
        let ok = run_scenario(scenario, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), ok)
    }

    #[test]
    fn test_successful_scenario_output() {
        let (text, ok) = render(&Scenario::new("Normal successful addition", 10, 5));
        assert!(ok);
        assert!(text.contains("SCENARIO: Normal successful addition"));
        assert!(text.contains("Input: add_two_numbers(10, 5)"));
        assert!(text.contains("Return Value: 15"));
        assert!(!text.contains("Failure:"));
    }

    #[test]
    fn test_missing_input_scenario() {
        let (text, ok) = render(&Scenario::new("None as first input", Operand::Missing, 5));
        assert!(!ok);
        assert!(text.contains("Input: add_two_numbers(None, 5)"));
        assert!(text.contains("Failure: num1: no value provided"));
    }

    #[test]
    fn test_invalid_string_scenario() {
        let (text, ok) = render(&Scenario::new("Non-numeric string input", "hello", 5));
        assert!(!ok);
        assert!(text.contains("Input: add_two_numbers('hello', 5)"));
        assert!(text.contains("Failure: num1: invalid literal 'hello': not a base-10 number"));
    }

    #[test]
    fn test_correlation_id_is_shown() {
        let scenario = Scenario::new("Custom correlation ID with error", "invalid", 5)
            .with_correlation_id("custom-test-id-123");
        let logs = LogCapture::new();
        let (text, _) = logs.capture(|| render(&scenario));
        assert!(text.contains("Correlation ID: 'custom-test-id-123'"));
        assert!(logs
            .contents()
            .contains("correlation_ID:custom-test-id-123 Failed to convert inputs to numbers."));
    }

    #[test]
    fn test_injection_input_is_escaped_in_output() {
        let (text, ok) = render(&Scenario::new(
            "Potential log injection",
            "5\nFAKE ERROR: correlation_ID:hacker-id Something bad",
            5,
        ));
        assert!(!ok);
        assert!(text.contains(
            "Input: add_two_numbers('5\\nFAKE ERROR: correlation_ID:hacker-id Something bad', 5)"
        ));
        assert!(!text.lines().any(|line| line.starts_with("FAKE ERROR")));
    }

    #[test]
    fn test_full_demo_summary() {
        let mut out = Vec::new();
        let summary = run_demo(&scenarios(), &mut out).unwrap();
        // normal, floats, scientific, full-width digits and very large numbers succeed
        assert_eq!(summary.succeeded, 5);
        assert_eq!(summary.failed, scenarios().len() - 5);

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("DEMONSTRATION: Application Log Outputs for Edge Cases"));
        assert!(text.contains("Return Value: 102000"));
        assert!(text.contains("Return Value: 8"));
        assert!(text.contains(&format!("Return Value: {}0", "1".repeat(50))));
        assert!(text.contains("18 scenario(s): 5 succeeded, 13 failed"));
    }
}
