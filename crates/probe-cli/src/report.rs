//! Final summary block printed after a run.

use probe_core::RunReport;

const RULE_WIDTH: usize = 60;

/// Print the summary block: counts, success rate, and every failing step
/// with its recorded message and diagnostic details.
pub fn print_summary(report: &RunReport) {
    let summary = &report.summary;
    let rule = "=".repeat(RULE_WIDTH);

    println!("\n{rule}");
    println!("TEST SUMMARY");
    println!("{rule}");
    println!("Total Tests: {}", summary.total);
    println!("Passed: {}", summary.passed);
    println!("Failed: {}", summary.failed);
    println!("Success Rate: {:.1}%", summary.success_rate());

    if !summary.failures.is_empty() {
        println!("\nFAILED TESTS:");
        for outcome in &summary.failures {
            println!("  - {}: {}", outcome.name, outcome.message);
            if let Some(details) = &outcome.details {
                println!("    Details: {details}");
            }
        }
    }

    println!("\n{rule}");
}
