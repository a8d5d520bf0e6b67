//! Plain-text rendering of cases, metrics and chart series.

use caseboard_core::{Case, ChartDataPoint, DashboardMetrics};
use caseboard_report::DashboardReport;

const BAR_WIDTH: usize = 40;
const TITLE_WIDTH: usize = 40;
const TIMESTAMP_FORMAT: &str = "%b %-d, %Y, %-I:%M %p";

// ── Reports ──

/// Print the whole dashboard: headline metrics then each chart.
pub fn print_report(report: &DashboardReport) {
    print_metrics(&report.metrics);
    print_series("Compliance Trend (by quarter)", &report.compliance_trend, "score");
    print_series("Risk Distribution", &report.risk_distribution, "value");
    print_series(
        "Case Resolution Time (days, by month closed)",
        &report.case_resolution,
        "days",
    );
}

pub fn print_metrics(metrics: &DashboardMetrics) {
    println!("Dashboard");
    println!("  {:<26} {}", "documents processed", metrics.documents_processed);
    println!("  {:<26} {}", "risks flagged", metrics.risks_flagged);
    println!(
        "  {:<26} {}",
        "avg resolution (days)", metrics.avg_case_resolution_days
    );
    println!();
}

/// Print one series as a horizontal bar chart of `field`.
pub fn print_series(header: &str, points: &[ChartDataPoint], field: &str) {
    println!("{header}");
    if points.is_empty() {
        println!("  (no data)");
        println!();
        return;
    }

    let max = points.iter().filter_map(|p| p.get(field)).max().unwrap_or(0);
    for point in points {
        let value = point.get(field).unwrap_or(0);
        println!(
            "  {:<10} {:>5}  {}",
            point.name,
            value,
            bar(value, max, BAR_WIDTH)
        );
    }
    println!();
}

// ── Cases ──

pub fn print_case_table(cases: &[Case]) {
    if cases.is_empty() {
        println!("No cases.");
        return;
    }
    println!(
        "{:<36}  {:<TITLE_WIDTH$}  {:<15}  {:<16}  {}",
        "ID", "TITLE", "STATUS", "ASSIGNED TO", "LAST MODIFIED"
    );
    for case in cases {
        println!(
            "{:<36}  {:<TITLE_WIDTH$}  {:<15}  {:<16}  {}",
            case.id,
            truncate(&case.title, TITLE_WIDTH),
            case.status.label(),
            case.assigned_to,
            case.last_modified.format(TIMESTAMP_FORMAT)
        );
    }
    println!();
    println!("{} case(s)", cases.len());
}

/// Print a single case as a vertical card.
pub fn print_case_card(case: &Case) {
    println!("=== {} ===", case.title);
    println!();
    println!("  {:<16} {}", "id", case.id);
    println!("  {:<16} {}", "status", case.status.label());
    if !case.assigned_to.is_empty() {
        println!("  {:<16} {}", "assigned to", case.assigned_to);
    }
    println!(
        "  {:<16} {}",
        "created",
        case.created_at.format(TIMESTAMP_FORMAT)
    );
    println!(
        "  {:<16} {}",
        "last modified",
        case.last_modified.format(TIMESTAMP_FORMAT)
    );
    println!("  {:<16} {}", "documents", case.documents.len());
    println!("  {:<16} {}", "log entries", case.logs.len());
    if !case.description.is_empty() {
        println!();
        println!("{}", case.description);
    }
}

// ── Helpers ──

/// A bar proportional to `value / max`, at least one cell for non-zero values.
fn bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 || value == 0 {
        return String::new();
    }
    let cells = ((value as u128 * width as u128) / max as u128).max(1) as usize;
    "█".repeat(cells.min(width))
}

/// Shorten to `width` characters, ending in "..." when cut.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_scales_to_max() {
        assert_eq!(bar(100, 100, 10).chars().count(), 10);
        assert_eq!(bar(50, 100, 10).chars().count(), 5);
        assert_eq!(bar(1, 1000, 10).chars().count(), 1);
    }

    #[test]
    fn bar_empty_for_zero() {
        assert!(bar(0, 100, 10).is_empty());
        assert!(bar(5, 0, 10).is_empty());
    }

    #[test]
    fn truncate_long_titles() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly ten", 11), "exactly ten");
        assert_eq!(truncate("a much longer case title", 10), "a much ...");
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("Überprüfung", 11), "Überprüfung");
        assert_eq!(truncate("Überprüfung der Akte", 8), "Überp...");
    }
}
