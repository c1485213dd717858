//! Text tables for the terminal.
//!
//! Values are printed exactly as the report holds them; nothing is recomputed
//! here beyond number formatting.

use std::io::{self, Write};

use burndown_core::{Date, ReportConfig};
use burndown_progress::BurndownReport;

const SUMMARY_WIDTH: usize = 40;

/// Work table: one row per item, newest week first.
pub fn write_work_table(w: &mut dyn Write, report: &BurndownReport, config: &ReportConfig) -> io::Result<()> {
    let weeks: Vec<(usize, Date)> = report.checkpoints().iter().copied().enumerate().rev().collect();

    let mut headers: Vec<String> = ["Issue Key", "Summary", "Type", "Status", "Assignee", "Size"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    headers.extend(weeks.iter().map(|(_, date)| format!("% {}", date.format("%m-%d"))));
    headers.push("Link".to_string());

    let rows = report
        .matrix
        .rows()
        .iter()
        .map(|row| {
            let mut cells = vec![
                row.key.to_string(),
                truncate(&row.summary, SUMMARY_WIDTH),
                row.issue_type.clone(),
                row.status.clone(),
                row.assignee.clone(),
                number(row.size),
            ];
            cells.extend(weeks.iter().map(|(week, _)| {
                row.completion.get(*week).copied().map(percent).unwrap_or_default()
            }));
            cells.push(config.ticket_url(row.key.as_str()));
            cells
        })
        .collect::<Vec<_>>();

    writeln!(w, "Work")?;
    write_table(w, &headers, &rows)
}

/// Projection table: one row per week, oldest first.
pub fn write_projection_table(w: &mut dyn Write, report: &BurndownReport) -> io::Result<()> {
    let headers: Vec<String> = vec![
        "Date".to_string(),
        "Completed".to_string(),
        "Remaining".to_string(),
        "Velocity".to_string(),
        format!("Avg ({}w)", report.window),
        format!("StdDev ({}w)", report.window),
        "Fast (p68)".to_string(),
        "Mean".to_string(),
        "Slow (p68)".to_string(),
        "V. Fast (p68)".to_string(),
        "V. Slow (p68)".to_string(),
    ];

    let rows = report
        .rows
        .iter()
        .map(|row| {
            vec![
                row.date.to_string(),
                number(row.completed_value),
                number(row.remaining_value),
                optional_number(row.velocity),
                optional_number(row.moving_avg_velocity),
                optional_number(row.std_dev_velocity),
                optional_date(row.fast_date),
                optional_date(row.mean_date),
                optional_date(row.slow_date),
                optional_number(row.fast_velocity),
                optional_number(row.slow_velocity),
            ]
        })
        .collect::<Vec<_>>();

    writeln!(w, "\nProjections")?;
    write_table(w, &headers, &rows)
}

fn write_table(w: &mut dyn Write, headers: &[String], rows: &[Vec<String>]) -> io::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_line(w, headers, &widths)?;
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    write_line(w, &rule, &widths)?;
    for row in rows {
        write_line(w, row, &widths)?;
    }
    Ok(())
}

fn write_line(w: &mut dyn Write, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(w, "{}", line.trim_end())
}

fn number(value: f64) -> String {
    format!("{:.1}", value)
}

/// Whole percent; blank when nothing is complete.
fn percent(fraction: f64) -> String {
    if fraction > 0.0 {
        format!("{:.0}%", fraction * 100.0)
    } else {
        String::new()
    }
}

fn optional_number(value: Option<f64>) -> String {
    value.map(number).unwrap_or_default()
}

fn optional_date(value: Option<Date>) -> String {
    value.map(|date| date.to_string()).unwrap_or_default()
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max.saturating_sub(3)).collect();
    short.push_str("...");
    short
}

#[cfg(test)]
mod tests {
    use super::*;
    use burndown_core::{RawChangeEvent, TrackerConfig, WorkItem};
    use burndown_progress::{HistoryReconstructor, ProjectionEngine, ReportBuilder};

    const PERCENT: &str = "customfield_10200";

    fn config() -> ReportConfig {
        ReportConfig {
            output_file: "out.json".to_string(),
            start_date: "2024-01-01".to_string(),
            jql: "project = PROJ".to_string(),
            moving_avg_weeks: 3,
            tracker: TrackerConfig {
                url: "https://example.atlassian.net".to_string(),
                username: "u".to_string(),
                api_token: "t".to_string(),
                size_field: "customfield_10016".to_string(),
                percent_complete_field: PERCENT.to_string(),
                percent_complete_scale: 100.0,
                done_statuses: vec!["Done".to_string()],
            },
        }
    }

    fn report() -> BurndownReport {
        let mut item = WorkItem::new("PROJ-1", 100.0)
            .with_change(RawChangeEvent::new(PERCENT, "", "10", "2024-01-05T10:00:00.000+0000"))
            .with_change(RawChangeEvent::new(PERCENT, "", "25", "2024-01-12T10:00:00.000+0000"))
            .with_change(RawChangeEvent::new(PERCENT, "", "40", "2024-01-19T10:00:00.000+0000"));
        item.summary = "A summary that is definitely longer than forty characters".to_string();

        ReportBuilder::new(
            HistoryReconstructor::new(PERCENT, ["Done"]),
            ProjectionEngine::new(3).unwrap(),
            Date::from_ymd_opt(2024, 1, 1).unwrap(),
        )
        .build(&[item], Date::from_ymd_opt(2024, 1, 22).unwrap())
        .unwrap()
    }

    #[test]
    fn test_work_table_newest_week_first() {
        let mut out = Vec::new();
        write_work_table(&mut out, &report(), &config()).unwrap();
        let text = String::from_utf8(out).unwrap();

        let header = text.lines().nth(1).unwrap();
        let newest = header.find("% 01-22").unwrap();
        let oldest = header.find("% 01-01").unwrap();
        assert!(newest < oldest);
        assert!(text.contains("40%"));
        assert!(text.contains("https://example.atlassian.net/browse/PROJ-1"));
        assert!(text.contains("A summary that is definitely longer t..."));
    }

    #[test]
    fn test_projection_table_values_and_blanks() {
        let mut out = Vec::new();
        write_projection_table(&mut out, &report()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Avg (3w)"));
        let first = text.lines().find(|l| l.starts_with("2024-01-01")).unwrap();
        assert_eq!(first.split_whitespace().count(), 3);
        let last = text.lines().find(|l| l.starts_with("2024-01-22")).unwrap();
        assert!(last.contains("60.0"));
        assert!(last.contains("2024-02-22"));
    }

    #[test]
    fn test_percent_blank_when_zero() {
        assert_eq!(percent(0.0), "");
        assert_eq!(percent(0.26), "26%");
        assert_eq!(percent(1.0), "100%");
    }
}
