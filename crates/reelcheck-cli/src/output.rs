//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use reelcheck_domain::LoadSummary;
use reelcheck_gatekeeper::{Diagnostic, IngestReport, Severity};
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Counters of one ingestion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    /// Dataset name
    pub dataset: &'static str,
    /// Data rows read
    pub rows_read: usize,
    /// Records kept
    pub accepted: usize,
    /// Rows skipped
    pub skipped: usize,
    /// Repairs applied
    pub repaired: usize,
}

impl IngestSummary {
    /// Summarize a report; `accepted` is the size of its record collection.
    pub fn from_report<T>(dataset: &'static str, report: &IngestReport<T>, accepted: usize) -> Self {
        Self {
            dataset,
            rows_read: report.rows_read,
            accepted,
            skipped: report.skipped(),
            repaired: report.repaired(),
        }
    }
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format ingestion summaries.
    pub fn format_ingest(&self, summaries: &[IngestSummary]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(summaries)?),
            OutputFormat::Table => Ok(self.format_ingest_table(summaries)),
            OutputFormat::Quiet => Ok(summaries
                .iter()
                .map(|s| format!("{}\t{}\t{}\t{}", s.rows_read, s.accepted, s.skipped, s.repaired))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_ingest_table(&self, summaries: &[IngestSummary]) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Dataset", "Rows", "Accepted", "Skipped", "Repaired"]);

        for summary in summaries {
            builder.push_record([
                summary.dataset.to_string(),
                summary.rows_read.to_string(),
                summary.accepted.to_string(),
                summary.skipped.to_string(),
                summary.repaired.to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format per-row diagnostics.
    pub fn format_diagnostics(&self, diagnostics: &[Diagnostic]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let entries: Vec<serde_json::Value> = diagnostics
                    .iter()
                    .map(|d| {
                        serde_json::json!({
                            "row": d.row,
                            "severity": severity_name(d.severity),
                            "rule": d.rule,
                            "message": d.message,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&entries)?)
            }
            OutputFormat::Quiet => Ok(String::new()),
            OutputFormat::Table => {
                if diagnostics.is_empty() {
                    return Ok(self.colorize("No diagnostics.", "green"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Row", "Severity", "Rule", "Message"]);
                for d in diagnostics {
                    let severity = match d.severity {
                        Severity::Info => self.colorize(severity_name(d.severity), "blue"),
                        Severity::Warning => self.colorize(severity_name(d.severity), "yellow"),
                    };
                    builder.push_record([d.row.to_string(), severity, d.rule.to_string(), d.message.clone()]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
        }
    }

    /// Format the counts written by a load.
    pub fn format_load(&self, summary: &LoadSummary) -> Result<String> {
        let rows = [
            ("movies", summary.movies),
            ("genres", summary.genres),
            ("movie_genre_links", summary.movie_genre_links),
            ("jobs", summary.jobs),
            ("users", summary.users),
            ("ratings", summary.ratings),
            ("ratings_without_movie", summary.ratings_without_movie),
            ("ratings_without_user", summary.ratings_without_user),
        ];

        match self.format {
            OutputFormat::Json => {
                let map: serde_json::Map<String, serde_json::Value> = rows
                    .iter()
                    .map(|(name, count)| (name.to_string(), serde_json::Value::from(*count)))
                    .collect();
                Ok(serde_json::to_string_pretty(&map)?)
            }
            OutputFormat::Quiet => Ok(format!(
                "{}\t{}\t{}",
                summary.movies, summary.users, summary.ratings
            )),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Table", "Rows"]);
                for (name, count) in rows {
                    builder.push_record([name.to_string(), count.to_string()]);
                }
                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
        }
    }

    /// Whether plain status lines should be printed.
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn severity_name(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "info",
        Severity::Warning => "warning",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> IngestSummary {
        IngestSummary {
            dataset: "movies",
            rows_read: 10,
            accepted: 7,
            skipped: 3,
            repaired: 2,
        }
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_ingest(&[summary()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["dataset"], "movies");
        assert_eq!(value[0]["skipped"], 3);
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_ingest(&[summary()]).unwrap();
        assert_eq!(output, "10\t7\t3\t2");
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_ingest(&[summary()]).unwrap();
        assert!(output.contains("Accepted"));
        assert!(output.contains("movies"));
    }

    #[test]
    fn test_diagnostics_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let diagnostics = vec![Diagnostic {
            row: 4,
            severity: Severity::Warning,
            rule: "missing-year",
            message: "SKIPPED: {MovieID: \"2\"} year of release not found. Line 4".to_string(),
        }];
        let output = formatter.format_diagnostics(&diagnostics).unwrap();
        assert!(output.contains("missing-year"));
        assert!(output.contains("warning"));

        let empty = formatter.format_diagnostics(&[]).unwrap();
        assert!(empty.contains("No diagnostics"));
    }

    #[test]
    fn test_load_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let summary = LoadSummary {
            movies: 3,
            ratings_without_movie: 2,
            ..LoadSummary::default()
        };
        let value: serde_json::Value =
            serde_json::from_str(&formatter.format_load(&summary).unwrap()).unwrap();
        assert_eq!(value["movies"], 3);
        assert_eq!(value["ratings_without_movie"], 2);
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}
