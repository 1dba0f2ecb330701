//! Output rendering for CLI commands
//!
//! Every command result renders in three formats:
//! - pretty: human-readable report
//! - json: pretty-printed JSON of the underlying record
//! - minimal: one terse line per item, for scripts

use chrono::Local;
use serde::Serialize;

use scorecard_core::{
    BreachReport, Recommendation, ScanRecord, SecurityTodo, format_compact_count,
};
use scorecard_decision::Assessment;
use scorecard_decision::analysis::{PasswordAnalysis, TwoFaCoverage};
use scorecard_runtime::ScanReport;

use crate::cli::{CliError, OutputFormat};

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(|e| CliError::OutputError(e.to_string()))
}

fn checkbox(completed: bool) -> &'static str {
    if completed { "[x]" } else { "[ ]" }
}

fn recommendation_lines(recommendations: &[Recommendation], lines: &mut Vec<String>) {
    lines.push("Recommendations:".to_string());
    for rec in recommendations {
        match rec.priority {
            Some(priority) => lines.push(format!("  - [{}] {}", priority, rec.title)),
            None => lines.push(format!("  - {}", rec.title)),
        }
        lines.push(format!("      {}", rec.description));
    }
}

fn todo_line(todo: &SecurityTodo) -> String {
    format!(
        "{} {} {:<6} {:<8} {}",
        todo.id,
        checkbox(todo.completed),
        todo.priority,
        todo.category,
        todo.title
    )
}

pub(crate) fn render_scan_report(
    report: &ScanReport,
    format: OutputFormat,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Minimal => Ok(format!(
            "{} {} {}",
            report.scan.id,
            report.scan.score.value,
            report.scan.score.label
        )),
        OutputFormat::Pretty => {
            let mut lines = scan_lines(&report.scan);
            lines.push(String::new());
            lines.push(format!("Tasks added ({}):", report.todos.len()));
            lines.extend(report.todos.iter().map(|t| format!("  {}", todo_line(t))));
            Ok(lines.join("\n"))
        }
    }
}

pub(crate) fn render_assessment(
    assessment: &Assessment,
    format: OutputFormat,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => to_json(assessment),
        OutputFormat::Minimal => Ok(format!(
            "{} {}",
            assessment.score.value, assessment.score.label
        )),
        OutputFormat::Pretty => {
            let signals = &assessment.signals;
            let mut lines = vec![
                format!("Security Score: {}", assessment.score),
                format!(
                    "Signals: password {} | breaches {} | 2FA {}",
                    signals.password_score,
                    signals.breach_count,
                    if signals.two_fa_enabled { "on" } else { "off" }
                ),
                String::new(),
            ];
            recommendation_lines(&assessment.recommendations, &mut lines);
            lines.push(String::new());
            lines.push("Tasks:".to_string());
            for task in &assessment.tasks {
                lines.push(format!(
                    "  {}. [{}] {} ({})",
                    task.id, task.priority, task.title, task.category
                ));
            }
            Ok(lines.join("\n"))
        }
    }
}

fn scan_lines(scan: &ScanRecord) -> Vec<String> {
    let mut lines = vec![
        format!("Scan {}", scan.id),
        format!(
            "  User: {}  Date: {}",
            scan.user,
            scan.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        ),
        format!("  Security Score: {}", scan.score),
        format!(
            "  Signals: password {} | breaches {} | 2FA {}",
            scan.signals.password_score,
            scan.signals.breach_count,
            if scan.signals.two_fa_enabled { "on" } else { "off" }
        ),
        String::new(),
    ];
    recommendation_lines(&scan.recommendations, &mut lines);
    lines
}

pub(crate) fn render_scan(scan: Option<&ScanRecord>, format: OutputFormat) -> Result<String, CliError> {
    match (scan, format) {
        (None, OutputFormat::Json) => Ok("null".to_string()),
        (None, _) => Ok("No scans yet. Run `scorecard scan` first.".to_string()),
        (Some(scan), OutputFormat::Json) => to_json(scan),
        (Some(scan), OutputFormat::Minimal) => Ok(format!(
            "{} {} {}",
            scan.id, scan.score.value, scan.score.label
        )),
        (Some(scan), OutputFormat::Pretty) => Ok(scan_lines(scan).join("\n")),
    }
}

pub(crate) fn render_history(scans: &[ScanRecord], format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => to_json(scans),
        OutputFormat::Minimal => Ok(scans
            .iter()
            .map(|s| format!("{} {} {}", s.id, s.score.value, s.score.label))
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Pretty => {
            if scans.is_empty() {
                return Ok("No scans yet. Run `scorecard scan` first.".to_string());
            }
            let mut lines = vec![format!("Scan history ({}):", scans.len())];
            for scan in scans {
                lines.push(format!(
                    "  {}  {:>3}/100  {:<9}  {}",
                    scan.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                    scan.score.value,
                    scan.score.label,
                    scan.id
                ));
            }
            Ok(lines.join("\n"))
        }
    }
}

pub(crate) fn render_todos(todos: &[SecurityTodo], format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => to_json(todos),
        OutputFormat::Minimal => Ok(todos.iter().map(todo_line).collect::<Vec<_>>().join("\n")),
        OutputFormat::Pretty => {
            if todos.is_empty() {
                return Ok("No security tasks.".to_string());
            }
            let open = todos.iter().filter(|t| !t.completed).count();
            let mut lines = vec![format!("Security tasks ({} open, {} total):", open, todos.len())];
            for todo in todos {
                lines.push(format!("  {}", todo_line(todo)));
                if !todo.description.is_empty() {
                    lines.push(format!("      {}", todo.description));
                }
            }
            Ok(lines.join("\n"))
        }
    }
}

pub(crate) fn render_todo(todo: &SecurityTodo, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => to_json(todo),
        OutputFormat::Minimal | OutputFormat::Pretty => Ok(todo_line(todo)),
    }
}

pub(crate) fn render_breach_report(
    report: &BreachReport,
    format: OutputFormat,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Minimal => Ok(format!("{} {}", report.email, report.breach_count)),
        OutputFormat::Pretty => {
            let mut lines = vec![format!(
                "Breach check for {}: {} breach(es) found",
                report.email, report.breach_count
            )];
            for breach in &report.breaches {
                lines.push(format!(
                    "  - {} ({}) {} accounts, severity {}",
                    breach.name,
                    breach.date,
                    format_compact_count(breach.compromised_accounts),
                    breach.severity
                ));
                lines.push(format!("      Exposed: {}", breach.data_types.join(", ")));
            }
            lines.push(String::new());
            for advisory in &report.advisories {
                lines.push(format!("  * {}: {}", advisory.title, advisory.description));
            }
            Ok(lines.join("\n"))
        }
    }
}

pub(crate) fn render_password_analysis(
    analysis: &PasswordAnalysis,
    format: OutputFormat,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => to_json(analysis),
        OutputFormat::Minimal => Ok(format!("{} {:?}", analysis.score, analysis.strength)),
        OutputFormat::Pretty => {
            let d = analysis.distribution;
            let mut lines = vec![
                format!(
                    "Password strength: {:?} ({}/100)",
                    analysis.strength, analysis.score
                ),
                format!(
                    "  Strong {}% | Needs improvement {}% | At risk {}%",
                    d.strong, d.needs_improvement, d.at_risk
                ),
            ];
            if analysis.issues.is_empty() {
                lines.push("  No issues found".to_string());
            }
            for issue in &analysis.issues {
                lines.push(format!(
                    "  - {:?}: {}: {}",
                    issue.severity, issue.title, issue.description
                ));
            }
            Ok(lines.join("\n"))
        }
    }
}

pub(crate) fn render_two_fa(
    coverage: &TwoFaCoverage,
    format: OutputFormat,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => to_json(coverage),
        OutputFormat::Minimal => Ok(format!(
            "{:?} {}%",
            coverage.status, coverage.coverage_percent
        )),
        OutputFormat::Pretty => {
            let mut lines = vec![format!(
                "2FA coverage: {}/{} services ({}%)",
                coverage.enabled_services, coverage.total_services, coverage.coverage_percent
            )];
            if coverage.services_to_secure.is_empty() {
                lines.push("  Two-factor authentication is enabled".to_string());
            } else {
                lines.push("  Secure these accounts next:".to_string());
                for service in &coverage.services_to_secure {
                    lines.push(format!(
                        "  - [{}] {} ({}) {}",
                        service.priority, service.name, service.category, service.setup_url
                    ));
                }
            }
            Ok(lines.join("\n"))
        }
    }
}
