//! CLI presentation: text and json formatters for run summaries, plans and
//! the generator list.

use crate::engine::{ReportPlan, RunSummary};
use crate::error::ReportError;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;

pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ReportError> {
    serde_json::to_string_pretty(value).map_err(|e| ReportError::Output(e.to_string()))
}

pub fn format_run_summary(summary: &RunSummary, format: &str) -> Result<String, ReportError> {
    if format == "json" {
        return to_json(summary);
    }

    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Report run")));
    out.push_str(&format!(
        "  Reports completed: {}\n  Reports skipped: {}\n  Generators run: {}\n  Generators skipped: {}\n",
        summary.completed_reports.len(),
        summary.skipped_reports.len(),
        summary.executed.len(),
        summary.skipped_generators.len()
    ));

    if !summary.executed.is_empty() {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["#", "Report", "Generator"]);
        for (i, row) in summary.executed.iter().enumerate() {
            table.add_row(vec![
                (i + 1).to_string(),
                row.report.clone(),
                row.generator.clone(),
            ]);
        }
        out.push_str(&format!("\n{}\n", table));
    }

    if !summary.skipped_reports.is_empty() {
        out.push_str(&format!("\n{}\n", format_section_heading("Skipped reports")));
        for skipped in &summary.skipped_reports {
            out.push_str(&format!("  - {}: {}\n", skipped.report, skipped.reason));
        }
    }

    if !summary.skipped_generators.is_empty() {
        out.push_str(&format!(
            "\n{}\n",
            format_section_heading("Skipped generators")
        ));
        for skipped in &summary.skipped_generators {
            out.push_str(&format!(
                "  - {} / {}: {}\n",
                skipped.report, skipped.generator, skipped.reason
            ));
        }
    }

    Ok(out)
}

pub fn format_plan(plans: &[ReportPlan], format: &str) -> Result<String, ReportError> {
    if format == "json" {
        return to_json(plans);
    }

    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Report plan")));
    if plans.is_empty() {
        out.push_str("No reports configured.\n");
        return Ok(out);
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Report", "Skin", "Singletons", "Generators", "Status"]);
    for plan in plans {
        match plan {
            ReportPlan::Ready {
                report,
                skin,
                singletons,
                generators,
                unknown,
                ..
            } => {
                let status = if unknown.is_empty() {
                    "ready".to_string()
                } else {
                    format!("unknown: {}", unknown.join(", "))
                };
                table.add_row(vec![
                    report.clone(),
                    skin.clone(),
                    singletons.join(", "),
                    generators.join(", "),
                    status,
                ]);
            }
            ReportPlan::Skipped { report, reason } => {
                table.add_row(vec![
                    report.clone(),
                    "-".to_string(),
                    "-".to_string(),
                    "-".to_string(),
                    format!("skipped: {}", reason),
                ]);
            }
        }
    }
    out.push_str(&format!("{}\n", table));
    Ok(out)
}

pub fn format_generator_list(names: &[&str], format: &str) -> Result<String, ReportError> {
    if format == "json" {
        return to_json(&serde_json::json!({ "generators": names }));
    }
    if names.is_empty() {
        return Ok("No generators registered.".to_string());
    }
    let mut lines: Vec<String> = names.iter().map(|name| format!("  {}", name)).collect();
    lines.insert(0, "Registered generators:".to_string());
    Ok(lines.join("\n"))
}
