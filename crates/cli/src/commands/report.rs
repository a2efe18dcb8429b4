//! Report commands

use fieldlog_common::time::{hours_to_hhmm, hours_to_label, iso_to_display};
use fieldlog_domain::types::{Report, ReportEntry};
use fieldlog_domain::{FieldLogError, Result};

use crate::cli::ReportCommands;
use crate::context::AppContext;

use super::execute;

/// Route a report subcommand to its handler.
pub async fn handle(ctx: &AppContext, command: ReportCommands) -> Result<()> {
    match command {
        ReportCommands::Generate => execute("report_generate", generate(ctx)).await,
        ReportCommands::List => execute("report_list", list(ctx)).await,
        ReportCommands::Show { month } => execute("report_show", show(ctx, month)).await,
        ReportCommands::Delete { month } => execute("report_delete", delete(ctx, month)).await,
    }
}

async fn generate(ctx: &AppContext) -> Result<()> {
    let report = ctx.reports.generate_and_save_current_month().await?;
    println!(
        "Report {} rebuilt: {} entr{}, {}.",
        report.month,
        report.entries.len(),
        if report.entries.len() == 1 { "y" } else { "ies" },
        hours_to_label(report.total_hours),
    );
    Ok(())
}

async fn list(ctx: &AppContext) -> Result<()> {
    let reports = ctx.reports.list().await?;
    if reports.is_empty() {
        println!("No reports generated.");
        return Ok(());
    }

    for report in &reports {
        println!(
            "{}  {:<20}  {}  {:>3} entries{}",
            report.month,
            report.period_label,
            hours_to_hhmm(report.total_hours),
            report.entries.len(),
            if report.is_closed { "  closed" } else { "" },
        );
    }
    Ok(())
}

async fn show(ctx: &AppContext, month: String) -> Result<()> {
    let report = ctx
        .reports
        .find_by_month(&month)
        .await?
        .ok_or_else(|| FieldLogError::NotFound(format!("report not found: {month}")))?;
    print_report(&report);
    Ok(())
}

async fn delete(ctx: &AppContext, month: String) -> Result<()> {
    ctx.reports.delete(&month).await?;
    println!("Deleted report {month}.");
    Ok(())
}

fn print_report(report: &Report) {
    println!("{} ({})", report.period_label, report.month);
    println!(
        "Total: {}   Entries: {}{}",
        hours_to_label(report.total_hours),
        report.entries.len(),
        if report.is_closed { "   closed" } else { "" },
    );
    for entry in &report.entries {
        println!(
            "  {}  {}  {}",
            iso_to_display(&entry.date).unwrap_or_else(|| entry.date.clone()),
            hours_to_hhmm(entry.hours),
            entry_label(entry),
        );
    }
}

fn entry_label(entry: &ReportEntry) -> &'static str {
    if entry.study {
        "Estudo"
    } else if entry.revisit {
        "Revisita"
    } else {
        ""
    }
}
