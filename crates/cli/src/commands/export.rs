//! Export command
//!
//! Resolves the stored report and the profile, builds the deterministic
//! form document and hands it to the renderer. The participant name falls
//! back from `--name` to the profile's full name to the placeholder.

use fieldlog_core::{build_document, ExportOptions};
use fieldlog_domain::{FieldLogError, Result};

use crate::cli::ExportArgs;
use crate::context::AppContext;

use super::execute;

/// Handle the `export` command.
pub async fn handle(ctx: &AppContext, args: ExportArgs) -> Result<()> {
    execute("export_report", run(ctx, args)).await
}

async fn run(ctx: &AppContext, args: ExportArgs) -> Result<()> {
    let report = ctx
        .reports
        .find_by_month(&args.month)
        .await?
        .ok_or_else(|| FieldLogError::NotFound(format!("report not found: {}", args.month)))?;

    let profile = ctx.profiles.find_by_id(&ctx.config.user.id).await?;
    let options = ExportOptions {
        participant_name: args.name,
        author: profile.and_then(|profile| profile.full_name),
        include_hours: !args.no_hours,
        observations: args.notes,
    };

    let document = build_document(&report, &options);
    let path = ctx.exporter.export(&document).await?;
    println!("Wrote {}.", path.display());
    Ok(())
}
