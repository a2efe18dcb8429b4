//! End-to-end command flows over a real context
//!
//! Each test builds an [`AppContext`] on a temporary directory and drives
//! the command dispatcher the way the binary does, then asserts against
//! the stores underneath.

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use fieldlog_cli::cli::{
    Commands, ExportArgs, NoteAddArgs, NoteCommands, ProfileCommands, ProfileSetArgs,
    ReportCommands,
};
use fieldlog_cli::{commands, AppContext};
use fieldlog_common::time::current_month_key;
use fieldlog_infra::config::AppConfig;

fn test_config(dir: &TempDir) -> AppConfig {
    let mut config = AppConfig::default();
    config.database.path = dir.path().join("fieldlog.db");
    config.export.output_dir = dir.path().join("exports");
    config
}

fn create_context(dir: &TempDir) -> Arc<AppContext> {
    Arc::new(
        AppContext::new_with_config(test_config(dir))
            .expect("context should build on a fresh directory"),
    )
}

/// One-stop note entry: a third visit promotes the study tag, so the note
/// must carry the study details.
fn study_note_args() -> NoteAddArgs {
    NoteAddArgs {
        hours: "02:30".to_string(),
        location: "Rua das Flores, quadra 3".to_string(),
        actions: vec!["7".to_string()],
        study_name: "Maria".to_string(),
        study_house: "12".to_string(),
        study_day: "Quarta".to_string(),
        study_time: "19:00".to_string(),
        ..NoteAddArgs::default()
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn note_report_export_flow_writes_the_form() {
    let dir = TempDir::new().expect("temp dir");
    let ctx = create_context(&dir);

    let profile = Commands::Profile {
        command: ProfileCommands::Set(ProfileSetArgs {
            full_name: Some("João da Silva".to_string()),
            ..ProfileSetArgs::default()
        }),
    };
    commands::dispatch(&ctx, profile).await.expect("profile set should succeed");

    let add = Commands::Note { command: NoteCommands::Add(study_note_args()) };
    commands::dispatch(&ctx, add).await.expect("note add should succeed");

    let generate = Commands::Report { command: ReportCommands::Generate };
    commands::dispatch(&ctx, generate).await.expect("report generate should succeed");

    let month = current_month_key();
    let report = ctx
        .reports
        .find_by_month(&month)
        .await
        .expect("lookup should succeed")
        .expect("the generated report should be stored");
    assert_eq!(report.entries.len(), 1);
    assert!((report.total_hours - 2.5).abs() < 1e-9);
    assert!(report.entries[0].study);

    let export = Commands::Export(ExportArgs {
        month: month.clone(),
        notes: Some("Território 12.".to_string()),
        ..ExportArgs::default()
    });
    commands::dispatch(&ctx, export).await.expect("export should succeed");

    let path = dir.path().join("exports").join(format!("relatorio-{month}.html"));
    let html = std::fs::read_to_string(&path).expect("exported form should exist");
    // Participant name falls back to the stored profile.
    assert!(html.contains("João da Silva"));
    assert!(html.contains("02:30"));
    assert!(html.contains("Estudo"));
    assert!(html.contains("Território 12."));
    assert!(html.contains(&report.period_label));
}

#[tokio::test(flavor = "multi_thread")]
async fn note_validation_failures_do_not_persist() {
    let dir = TempDir::new().expect("temp dir");
    let ctx = create_context(&dir);

    // A first revisit tag opens the revisit section, whose fields are
    // missing here.
    let add = Commands::Note {
        command: NoteCommands::Add(NoteAddArgs {
            hours: "01:00".to_string(),
            actions: vec!["5".to_string()],
            ..NoteAddArgs::default()
        }),
    };
    let err = commands::dispatch(&ctx, add).await.expect_err("draft should be rejected");
    assert!(err.to_string().contains("Informe o nome do morador."));

    let notes = ctx.notes.list().await.expect("list should succeed");
    assert!(notes.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn stopwatch_session_survives_a_context_restart() {
    let dir = TempDir::new().expect("temp dir");

    {
        let ctx = create_context(&dir);
        let status = ctx.stopwatch.start().expect("start should succeed");
        assert!(status.running);
    }

    tokio::time::sleep(Duration::from_millis(50)).await;

    // A fresh context hydrates from the snapshot next to the database and
    // catches up with the wall time spent away.
    let ctx = create_context(&dir);
    let status = ctx.stopwatch.status();
    assert!(status.running, "restored session should still be running");
    assert!(status.elapsed_ms > 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn profile_set_merges_with_the_stored_row() {
    let dir = TempDir::new().expect("temp dir");
    let ctx = create_context(&dir);

    let first = Commands::Profile {
        command: ProfileCommands::Set(ProfileSetArgs {
            full_name: Some("João da Silva".to_string()),
            congregation: Some("Congregação Central".to_string()),
            ..ProfileSetArgs::default()
        }),
    };
    commands::dispatch(&ctx, first).await.expect("first set should succeed");

    let second = Commands::Profile {
        command: ProfileCommands::Set(ProfileSetArgs {
            city: Some("Curitiba".to_string()),
            ..ProfileSetArgs::default()
        }),
    };
    commands::dispatch(&ctx, second).await.expect("second set should succeed");

    let profile = ctx
        .profiles
        .find_by_id(&ctx.config.user.id)
        .await
        .expect("lookup should succeed")
        .expect("profile should exist");
    assert_eq!(profile.full_name.as_deref(), Some("João da Silva"));
    assert_eq!(profile.congregation.as_deref(), Some("Congregação Central"));
    assert_eq!(profile.city.as_deref(), Some("Curitiba"));
}

#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_missing_report_surfaces_not_found() {
    let dir = TempDir::new().expect("temp dir");
    let ctx = create_context(&dir);

    let delete =
        Commands::Report { command: ReportCommands::Delete { month: "1999-01".to_string() } };
    let err = commands::dispatch(&ctx, delete).await.expect_err("delete should fail");
    assert!(matches!(err, fieldlog_domain::FieldLogError::NotFound(_)));
}
