//! Note commands
//!
//! `note add` maps the entry form onto flags. Action tags are picked by
//! catalog number or exact text, and run through [`ActionSelection`] so the
//! study auto-promotion behaves exactly as it does in the form.

use fieldlog_common::time::{hours_to_hhmm, iso_to_display, today_iso};
use fieldlog_core::{classify, ActionSelection, NoteDraft, RevisitDraft, StudyDraft};
use fieldlog_domain::constants::ALL_ACTIONS;
use fieldlog_domain::types::{Note, NoteCategory};
use fieldlog_domain::{FieldLogError, Result};

use crate::cli::{NoteAddArgs, NoteCommands};
use crate::context::AppContext;

use super::execute;

/// Route a note subcommand to its handler.
pub async fn handle(ctx: &AppContext, command: NoteCommands) -> Result<()> {
    match command {
        NoteCommands::Add(args) => execute("note_add", add(ctx, args)).await,
        NoteCommands::List { month } => execute("note_list", list(ctx, month)).await,
        NoteCommands::Delete { id } => execute("note_delete", delete(ctx, id)).await,
        NoteCommands::Clear => execute("note_clear", clear(ctx)).await,
    }
}

async fn add(ctx: &AppContext, args: NoteAddArgs) -> Result<()> {
    let draft = build_draft(args)?;
    let note = ctx.notes.create(&draft).await?;
    println!(
        "Recorded {} on {} (note {}).",
        hours_to_hhmm(note.hours),
        iso_to_display(&note.date).unwrap_or_else(|| note.date.clone()),
        note.id
    );
    Ok(())
}

async fn list(ctx: &AppContext, month: Option<String>) -> Result<()> {
    let notes = match month.as_deref() {
        Some(month) => ctx.notes.list_for_month(month).await?,
        None => ctx.notes.list().await?,
    };
    if notes.is_empty() {
        println!("No notes recorded.");
        return Ok(());
    }

    for note in &notes {
        println!(
            "{}  {}  {}  {:<8}  {}",
            note.id,
            iso_to_display(&note.date).unwrap_or_else(|| note.date.clone()),
            hours_to_hhmm(note.hours),
            category_label(note),
            note.location_notes.as_deref().unwrap_or(""),
        );
    }
    println!("{} note(s).", notes.len());
    Ok(())
}

async fn delete(ctx: &AppContext, id: String) -> Result<()> {
    ctx.notes.delete(&id).await?;
    println!("Deleted note {id}.");
    Ok(())
}

async fn clear(ctx: &AppContext) -> Result<()> {
    let removed = ctx.notes.clear().await?;
    println!("Deleted {removed} note(s).");
    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Assemble the draft the validation layer expects from the parsed flags.
///
/// Tags go through the selection so a third visit promotes the study tag,
/// and a first/second revisit tag enables the revisit section just as
/// picking it in the form would.
fn build_draft(args: NoteAddArgs) -> Result<NoteDraft> {
    let mut selection = ActionSelection::new();
    for raw in &args.actions {
        let tag = resolve_action(raw)?;
        if !selection.contains(&tag) {
            selection.toggle(&tag);
        }
    }
    let revisit_enabled = args.revisit || selection.revisit_triggered();

    Ok(NoteDraft {
        date_iso: args.date.unwrap_or_else(today_iso),
        hours_hhmm: args.hours,
        location_notes: args.location,
        actions: selection.into_tags(),
        revisit: RevisitDraft {
            enabled: revisit_enabled,
            name: args.revisit_name,
            house_number: args.revisit_house,
            visit_date: args.revisit_date,
            visit_time: args.revisit_time,
            phone: args.revisit_phone,
            address: args.revisit_address,
        },
        study: StudyDraft {
            enabled: args.study,
            name: args.study_name,
            house_number: args.study_house,
            study_day: args.study_day,
            study_time: args.study_time,
            phone: args.study_phone,
            address: args.study_address,
            material: args.study_material,
        },
    })
}

/// Resolve one `--action` value to its catalog tag.
///
/// Accepts the 1-based catalog number or the exact tag text. Anything else
/// fails with the numbered catalog in the message.
fn resolve_action(raw: &str) -> Result<String> {
    let value = raw.trim();
    if let Ok(index) = value.parse::<usize>() {
        if (1..=ALL_ACTIONS.len()).contains(&index) {
            return Ok(ALL_ACTIONS[index - 1].to_string());
        }
    } else if let Some(tag) = ALL_ACTIONS.iter().find(|tag| **tag == value) {
        return Ok((*tag).to_string());
    }

    let catalog: String = ALL_ACTIONS
        .iter()
        .enumerate()
        .map(|(i, tag)| format!("  {:>2}: {tag}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");
    Err(FieldLogError::InvalidInput(format!(
        "unknown action tag {raw:?}; use a catalog number or the exact text:\n{catalog}"
    )))
}

fn category_label(note: &Note) -> &'static str {
    match classify(note) {
        NoteCategory::Study => "Estudo",
        NoteCategory::Revisit => "Revisita",
        NoteCategory::Other => "-",
    }
}
