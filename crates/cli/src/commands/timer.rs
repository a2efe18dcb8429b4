//! Stopwatch commands
//!
//! Every invocation operates on the session restored by the context, so
//! `start` in one process and `status` in the next see the same session
//! through the snapshot file. `watch` is the only long-running command; it
//! drives the background scheduler until Ctrl+C.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use fieldlog_common::time::{hours_to_hhmm, iso_to_display, split_hhmmss};
use fieldlog_core::{NoteDraft, StopwatchState, StopwatchStatus};
use fieldlog_domain::{FieldLogError, Result};
use fieldlog_infra::scheduling::{StopwatchScheduler, StopwatchSchedulerConfig};

use crate::cli::TimerCommands;
use crate::context::AppContext;

use super::execute;

const CAP_NOTICE: &str = "24h ceiling reached; reset to start a new session.";

/// Route a timer subcommand to its handler.
pub async fn handle(ctx: &AppContext, command: TimerCommands) -> Result<()> {
    match command {
        TimerCommands::Status => execute("timer_status", status(ctx)).await,
        TimerCommands::Start => execute("timer_start", start(ctx)).await,
        TimerCommands::Pause => execute("timer_pause", pause(ctx)).await,
        TimerCommands::Reset => execute("timer_reset", reset(ctx)).await,
        TimerCommands::Watch => execute("timer_watch", watch(ctx)).await,
        TimerCommands::Stop { save, discard } => {
            execute("timer_stop", stop(ctx, save, discard)).await
        }
    }
}

async fn status(ctx: &AppContext) -> Result<()> {
    let mut status = ctx.stopwatch.status();
    // The ceiling is usually crossed while no process is running; surface
    // the notice raised during hydration here.
    status.capped_now = status.capped_now || ctx.startup_status.capped_now;
    print_status(&status);
    Ok(())
}

async fn start(ctx: &AppContext) -> Result<()> {
    let status = ctx.stopwatch.start()?;
    print_status(&status);
    Ok(())
}

async fn pause(ctx: &AppContext) -> Result<()> {
    let status = ctx.stopwatch.pause();
    print_status(&status);
    Ok(())
}

async fn reset(ctx: &AppContext) -> Result<()> {
    let status = ctx.stopwatch.reset();
    print_status(&status);
    Ok(())
}

/// Tick the session in the foreground.
///
/// Starts the session if it is not already running, then displays the
/// clock once a second while the scheduler handles ceiling checks and
/// snapshot flushes. Ctrl+C stops the display; the session keeps running
/// and the final flush records the elapsed time for the next invocation.
async fn watch(ctx: &AppContext) -> Result<()> {
    let current = ctx.stopwatch.status();
    if current.state == StopwatchState::Capped {
        print_status(&current);
        return Ok(());
    }
    if !current.running {
        ctx.stopwatch.start()?;
    }

    let config = StopwatchSchedulerConfig::from_millis(
        ctx.config.timer.tick_interval_ms,
        ctx.config.timer.flush_interval_ms,
    );
    let mut scheduler = StopwatchScheduler::new(Arc::clone(&ctx.stopwatch), config);
    scheduler.start().await?;
    println!("Watching the session; Ctrl+C stops the display and keeps it running.");

    let mut display = tokio::time::interval(Duration::from_secs(1));
    display.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let capped = loop {
        tokio::select! {
            _ = &mut ctrl_c => break false,
            _ = display.tick() => {
                let status = ctx.stopwatch.status();
                print!("\r{}  {}", state_label(status.state), split_hhmmss(status.elapsed_ms));
                let _ = std::io::stdout().flush();
                if status.state == StopwatchState::Capped {
                    break true;
                }
            }
        }
    };
    println!();
    if capped {
        println!("{CAP_NOTICE}");
    }
    scheduler.stop().await?;
    Ok(())
}

async fn stop(ctx: &AppContext, save: bool, discard: bool) -> Result<()> {
    if !save && !discard {
        return Err(FieldLogError::InvalidInput(
            "pass --save to keep the session or --discard to drop it".into(),
        ));
    }
    if discard {
        ctx.stopwatch.stop_discard();
        println!("Session discarded.");
        return Ok(());
    }

    let session = ctx.stopwatch.stop_commit()?;
    let draft = NoteDraft {
        date_iso: session.date_iso.clone(),
        hours_hhmm: hours_to_hhmm(session.hours),
        ..NoteDraft::default()
    };
    let note = ctx.notes.create(&draft).await?;
    println!(
        "Saved {} on {} (note {}).",
        hours_to_hhmm(note.hours),
        iso_to_display(&note.date).unwrap_or_else(|| note.date.clone()),
        note.id
    );
    Ok(())
}

fn print_status(status: &StopwatchStatus) {
    println!("{}  {}", state_label(status.state), split_hhmmss(status.elapsed_ms));
    if status.capped_now {
        println!("{CAP_NOTICE}");
    }
}

fn state_label(state: StopwatchState) -> &'static str {
    match state {
        StopwatchState::Idle => "idle",
        StopwatchState::Running => "running",
        StopwatchState::Paused => "paused",
        StopwatchState::Capped => "capped",
    }
}
