//! Command handlers
//!
//! One module per command family. Every handler body runs through
//! [`execute`], which times the call and emits the structured execution
//! record.

pub mod export;
pub mod note;
pub mod profile;
pub mod report;
pub mod timer;

use std::future::Future;
use std::time::Instant;

use fieldlog_domain::Result;

use crate::cli::Commands;
use crate::context::AppContext;
use crate::utils::logging::{error_label, log_command_execution};

/// Route a parsed command to its handler.
pub async fn dispatch(ctx: &AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::Timer { command } => timer::handle(ctx, command).await,
        Commands::Note { command } => note::handle(ctx, command).await,
        Commands::Report { command } => report::handle(ctx, command).await,
        Commands::Export(args) => export::handle(ctx, args).await,
        Commands::Profile { command } => profile::handle(ctx, command).await,
    }
}

/// Run one command body, timing it and logging the outcome.
pub(crate) async fn execute<T, Fut>(command: &str, fut: Fut) -> Result<T>
where
    Fut: Future<Output = Result<T>>,
{
    let start = Instant::now();
    let result = fut.await;
    match &result {
        Ok(_) => log_command_execution(command, start.elapsed(), true, None),
        Err(err) => {
            log_command_execution(command, start.elapsed(), false, Some(error_label(err)));
        }
    }
    result
}
