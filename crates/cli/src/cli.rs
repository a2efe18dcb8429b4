//! Command-line surface
//!
//! The clap grammar for the `fieldlog` binary. Parsing stays here; behavior
//! lives in the handlers under [`crate::commands`].

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Field service hours, notes and monthly reports from the terminal.
#[derive(Debug, Parser)]
#[command(name = "fieldlog")]
#[command(author, version, about = "Track field service hours, notes and monthly reports")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (`.toml` or `.json`); the working directory is
    /// probed when omitted
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level command families.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run and persist the service stopwatch
    Timer {
        #[command(subcommand)]
        command: TimerCommands,
    },
    /// Record and browse field service notes
    Note {
        #[command(subcommand)]
        command: NoteCommands,
    },
    /// Aggregate notes into monthly reports
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Write a monthly report as a printable HTML form
    Export(ExportArgs),
    /// Manage the local publisher profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
}

/// Stopwatch operations.
#[derive(Debug, Subcommand)]
pub enum TimerCommands {
    /// Show the session state and elapsed time
    Status,
    /// Start or resume the session
    Start,
    /// Pause the session, keeping the elapsed time
    Pause,
    /// Zero the session
    Reset,
    /// Keep the session ticking in the foreground until Ctrl+C
    Watch,
    /// End the session
    Stop {
        /// Save the elapsed time as a note for today
        #[arg(long, conflicts_with = "discard")]
        save: bool,
        /// Throw the elapsed time away
        #[arg(long)]
        discard: bool,
    },
}

/// Note operations.
#[derive(Debug, Subcommand)]
pub enum NoteCommands {
    /// Record a field service note
    Add(NoteAddArgs),
    /// List notes, newest first
    List {
        /// Restrict to one month (`yyyy-mm`)
        #[arg(long, value_name = "YYYY-MM")]
        month: Option<String>,
    },
    /// Delete one note by id
    Delete {
        /// Note id as printed by `note list`
        id: String,
    },
    /// Delete every note
    Clear,
}

/// Arguments for `note add`. String fields left at their empty default mean
/// the form field was left blank.
#[derive(Debug, Default, Args)]
pub struct NoteAddArgs {
    /// Service date (`yyyy-mm-dd`); today when omitted
    #[arg(long, value_name = "DATE")]
    pub date: Option<String>,

    /// Worked time as `HH:mm`
    #[arg(long, value_name = "HH:MM")]
    pub hours: String,

    /// Free-form location notes
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub location: String,

    /// Action tag, by catalog number or exact text; repeatable. An unknown
    /// value prints the numbered catalog.
    #[arg(long = "action", value_name = "TAG")]
    pub actions: Vec<String>,

    /// Record revisit details on this note
    #[arg(long)]
    pub revisit: bool,

    /// Revisit: resident name
    #[arg(long, value_name = "NAME", default_value = "")]
    pub revisit_name: String,

    /// Revisit: house number
    #[arg(long, value_name = "NUM", default_value = "")]
    pub revisit_house: String,

    /// Revisit: agreed return date (`yyyy-mm-dd`)
    #[arg(long, value_name = "DATE", default_value = "")]
    pub revisit_date: String,

    /// Revisit: agreed return time (`HH:mm`)
    #[arg(long, value_name = "HH:MM", default_value = "")]
    pub revisit_time: String,

    /// Revisit: phone number
    #[arg(long, value_name = "PHONE", default_value = "")]
    pub revisit_phone: String,

    /// Revisit: address
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub revisit_address: String,

    /// Record bible study details on this note
    #[arg(long)]
    pub study: bool,

    /// Study: student name
    #[arg(long, value_name = "NAME", default_value = "")]
    pub study_name: String,

    /// Study: house number
    #[arg(long, value_name = "NUM", default_value = "")]
    pub study_house: String,

    /// Study: weekday or date the study happens on
    #[arg(long, value_name = "DAY", default_value = "")]
    pub study_day: String,

    /// Study: time of day (`HH:mm`)
    #[arg(long, value_name = "HH:MM", default_value = "")]
    pub study_time: String,

    /// Study: phone number
    #[arg(long, value_name = "PHONE", default_value = "")]
    pub study_phone: String,

    /// Study: address
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub study_address: String,

    /// Study: publication being studied
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub study_material: String,
}

/// Report operations.
#[derive(Debug, Subcommand)]
pub enum ReportCommands {
    /// Build (or rebuild) the current month's report from its notes
    Generate,
    /// List stored reports, newest month first
    List,
    /// Show one report with its daily entries
    Show {
        /// Month key (`yyyy-mm`)
        #[arg(value_name = "YYYY-MM")]
        month: String,
    },
    /// Delete one report; its notes stay
    Delete {
        /// Month key (`yyyy-mm`)
        #[arg(value_name = "YYYY-MM")]
        month: String,
    },
}

/// Arguments for `export`.
#[derive(Debug, Default, Args)]
pub struct ExportArgs {
    /// Month key (`yyyy-mm`) of the report to export
    #[arg(value_name = "YYYY-MM")]
    pub month: String,

    /// Participant name on the form; the profile's full name when omitted
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Leave the hours row off the form
    #[arg(long)]
    pub no_hours: bool,

    /// Observations block on the form
    #[arg(long, value_name = "TEXT")]
    pub notes: Option<String>,
}

/// Profile operations.
#[derive(Debug, Subcommand)]
pub enum ProfileCommands {
    /// Update profile fields; only the given ones change
    Set(ProfileSetArgs),
    /// Show the stored profile
    Show,
}

/// Arguments for `profile set`.
#[derive(Debug, Default, Args)]
pub struct ProfileSetArgs {
    /// Contact email
    #[arg(long, value_name = "EMAIL")]
    pub email: Option<String>,

    /// Full name, as printed on report forms
    #[arg(long, value_name = "NAME")]
    pub full_name: Option<String>,

    /// Congregation name
    #[arg(long, value_name = "NAME")]
    pub congregation: Option<String>,

    /// City
    #[arg(long, value_name = "CITY")]
    pub city: Option<String>,

    /// State
    #[arg(long, value_name = "UF")]
    pub state: Option<String>,

    /// Birth date (`yyyy-mm-dd`)
    #[arg(long, value_name = "DATE")]
    pub birth_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_timer_stop_with_save() {
        let cli = Cli::try_parse_from(["fieldlog", "timer", "stop", "--save"]).unwrap();
        match cli.command {
            Commands::Timer { command: TimerCommands::Stop { save, discard } } => {
                assert!(save);
                assert!(!discard);
            }
            other => panic!("expected timer stop, got {other:?}"),
        }
    }

    #[test]
    fn save_and_discard_conflict() {
        let result = Cli::try_parse_from(["fieldlog", "timer", "stop", "--save", "--discard"]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_note_add_with_repeated_actions() {
        let cli = Cli::try_parse_from([
            "fieldlog",
            "note",
            "add",
            "--hours",
            "02:30",
            "--action",
            "1",
            "--action",
            "4",
        ])
        .unwrap();
        match cli.command {
            Commands::Note { command: NoteCommands::Add(args) } => {
                assert_eq!(args.hours, "02:30");
                assert_eq!(args.actions, ["1", "4"]);
                assert!(args.date.is_none());
            }
            other => panic!("expected note add, got {other:?}"),
        }
    }

    #[test]
    fn parses_export_with_options() {
        let cli = Cli::try_parse_from([
            "fieldlog",
            "export",
            "2025-03",
            "--name",
            "Maria Silva",
            "--no-hours",
        ])
        .unwrap();
        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.month, "2025-03");
                assert_eq!(args.name.as_deref(), Some("Maria Silva"));
                assert!(args.no_hours);
                assert!(args.notes.is_none());
            }
            other => panic!("expected export, got {other:?}"),
        }
    }

    #[test]
    fn global_config_flag_is_accepted_after_the_subcommand() {
        let cli =
            Cli::try_parse_from(["fieldlog", "report", "list", "--config", "fieldlog.toml"])
                .unwrap();
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("fieldlog.toml")));
    }
}
