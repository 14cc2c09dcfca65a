//! StudyDash command-line front end.
//!
//! # Responsibility
//! - Parse one user action, apply it to a fresh dashboard session and print
//!   the resulting view.
//! - Keep catalog failures non-fatal: views print an error indicator instead.

mod app;
mod commands;
mod render;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "studydash", about = "Study-tracking dashboard", version)]
struct Cli {
    /// Catalog JSON file path or http(s) URL
    #[arg(long, global = true)]
    catalog: Option<String>,

    /// Directory for the progress database and logs
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum HtmlMode {
    /// Escaped text in a pre-wrapped block
    Safe,
    /// Partial markdown conversion
    Markdown,
}

#[derive(Subcommand)]
enum Command {
    /// Subject cards with progress
    Subjects,

    /// Lessons of a subject, optionally filtered
    Lessons {
        /// Subject id (defaults to the first subject)
        #[arg(long)]
        subject: Option<String>,
        /// Case-insensitive text matched against title, tags and content
        #[arg(long, short)]
        query: Option<String>,
    },

    /// Show one lesson (first lesson when omitted)
    Show {
        subject: String,
        lesson: Option<String>,
        /// Render content as HTML instead of raw text
        #[arg(long)]
        html: Option<HtmlMode>,
    },

    /// Open the first unfinished lesson of a subject
    Next {
        /// Subject id (defaults to the first subject)
        #[arg(long)]
        subject: Option<String>,
    },

    /// Flip the done flag of a lesson
    Toggle { subject: String, lesson: String },

    /// Mark a lesson done (or not done with --undo)
    Done {
        subject: String,
        lesson: String,
        #[arg(long)]
        undo: bool,
    },

    /// Clear all completion flags (notes are kept)
    Reset {
        /// Confirm the irreversible reset
        #[arg(long)]
        yes: bool,
    },

    /// Show or edit the free-form notes
    Notes {
        #[command(subcommand)]
        action: Option<NotesAction>,
    },

    /// Demo weekly schedule
    Schedule,

    /// Print version information
    Version,
}

#[derive(Subcommand)]
enum NotesAction {
    Show,
    /// Replace the notes
    Set { text: String },
    /// Append one line
    Append { line: String },
    Clear,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Command::Version) = cli.command {
        println!("studydash {}", env!("CARGO_PKG_VERSION"));
        println!("studydash_core {}", studydash_core::core_version());
        return Ok(());
    }

    let config = app::resolve_config(cli.catalog, cli.data_dir, cli.log_level)?;
    app::init_session_logging(&config);
    let conn = app::open_storage(&config)?;
    let mut session = app::Session::open(&config, &conn);
    let format = cli.format;

    match cli.command {
        None => commands::overview(&session, format)?,
        Some(Command::Subjects) => commands::subjects(&session, format)?,
        Some(Command::Lessons { subject, query }) => {
            commands::lessons(&mut session, subject.as_deref(), query, format)?
        }
        Some(Command::Show {
            subject,
            lesson,
            html,
        }) => commands::show(&mut session, &subject, lesson.as_deref(), html, format)?,
        Some(Command::Next { subject }) => {
            commands::next(&mut session, subject.as_deref(), format)?
        }
        Some(Command::Toggle { subject, lesson }) => {
            commands::toggle(&mut session, &subject, &lesson, format)?
        }
        Some(Command::Done {
            subject,
            lesson,
            undo,
        }) => commands::mark(&mut session, &subject, &lesson, !undo, format)?,
        Some(Command::Reset { yes }) => commands::reset(&mut session, yes)?,
        Some(Command::Notes { action }) => match action.unwrap_or(NotesAction::Show) {
            NotesAction::Show => commands::notes_show(&session, format)?,
            NotesAction::Set { text } => commands::notes_set(&mut session, text, format)?,
            NotesAction::Append { line } => commands::notes_append(&mut session, &line, format)?,
            NotesAction::Clear => commands::notes_set(&mut session, String::new(), format)?,
        },
        Some(Command::Schedule) => commands::schedule(&session, format)?,
        Some(Command::Version) => {}
    }

    Ok(())
}
