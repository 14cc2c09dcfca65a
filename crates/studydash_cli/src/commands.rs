//! Subcommand handlers.
//!
//! Each handler applies at most one mutation to the session dashboard and
//! prints the affected view in the requested format.

use crate::app::Session;
use crate::render::{
    render_cards, render_lesson, render_lesson_list, render_notes, render_ongoing,
    render_schedule, LOAD_ERROR_TEXT,
};
use crate::{HtmlMode, OutputFormat};
use anyhow::{bail, Result};
use serde::Serialize;
use studydash_core::{
    ContentFormatter, Dashboard, KvRepository, LessonList, MarkdownFormatter, SafeTextFormatter,
};

#[derive(Serialize)]
struct NotesJson<'a> {
    notes: &'a str,
}

#[derive(Serialize)]
struct CompletionJson<'a> {
    subject_id: &'a str,
    lesson_id: &'a str,
    done: bool,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Cards, lesson list of the first subject and the ongoing box.
pub fn overview(session: &Session<'_>, format: OutputFormat) -> Result<()> {
    let dash = &session.dashboard;
    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "load_error": dash.load_error(),
            "subjects": dash.subject_cards(),
            "lessons": dash.lesson_list(),
            "ongoing": dash.ongoing(),
        })),
        OutputFormat::Plain => {
            if dash.load_error().is_none() {
                println!("{}\n", render_cards(&dash.subject_cards()));
            }
            println!("{}\n", render_lesson_list(&dash.lesson_list()));
            println!("{}", render_ongoing(&dash.ongoing()));
            Ok(())
        }
    }
}

pub fn subjects(session: &Session<'_>, format: OutputFormat) -> Result<()> {
    let dash = &session.dashboard;
    if format == OutputFormat::Json {
        return print_json(&subjects_json(dash));
    }
    if dash.load_error().is_some() {
        println!("{LOAD_ERROR_TEXT}");
    } else {
        println!("{}", render_cards(&dash.subject_cards()));
    }
    Ok(())
}

pub fn lessons(
    session: &mut Session<'_>,
    subject: Option<&str>,
    query: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let Some(list) = select_lessons(&mut session.dashboard, subject, query) else {
        println!("No class '{}'.", subject.unwrap_or_default());
        return Ok(());
    };
    match format {
        OutputFormat::Json => print_json(&list),
        OutputFormat::Plain => {
            println!("{}", render_lesson_list(&list));
            Ok(())
        }
    }
}

pub fn show(
    session: &mut Session<'_>,
    subject: &str,
    lesson: Option<&str>,
    html: Option<HtmlMode>,
    format: OutputFormat,
) -> Result<()> {
    let dash = &mut session.dashboard;
    if dash.load_error().is_some() {
        println!("{LOAD_ERROR_TEXT}");
        return Ok(());
    }
    dash.open_lesson(subject, lesson);
    print_active_lesson(session, html, format)
}

pub fn next(session: &mut Session<'_>, subject: Option<&str>, format: OutputFormat) -> Result<()> {
    let dash = &mut session.dashboard;
    if dash.load_error().is_some() {
        println!("{LOAD_ERROR_TEXT}");
        return Ok(());
    }
    if let Some(subject_id) = subject {
        if !dash.open_subject(subject_id) {
            println!("No class '{subject_id}'.");
            return Ok(());
        }
    }
    dash.open_next_unfinished();
    print_active_lesson(session, None, format)
}

pub fn toggle(
    session: &mut Session<'_>,
    subject: &str,
    lesson: &str,
    format: OutputFormat,
) -> Result<()> {
    let dash = &mut session.dashboard;
    if !dash.open_lesson(subject, Some(lesson)) {
        return report_missing_lesson(session, subject, lesson);
    }
    let done = dash.toggle_active_lesson()?;
    print_completion(session, subject, lesson, done, format)
}

pub fn mark(
    session: &mut Session<'_>,
    subject: &str,
    lesson: &str,
    value: bool,
    format: OutputFormat,
) -> Result<()> {
    if !session.dashboard.set_done(subject, lesson, value)? {
        return report_missing_lesson(session, subject, lesson);
    }
    print_completion(session, subject, lesson, value, format)
}

pub fn reset(session: &mut Session<'_>, confirmed: bool) -> Result<()> {
    if !confirmed {
        bail!("Reset clears every completion flag and cannot be undone; pass --yes to confirm");
    }
    session.dashboard.reset_completion()?;
    println!("All lessons marked as not done. Notes were kept.");
    Ok(())
}

pub fn notes_show(session: &Session<'_>, format: OutputFormat) -> Result<()> {
    let notes = session.dashboard.notes();
    match format {
        OutputFormat::Json => print_json(&NotesJson { notes }),
        OutputFormat::Plain => {
            println!("{}", render_notes(notes));
            Ok(())
        }
    }
}

pub fn notes_set(session: &mut Session<'_>, text: String, format: OutputFormat) -> Result<()> {
    session.dashboard.update_notes(text)?;
    notes_show(session, format)
}

pub fn notes_append(session: &mut Session<'_>, line: &str, format: OutputFormat) -> Result<()> {
    session.dashboard.append_note_line(line)?;
    notes_show(session, format)
}

pub fn schedule(session: &Session<'_>, format: OutputFormat) -> Result<()> {
    let Some(schedule) = session.dashboard.schedule() else {
        println!("{LOAD_ERROR_TEXT}");
        return Ok(());
    };
    match format {
        OutputFormat::Json => print_json(&schedule),
        OutputFormat::Plain => {
            println!("{}", render_schedule(&schedule));
            Ok(())
        }
    }
}

fn subjects_json<R: KvRepository>(dash: &Dashboard<R>) -> serde_json::Value {
    serde_json::json!({
        "load_error": dash.load_error(),
        "subjects": dash.subject_cards(),
    })
}

/// Opens `subject` (when given) and applies `query`.
///
/// `None` means the subject id is not in a loaded catalog.
fn select_lessons<R: KvRepository>(
    dash: &mut Dashboard<R>,
    subject: Option<&str>,
    query: Option<String>,
) -> Option<LessonList> {
    if let Some(subject_id) = subject {
        if !dash.open_subject(subject_id) && dash.load_error().is_none() {
            return None;
        }
    }
    if let Some(query) = query {
        dash.set_query(query);
    }
    Some(dash.lesson_list())
}

fn print_active_lesson(
    session: &Session<'_>,
    html: Option<HtmlMode>,
    format: OutputFormat,
) -> Result<()> {
    let Some(active) = session.dashboard.active_lesson() else {
        println!("No lesson found.");
        return Ok(());
    };

    if format == OutputFormat::Json {
        return print_json(&active);
    }

    let body = match html {
        Some(HtmlMode::Safe) => SafeTextFormatter.format(&active.lesson.content),
        Some(HtmlMode::Markdown) => MarkdownFormatter.format(&active.lesson.content),
        None if active.lesson.content.is_empty() => "No content".to_string(),
        None => active.lesson.content.clone(),
    };
    println!("{}", render_lesson(&active, &body));
    Ok(())
}

fn print_completion(
    session: &Session<'_>,
    subject_id: &str,
    lesson_id: &str,
    done: bool,
    format: OutputFormat,
) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(&CompletionJson {
            subject_id,
            lesson_id,
            done,
        });
    }
    let label = if done { "done" } else { "not done" };
    println!("{subject_id}/{lesson_id} marked {label}.");
    if let Some(progress) = session.dashboard.progress_of(subject_id) {
        println!(
            "Lessons {}/{}  {}% completed",
            progress.done_count, progress.total, progress.pct
        );
    }
    Ok(())
}

fn report_missing_lesson(session: &Session<'_>, subject: &str, lesson: &str) -> Result<()> {
    if session.dashboard.load_error().is_some() {
        println!("{LOAD_ERROR_TEXT}");
    } else {
        println!("No lesson '{lesson}' in class '{subject}'.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{select_lessons, subjects_json};
    use studydash_core::db::open_db_in_memory;
    use studydash_core::{
        parse_catalog, CatalogState, CompletionStore, Dashboard, LessonList, NotesStore,
        SqliteKvRepository,
    };

    const CATALOG: &str = r#"{"subjects":[
        {"id":"math","name":"Mathematics","lessons":[{"id":"m1","title":"Sets"}]},
        {"id":"bio","name":"Biology","lessons":[{"id":"b1","title":"Cells"}]}
    ]}"#;

    fn dashboard(
        catalog: CatalogState,
        repo: SqliteKvRepository<'_>,
    ) -> Dashboard<SqliteKvRepository<'_>> {
        Dashboard::new(catalog, CompletionStore::open(repo), NotesStore::open(repo))
    }

    fn subject_of(list: &LessonList) -> &str {
        match list {
            LessonList::Lessons { subject_id, .. } => subject_id,
            other => panic!("unexpected lesson list: {other:?}"),
        }
    }

    #[test]
    fn unknown_subject_is_reported_instead_of_listing_another() {
        let conn = open_db_in_memory().unwrap();
        let catalog = CatalogState::Loaded(parse_catalog(CATALOG).unwrap());
        let mut dash = dashboard(catalog, SqliteKvRepository::new(&conn));

        assert!(select_lessons(&mut dash, Some("nope"), None).is_none());

        let list = select_lessons(&mut dash, Some("bio"), None).unwrap();
        assert_eq!(subject_of(&list), "bio");

        let list = select_lessons(&mut dash, None, Some("cells".to_string())).unwrap();
        assert_eq!(subject_of(&list), "bio");
    }

    #[test]
    fn failed_catalog_lists_load_failure_for_any_subject() {
        let conn = open_db_in_memory().unwrap();
        let catalog = CatalogState::Failed("unreachable".to_string());
        let mut dash = dashboard(catalog, SqliteKvRepository::new(&conn));

        let list = select_lessons(&mut dash, Some("math"), None).unwrap();
        assert_eq!(list, LessonList::LoadFailed);
    }

    #[test]
    fn subjects_json_exposes_load_error() {
        let conn = open_db_in_memory().unwrap();
        let failed = dashboard(
            CatalogState::Failed("unreachable".to_string()),
            SqliteKvRepository::new(&conn),
        );
        let json = subjects_json(&failed);
        assert_eq!(json["load_error"], "unreachable");
        assert_eq!(json["subjects"], serde_json::json!([]));

        let loaded = dashboard(
            CatalogState::Loaded(parse_catalog(CATALOG).unwrap()),
            SqliteKvRepository::new(&conn),
        );
        let json = subjects_json(&loaded);
        assert!(json["load_error"].is_null());
        assert_eq!(json["subjects"].as_array().unwrap().len(), 2);
    }
}
