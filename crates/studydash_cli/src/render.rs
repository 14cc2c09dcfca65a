//! Plain-text projections of dashboard views.

use studydash_core::{
    ActiveLesson, LessonList, Ongoing, Progress, SubjectCard, WeeklySchedule,
};

const BAR_WIDTH: usize = 20;
const TAG_SEPARATOR: &str = " • ";
pub const LOAD_ERROR_TEXT: &str = "Error loading data.";

/// `[#####---------------]` style bar for a percentage.
pub fn progress_bar(progress: &Progress) -> String {
    let filled = (progress.pct.min(100) as usize * BAR_WIDTH + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

pub fn render_cards(cards: &[SubjectCard]) -> String {
    if cards.is_empty() {
        return "No classes.".to_string();
    }

    let mut lines = Vec::new();
    for card in cards {
        lines.push(format!(
            "{}  ({})  [{}]",
            card.name,
            card.subject_id,
            card.status.label()
        ));
        if !card.description.is_empty() {
            lines.push(format!("  {}", card.description));
        }
        lines.push(format!(
            "  Lessons {}/{}  {}% completed",
            card.progress.done_count, card.progress.total, card.progress.pct
        ));
        lines.push(format!("  {}", progress_bar(&card.progress)));
    }
    lines.join("\n")
}

pub fn render_lesson_list(list: &LessonList) -> String {
    match list {
        LessonList::LoadFailed => LOAD_ERROR_TEXT.to_string(),
        LessonList::NoSubject => "Pick a class to see lessons.".to_string(),
        LessonList::Lessons {
            subject_name,
            query,
            rows,
            ..
        } => {
            let mut lines = vec![format!("{subject_name} ({})", rows.len())];
            if !query.trim().is_empty() {
                lines.push(format!("Filter: {}", query.trim()));
            }
            if rows.is_empty() {
                lines.push("No lesson found.".to_string());
            }
            for row in rows {
                let mark = if row.done { "[x]" } else { "[ ]" };
                lines.push(format!("{mark} {}  {}", row.lesson_id, row.title));
                if !row.tags.is_empty() {
                    lines.push(format!("      {}", row.tags.join(TAG_SEPARATOR)));
                }
            }
            lines.join("\n")
        }
    }
}

pub fn render_ongoing(ongoing: &Ongoing) -> String {
    match ongoing {
        Ongoing::Idle => "Ongoing: Pick a class, then select a lesson  0%".to_string(),
        Ongoing::Subject { name, progress, .. } => format!(
            "Ongoing: {name}  {}/{} lessons done  {}% {}",
            progress.done_count,
            progress.total,
            progress.pct,
            progress_bar(progress)
        ),
    }
}

/// Lesson header plus already-formatted body.
pub fn render_lesson(active: &ActiveLesson, body: &str) -> String {
    let status = if active.done { "Done" } else { "Not done" };
    let mut lines = vec![
        active.subject_name.clone(),
        format!("{}  [{status}]", active.lesson.title),
    ];
    if !active.lesson.tags.is_empty() {
        lines.push(active.lesson.tags.join(TAG_SEPARATOR));
    }
    lines.push(String::new());
    lines.push(body.to_string());
    lines.join("\n")
}

pub fn render_schedule(schedule: &WeeklySchedule) -> String {
    const CELL_WIDTH: usize = 16;
    let mut header = format!("{:<7}", "Time");
    for day in studydash_core::service::schedule::WEEK_DAYS {
        header.push_str(&format!("{day:<CELL_WIDTH$}"));
    }

    let mut lines = vec![header.trim_end().to_string()];
    for (time, cells) in schedule.rows() {
        let mut line = format!("{time:<7}");
        for cell in cells {
            let text = match cell {
                Some(event) => truncate(&format!("{} ({})", event.title, event.note), CELL_WIDTH - 1),
                None => "—".to_string(),
            };
            line.push_str(&format!("{text:<CELL_WIDTH$}"));
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

pub fn render_notes(notes: &str) -> String {
    if notes.is_empty() {
        "(no notes)".to_string()
    } else {
        notes.to_string()
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::{progress_bar, render_lesson_list, render_schedule, truncate, LOAD_ERROR_TEXT};
    use studydash_core::{weekly_schedule, Catalog, LessonList, LessonRow, Progress};

    #[test]
    fn progress_bar_scales_to_width() {
        assert_eq!(progress_bar(&Progress::from_counts(0, 0)), format!("[{}]", "-".repeat(20)));
        assert_eq!(
            progress_bar(&Progress::from_counts(2, 1)),
            format!("[{}{}]", "#".repeat(10), "-".repeat(10))
        );
        assert_eq!(progress_bar(&Progress::from_counts(1, 1)), format!("[{}]", "#".repeat(20)));
    }

    #[test]
    fn lesson_list_states_have_placeholders() {
        assert_eq!(render_lesson_list(&LessonList::LoadFailed), LOAD_ERROR_TEXT);
        let empty = LessonList::Lessons {
            subject_id: "s".to_string(),
            subject_name: "Math".to_string(),
            query: "zzz".to_string(),
            rows: Vec::new(),
        };
        let text = render_lesson_list(&empty);
        assert!(text.contains("No lesson found."));
        assert!(text.contains("Filter: zzz"));
    }

    #[test]
    fn lesson_rows_show_done_marks_and_tags() {
        let list = LessonList::Lessons {
            subject_id: "s".to_string(),
            subject_name: "Math".to_string(),
            query: String::new(),
            rows: vec![LessonRow {
                lesson_id: "l1".to_string(),
                title: "Intro".to_string(),
                tags: vec!["basics".to_string(), "week1".to_string()],
                done: true,
            }],
        };
        let text = render_lesson_list(&list);
        assert!(text.contains("[x] l1  Intro"));
        assert!(text.contains("basics • week1"));
    }

    #[test]
    fn schedule_has_header_and_three_slots() {
        let text = render_schedule(&weekly_schedule(&Catalog::default()));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Time"));
        assert!(lines[1].starts_with("09:00"));
        assert!(lines[1].contains("Class A"));
    }

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
