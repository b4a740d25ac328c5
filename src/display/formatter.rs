//! Markdown terminal formatting using termimad

use termimad::{gray, MadSkin};

use crate::display::terminal::should_use_colors;
use crate::renderer::{Notice, RecordFields};

/// Print markdown to terminal with rich formatting (or plain fallback)
pub fn print_markdown(markdown: &str) {
    if should_use_colors() {
        let mut skin = MadSkin::default();
        customize_skin(&mut skin);
        skin.print_text(markdown);
    } else {
        print_plain(markdown);
    }
}

fn customize_skin(skin: &mut MadSkin) {
    use termimad::crossterm::style::{Attribute, Color::*};

    skin.headers[0].set_fg(Cyan);
    skin.headers[0].add_attr(Attribute::Bold);
    skin.headers[1].set_fg(Blue);
    skin.headers[1].add_attr(Attribute::Bold);

    // Countdowns are bold, passed exams italic and dimmed
    skin.bold.set_fg(Green);
    skin.bold.add_attr(Attribute::Bold);
    skin.italic.set_fg(gray(12));
    skin.italic.add_attr(Attribute::Italic);

    skin.inline_code.set_fg(Yellow);
}

fn print_plain(markdown: &str) {
    println!("{}", markdown);
}

/// Markdown for a notice shown in place of countdowns
pub fn notice_markdown(notice: Notice) -> &'static str {
    match notice {
        Notice::NoSchedule => {
            "No schedule loaded. Import one with `exam-countdown import file <PATH>` \
             or `exam-countdown import paste`."
        }
        Notice::EmptyCatalog => {
            "The imported schedule contains no exams. Import another schedule to continue."
        }
        Notice::NoExamsSelected => {
            "No exams selected. Run `exam-countdown select` to choose the exams to track."
        }
        Notice::StaleSelection => {
            "Your selection doesn't match the current exam list. Run `exam-countdown select` \
             to choose again, or `exam-countdown reset` to start over."
        }
    }
}

/// Markdown card for one exam
pub fn record_markdown(record: &RecordFields) -> String {
    let countdown = if record.passed {
        format!("*{}*", record.countdown)
    } else {
        format!("**{}**", record.countdown)
    };
    format!(
        "## {}\n{}\n{}\n{}\n",
        record.title, record.date_line, record.classes_line, countdown
    )
}

/// Markdown for every painted exam, in display order
pub fn records_markdown(records: &[RecordFields]) -> String {
    let mut out = String::from("# Exam Countdown\n\n");
    let cards: Vec<String> = records.iter().map(record_markdown).collect();
    out.push_str(&cards.join("\n"));
    out
}
