use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};

use crate::grades::Grade;
use crate::library::Availability;

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

/// Scores are shown with two decimals everywhere.
pub(crate) fn format_score(score: f64) -> String {
    format!("{score:.2}")
}

/// Whole-number component scores drop the trailing `.00`.
pub(crate) fn format_component(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.0}")
    } else {
        format!("{score:.2}")
    }
}

pub(crate) fn grade_style(grade: Grade) -> Style {
    match grade {
        Grade::A => Style::default().fg(Color::Green),
        Grade::B => Style::default().fg(Color::Cyan),
        Grade::C => Style::default().fg(Color::Yellow),
        Grade::D => Style::default().fg(Color::LightRed),
        Grade::E => Style::default().fg(Color::Red),
    }
}

pub(crate) fn availability_style(state: Availability) -> Style {
    match state {
        Availability::Available => Style::default().fg(Color::Green),
        Availability::Borrowed => Style::default().fg(Color::DarkGray),
    }
}

/// Text bar for the distribution panel, one `#` per two percent.
pub(crate) fn percentage_bar(percent: f64) -> String {
    let cells = (percent / 2.0).round().clamp(0.0, 50.0) as usize;
    "#".repeat(cells)
}
