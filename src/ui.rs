use std::rc::Rc;

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
};

use crate::models::InputMode;
use crate::state::ReportView;
use crate::theme::Theme;
use crate::utils::{centered_rect, human_size};

const HEADER_HEIGHT: u16 = 2;
const DROP_ZONE_HEIGHT: u16 = 5;
const TRIGGER_HEIGHT: u16 = 2;
const FOOTER_HEIGHT: u16 = 3;

fn main_chunks(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(DROP_ZONE_HEIGHT),
            Constraint::Length(TRIGGER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area)
}

/// Text column and scrollbar column of the results panel.
fn results_columns(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area)
}

/// Where the report text lands on a screen of this size, inside the borders.
pub fn results_text_area(screen: Rect) -> Rect {
    let panel = results_columns(main_chunks(screen)[3])[0];
    Block::default().borders(Borders::ALL).inner(panel)
}

/// Rows the lines occupy once word-wrapped to `width`.
pub fn wrapped_height(lines: &[Line<'static>], width: u16) -> u16 {
    if lines.is_empty() || width == 0 {
        return 0;
    }
    let rows = Paragraph::new(lines.to_vec()).wrap(Wrap { trim: false }).line_count(width);
    rows.min(u16::MAX as usize) as u16
}

/// Largest scroll offset that still fills the results panel.
pub fn max_scroll(view: &ReportView, theme: &Theme, screen: Rect) -> u16 {
    let text = results_text_area(screen);
    let (lines, _) = build_report_lines(view, theme);
    wrapped_height(&lines, text.width).saturating_sub(text.height)
}

/// First and one-past-last wrapped row of the quiz entry under the cursor,
/// including its body when expanded.
pub fn cursor_rows(view: &ReportView, theme: &Theme, width: u16) -> Option<(u16, u16)> {
    let (lines, headers) = build_report_lines(view, theme);
    let start = *headers.get(view.quiz_cursor)?;
    let end = headers.get(view.quiz_cursor + 1).copied().unwrap_or(lines.len());
    Some((wrapped_height(&lines[..start], width), wrapped_height(&lines[..end], width)))
}

/// Renders the whole upload-and-report view.
pub fn render(
    f: &mut Frame,
    view: &ReportView,
    mode: InputMode,
    path_input: &str,
    accepted: &[String],
    theme: &Theme,
) {
    let chunks = main_chunks(f.area());

    let header = Paragraph::new(vec![
        Line::from(Span::styled("SmartNotes AI", theme.title)),
        Line::from(Span::styled(
            "Upload your documents and get AI-powered summaries, key points, and quizzes",
            theme.subtitle,
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(header, chunks[0]);

    render_drop_zone(f, chunks[1], view, mode, path_input, accepted, theme);
    render_trigger(f, chunks[2], view, theme);

    if view.report.is_some() {
        render_results(f, chunks[3], view, theme);
    }

    let footer_text = match mode {
        InputMode::PathPrompt => "Type or drop a path | Enter Select | Esc Cancel",
        InputMode::Normal => {
            "o Browse | g Generate | ↑/↓ or j/k Quiz | Enter Expand | r Show Answer | PgUp/PgDn Scroll | c Copy | q Quit"
        }
    };
    let footer = Paragraph::new(footer_text)
        .block(Block::default().borders(Borders::ALL))
        .style(theme.footer);
    f.render_widget(footer, chunks[4]);

    if let Some(notice) = &view.notice {
        let popup_area = centered_rect(60, 30, f.area());
        f.render_widget(Clear, popup_area);
        let border = if notice.title == "Error" { theme.popup_error } else { theme.popup_border };
        let block = Block::default().title(notice.title.clone()).borders(Borders::ALL).style(border);
        let para = Paragraph::new(vec![
            Line::from(notice.message.clone()),
            Line::from(""),
            Line::from(Span::styled("Press Enter to dismiss", theme.footer)),
        ])
        .block(block)
        .wrap(Wrap { trim: true })
        .style(theme.popup_text);
        f.render_widget(para, popup_area);
    }
}

fn render_drop_zone(
    f: &mut Frame,
    area: Rect,
    view: &ReportView,
    mode: InputMode,
    path_input: &str,
    accepted: &[String],
    theme: &Theme,
) {
    let style = if view.is_dragging {
        theme.drop_dragging
    } else if view.selection.is_some() {
        theme.drop_selected
    } else {
        theme.drop_default
    };

    let headline = match (&view.selection, view.is_dragging) {
        (_, true) => Line::from(Span::styled("Drop your file into the terminal", theme.drop_dragging)),
        (Some(sel), false) => Line::from(vec![
            Span::styled(sel.name.clone(), theme.title),
            Span::styled(format!("  ({})", human_size(sel.size)), theme.muted),
        ]),
        (None, false) => Line::from(Span::styled("Drag and drop your file here", theme.title)),
    };

    let second = if mode == InputMode::PathPrompt {
        Line::from(vec![
            Span::styled("Path: ", theme.muted),
            Span::styled(format!("{}▏", path_input), theme.text),
        ])
    } else {
        Line::from(Span::styled("or press o to browse", theme.subtitle))
    };

    let third = match &view.selection {
        Some(sel) if !sel.is_accepted(accepted) => Line::from(Span::styled(
            format!("{} is not a supported format, it will be sent anyway", sel.name),
            theme.drop_warning,
        )),
        _ => {
            let formats = accepted.iter().map(|e| e.trim_start_matches('.').to_uppercase()).collect::<Vec<_>>().join(", ");
            Line::from(Span::styled(format!("Supported formats: {}", formats), theme.muted))
        }
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if view.is_dragging { BorderType::Double } else { BorderType::Plain })
        .border_style(style);
    let para = Paragraph::new(vec![headline, second, third])
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(para, area);
}

fn render_trigger(f: &mut Frame, area: Rect, view: &ReportView, theme: &Theme) {
    let (label, style) = if view.is_submitting {
        ("⏳ Generating...", theme.button_busy)
    } else if view.can_submit() {
        ("[ Generate Notes ]", theme.button)
    } else {
        ("[ Generate Notes ]", theme.button_disabled)
    };
    let para = Paragraph::new(Line::from(Span::styled(label, style))).alignment(Alignment::Center);
    f.render_widget(para, area);
}

fn render_results(f: &mut Frame, area: Rect, view: &ReportView, theme: &Theme) {
    let lines = report_lines(view, theme);
    let title = match view.generated_at {
        Some(at) => format!("Results · generated {}", at.format("%H:%M:%S")),
        None => "Results".to_string(),
    };
    let block = Block::default().title(title).borders(Borders::ALL).style(theme.section_border);

    let layout = results_columns(area);

    let total = wrapped_height(&lines, block.inner(layout[0]).width) as usize;
    let para = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((view.scroll, 0));
    f.render_widget(para, layout[0]);

    let mut sb = ScrollbarState::default().position(view.scroll as usize).content_length(total);
    f.render_stateful_widget(Scrollbar::default().orientation(ScrollbarOrientation::VerticalRight), layout[1], &mut sb);
}

/// The results panel content: summary, key points, then the quiz accordion.
pub fn report_lines(view: &ReportView, theme: &Theme) -> Vec<Line<'static>> {
    build_report_lines(view, theme).0
}

/// Report lines plus the index of each quiz header among them.
fn build_report_lines(view: &ReportView, theme: &Theme) -> (Vec<Line<'static>>, Vec<usize>) {
    let mut headers = Vec::new();
    let Some(report) = &view.report else {
        return (Vec::new(), headers);
    };

    let mut lines = vec![Line::from(Span::styled("Summary", theme.title))];
    // one Line per paragraph, spans do not break on newlines
    for paragraph in report.summary.lines() {
        lines.push(Line::from(Span::styled(paragraph.to_string(), theme.text)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Key Points", theme.title)));
    for point in &report.key_points {
        lines.push(Line::from(vec![
            Span::styled("  • ", theme.bullet),
            Span::styled(point.clone(), theme.text),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Quiz", theme.title)));
    for (i, item) in report.quiz.iter().enumerate() {
        let expanded = view.expanded == Some(i);
        let cursor = if view.quiz_cursor == i { "→" } else { " " };
        let arrow = if expanded { "▾" } else { "▸" };
        let header_style = if view.quiz_cursor == i { theme.quiz_cursor } else { theme.quiz_header };
        headers.push(lines.len());
        lines.push(Line::from(vec![
            Span::styled(format!("{} {} ", cursor, arrow), header_style),
            Span::styled(format!("Q{}: {}", i + 1, item.question), header_style),
        ]));
        if !expanded {
            continue;
        }
        for option in &item.options {
            lines.push(Line::from(Span::styled(format!("      {}", option), theme.quiz_option)));
        }
        if view.is_revealed(i) {
            lines.push(Line::from(Span::styled(format!("      Correct Answer: {}", item.answer), theme.answer)));
        } else {
            lines.push(Line::from(vec![
                Span::raw("      "),
                Span::styled("Show Answer", theme.reveal_control),
                Span::styled(" (r)", theme.muted),
            ]));
        }
    }
    (lines, headers)
}
