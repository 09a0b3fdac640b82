use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub title: Style,
    pub subtitle: Style,
    pub text: Style,
    pub muted: Style,

    // Drop zone
    pub drop_default: Style,
    pub drop_selected: Style,
    pub drop_dragging: Style,
    pub drop_warning: Style,

    // Trigger
    pub button: Style,
    pub button_disabled: Style,
    pub button_busy: Style,

    // Results
    pub section_border: Style,
    pub bullet: Style,
    pub quiz_header: Style,
    pub quiz_cursor: Style,
    pub quiz_option: Style,
    pub reveal_control: Style,
    pub answer: Style,

    pub footer: Style,
    pub popup_border: Style,
    pub popup_error: Style,
    pub popup_text: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            subtitle: Style::default().fg(Color::Gray),
            text: Style::default().fg(Color::White),
            muted: Style::default().fg(Color::DarkGray),

            drop_default: Style::default().fg(Color::DarkGray),
            drop_selected: Style::default().fg(Color::Green),
            drop_dragging: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            drop_warning: Style::default().fg(Color::Yellow),

            button: Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
            button_disabled: Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            button_busy: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),

            section_border: Style::default().fg(Color::Cyan),
            bullet: Style::default().fg(Color::Blue),
            quiz_header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            quiz_cursor: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            quiz_option: Style::default().fg(Color::Gray),
            reveal_control: Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
            answer: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),

            footer: Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
            popup_border: Style::default().fg(Color::Magenta).bg(Color::Black),
            popup_error: Style::default().fg(Color::Red).bg(Color::Black),
            popup_text: Style::default().fg(Color::White),
        }
    }
}
