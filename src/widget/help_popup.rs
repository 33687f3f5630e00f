use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::theme::Base16Palette;

const KEYS: &[(&str, &str)] = &[
    ("l / → / PgDn", "Next page"),
    ("h / ← / PgUp", "Previous page"),
    ("n", "Add note (toggle placement mode)"),
    ("click", "Place the note while adding"),
    ("click marker", "Show the full note"),
    ("Enter", "Save note / jump to selected note"),
    ("Save / Cancel", "Mouse buttons on the note form"),
    ("Alt+Enter", "New line in note"),
    ("Esc", "Cancel note / close panel"),
    ("s / Tab", "Toggle notes sidebar"),
    ("j / k", "Move in notes sidebar"),
    ("o", "Open document in PDF viewer"),
    ("?", "Toggle this help"),
    ("q", "Quit"),
];

pub struct HelpPopup;

impl HelpPopup {
    pub fn render(f: &mut Frame, area: Rect, palette: &Base16Palette) {
        let key_width = KEYS.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
        let lines: Vec<Line> = KEYS
            .iter()
            .map(|(key, action)| {
                Line::from(vec![
                    Span::styled(
                        format!("  {key:<key_width$}  "),
                        Style::default()
                            .fg(palette.base_0d)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*action, Style::default().fg(palette.base_05)),
                ])
            })
            .collect();

        let width = (key_width as u16 + 40).min(area.width);
        let height = (KEYS.len() as u16 + 2).min(area.height);
        let popup_area = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        );

        f.render_widget(Clear, popup_area);
        f.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .title(" Help - Press ? or ESC to close ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.base_0d))
                    .style(Style::default().bg(palette.base_00)),
            ),
            popup_area,
        );
    }
}
