use chrono::Local;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::notes::Note;
use crate::theme::Base16Palette;

const POPUP_WIDTH: u16 = 48;

/// Full text of one note, opened by clicking its marker.
pub struct NotePopup;

impl NotePopup {
    pub fn popup_area(area: Rect, line_count: usize) -> Rect {
        let width = POPUP_WIDTH.min(area.width);
        // Borders plus the page line and a spacer
        let height = (line_count as u16).saturating_add(4).min(area.height);
        Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        )
    }

    pub fn render(f: &mut Frame, area: Rect, note: &Note, palette: &Base16Palette) {
        let text_width = usize::from(POPUP_WIDTH.min(area.width).saturating_sub(4)).max(1);
        let wrapped = textwrap::wrap(&note.text, text_width);
        let popup_area = Self::popup_area(area, wrapped.len());

        let created = note.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M");
        let mut lines = vec![
            Line::from(Span::styled(
                format!(" Page {} · {created}", note.page),
                Style::default().fg(palette.base_03),
            )),
            Line::from(""),
        ];
        lines.extend(wrapped.into_iter().map(|line| {
            Line::from(Span::styled(
                format!(" {line}"),
                Style::default().fg(palette.base_06),
            ))
        }));

        f.render_widget(Clear, popup_area);
        f.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .title(Span::styled(
                        format!(" Note {} ", note.id),
                        Style::default()
                            .fg(palette.base_0a)
                            .add_modifier(Modifier::BOLD),
                    ))
                    .title_bottom(Line::from(" Esc close ").right_aligned())
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.base_0a))
                    .style(Style::default().bg(palette.base_00)),
            ),
            popup_area,
        );
    }
}
