use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::notes::{NoteId, NotePosition};
use crate::settings::DEFAULT_MARKER;
use crate::theme::Base16Palette;
use crate::viewer::AnnotatedViewer;

/// Height over width of an ISO 216 page.
pub const PAGE_ASPECT: f64 = 1.414;
/// Terminal cells are roughly twice as tall as they are wide.
pub const CELL_ASPECT: f64 = 2.0;

const FORM_WIDTH: u16 = 32;
const FORM_HEIGHT: u16 = 7;

const CANCEL_LABEL: &str = " Cancel ";
const SAVE_LABEL: &str = " Save ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormButton {
    Cancel,
    Save,
}

/// Largest page-proportioned rectangle inside `area`, centered horizontally.
pub fn page_frame(area: Rect) -> Rect {
    let rows_per_column = PAGE_ASPECT / CELL_ASPECT;
    let width_for_height = (f64::from(area.height) / rows_per_column).floor() as u16;
    let width = area.width.min(width_for_height);
    let height = ((f64::from(width) * rows_per_column).round() as u16).min(area.height);
    let x = area.x + (area.width - width) / 2;
    Rect::new(x, area.y, width, height)
}

/// Cell that displays a normalized position on `surface`.
pub fn cell_for_position(position: NotePosition, surface: Rect) -> Option<(u16, u16)> {
    if surface.is_empty() {
        return None;
    }
    let column = (position.x / 100.0 * f64::from(surface.width)).round() as u16;
    let row = (position.y / 100.0 * f64::from(surface.height)).round() as u16;
    Some((
        surface.x + column.min(surface.width - 1),
        surface.y + row.min(surface.height - 1),
    ))
}

/// Draft form box centered on `anchor` and kept inside `surface`.
pub fn form_rect(anchor: (u16, u16), surface: Rect) -> Rect {
    let width = FORM_WIDTH.min(surface.width);
    let height = FORM_HEIGHT.min(surface.height);
    let max_x = surface.x + surface.width - width;
    let max_y = surface.y + surface.height - height;
    let x = anchor.0.saturating_sub(width / 2).clamp(surface.x, max_x);
    let y = anchor.1.saturating_sub(height / 2).clamp(surface.y, max_y);
    Rect::new(x, y, width, height)
}

/// Cancel and Save buttons sitting on the bottom border of the draft form,
/// right-aligned. `None` when the form is too small to hold them.
pub fn form_buttons(form: Rect) -> Option<(Rect, Rect)> {
    let cancel_width = CANCEL_LABEL.width() as u16;
    let save_width = SAVE_LABEL.width() as u16;
    if form.height < 2 || form.width < cancel_width + save_width + 3 {
        return None;
    }
    let y = form.bottom() - 1;
    let save = Rect::new(form.right() - 1 - save_width, y, save_width, 1);
    let cancel = Rect::new(save.x - 1 - cancel_width, y, cancel_width, 1);
    Some((cancel, save))
}

/// The configured marker when it fills exactly one cell, the default otherwise.
pub fn marker_symbol(marker: &str) -> &str {
    if marker.width() == 1 {
        marker
    } else {
        DEFAULT_MARKER
    }
}

/// Where things ended up on screen during the last render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageGeometry {
    /// Area that accepts placement clicks and hosts the note overlay.
    pub surface: Rect,
    pub form: Option<Rect>,
    /// Cancel and Save buttons of the draft form.
    pub form_buttons: Option<(Rect, Rect)>,
    /// Marker cells of the current page, in drawing order.
    pub markers: Vec<(NoteId, u16, u16)>,
}

impl PageGeometry {
    pub fn surface_contains(&self, column: u16, row: u16) -> bool {
        self.surface.contains(Position::new(column, row))
    }

    pub fn form_contains(&self, column: u16, row: u16) -> bool {
        self.form
            .is_some_and(|form| form.contains(Position::new(column, row)))
    }

    pub fn form_button_at(&self, column: u16, row: u16) -> Option<FormButton> {
        let (cancel, save) = self.form_buttons?;
        let position = Position::new(column, row);
        if cancel.contains(position) {
            Some(FormButton::Cancel)
        } else if save.contains(position) {
            Some(FormButton::Save)
        } else {
            None
        }
    }

    /// Note whose marker is drawn at the cell. The last drawn wins.
    pub fn marker_at(&self, column: u16, row: u16) -> Option<NoteId> {
        self.markers
            .iter()
            .rev()
            .find(|(_, x, y)| (*x, *y) == (column, row))
            .map(|(id, _, _)| *id)
    }
}

/// The page surface: a framed placeholder for the page, the markers of the
/// notes on it and, while drafting, the note entry form.
pub struct PageView<'a> {
    viewer: &'a AnnotatedViewer,
    palette: &'a Base16Palette,
    marker: &'a str,
}

impl<'a> PageView<'a> {
    pub fn new(viewer: &'a AnnotatedViewer, palette: &'a Base16Palette, marker: &'a str) -> Self {
        Self {
            viewer,
            palette,
            marker,
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) -> PageGeometry {
        let palette = self.palette;
        let frame = page_frame(area);
        let placing = self.viewer.placement().is_active();

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if placing {
                palette.base_0a
            } else {
                palette.base_03
            }));
        if placing && !self.viewer.placement().is_drafting() {
            block = block.title(
                Line::from(Span::styled(
                    " Click to place a note ",
                    Style::default()
                        .fg(palette.base_0a)
                        .add_modifier(Modifier::BOLD),
                ))
                .centered(),
            );
        }
        let surface = block.inner(frame);
        f.render_widget(block, frame);

        self.render_placeholder(f, surface);
        let markers = self.render_markers(f, surface);

        let form = self
            .viewer
            .placement()
            .draft_position()
            .zip(self.viewer.placement().draft_text())
            .and_then(|(position, text)| {
                let anchor = cell_for_position(position, surface)?;
                let rect = form_rect(anchor, surface);
                self.render_form(f, rect, text);
                Some(rect)
            });
        let buttons = form.and_then(form_buttons);
        if let Some((cancel, save)) = buttons {
            self.render_form_buttons(f, cancel, save);
        }

        PageGeometry {
            surface,
            form,
            form_buttons: buttons,
            markers,
        }
    }

    fn render_placeholder(&self, f: &mut Frame, surface: Rect) {
        let palette = self.palette;
        let source = self.viewer.source();
        let lines = vec![
            Line::from(Span::styled(
                source.display_name(),
                Style::default()
                    .fg(palette.base_06)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(
                    "Page {} of {}",
                    self.viewer.current_page(),
                    self.viewer.total_pages()
                ),
                Style::default().fg(palette.base_05),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press o to open in your PDF viewer",
                Style::default().fg(palette.base_03),
            )),
        ];

        let top_padding = surface.height.saturating_sub(lines.len() as u16) / 2;
        let text_area = Rect {
            y: surface.y + top_padding,
            height: surface.height - top_padding,
            ..surface
        };
        f.render_widget(
            Paragraph::new(lines)
                .centered()
                .wrap(Wrap { trim: true }),
            text_area,
        );
    }

    fn render_markers(&self, f: &mut Frame, surface: Rect) -> Vec<(NoteId, u16, u16)> {
        let style = Style::default()
            .fg(self.palette.base_00)
            .bg(self.palette.base_0a)
            .add_modifier(Modifier::BOLD);
        let symbol = marker_symbol(self.marker);
        let buffer = f.buffer_mut();
        let mut markers = Vec::new();
        for note in self.viewer.notes_on_current_page() {
            if let Some((x, y)) = cell_for_position(note.position, surface) {
                buffer[(x, y)].set_symbol(symbol).set_style(style);
                markers.push((note.id, x, y));
            }
        }
        markers
    }

    fn render_form_buttons(&self, f: &mut Frame, cancel: Rect, save: Rect) {
        let palette = self.palette;
        let buffer = f.buffer_mut();
        buffer.set_string(
            cancel.x,
            cancel.y,
            CANCEL_LABEL,
            Style::default().fg(palette.base_07).bg(palette.base_08),
        );
        buffer.set_string(
            save.x,
            save.y,
            SAVE_LABEL,
            Style::default()
                .fg(palette.base_00)
                .bg(palette.base_0b)
                .add_modifier(Modifier::BOLD),
        );
    }

    fn render_form(&self, f: &mut Frame, rect: Rect, text: &str) {
        let palette = self.palette;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.base_0d))
            .style(Style::default().bg(palette.base_01))
            .title(Span::styled(
                " New note ",
                Style::default()
                    .fg(palette.base_0d)
                    .add_modifier(Modifier::BOLD),
            ));

        let mut lines: Vec<Line> = text.split('\n').map(|l| Line::from(l.to_string())).collect();
        if let Some(last) = lines.last_mut() {
            last.push_span(Span::styled("█", Style::default().fg(palette.base_05)));
        }
        if text.is_empty() {
            lines.push(Line::from(Span::styled(
                "Enter note text...",
                Style::default().fg(palette.base_03),
            )));
        }

        f.render_widget(Clear, rect);
        f.render_widget(
            Paragraph::new(lines)
                .style(Style::default().fg(palette.base_06))
                .wrap(Wrap { trim: false })
                .block(block),
            rect,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_keeps_page_proportions() {
        let frame = page_frame(Rect::new(0, 1, 80, 30));
        assert_eq!(frame.width, 42);
        assert_eq!(frame.height, 30);
        assert_eq!(frame.x, 19);
        assert_eq!(frame.y, 1);

        // Narrow area: width limits height
        let frame = page_frame(Rect::new(0, 0, 20, 40));
        assert_eq!(frame.width, 20);
        assert_eq!(frame.height, 14);
    }

    #[test]
    fn positions_map_back_to_clicked_cells() {
        let surface = Rect::new(10, 5, 40, 20);
        for (column, row) in [(10, 5), (30, 15), (49, 24), (17, 9)] {
            let position = NotePosition::new(
                100.0 * f64::from(column - surface.x) / f64::from(surface.width),
                100.0 * f64::from(row - surface.y) / f64::from(surface.height),
            );
            assert_eq!(cell_for_position(position, surface), Some((column, row)));
        }
    }

    #[test]
    fn full_percent_stays_inside_surface() {
        let surface = Rect::new(0, 0, 10, 10);
        assert_eq!(
            cell_for_position(NotePosition::new(100.0, 100.0), surface),
            Some((9, 9))
        );
        assert_eq!(
            cell_for_position(NotePosition::new(0.0, 0.0), Rect::new(0, 0, 0, 10)),
            None
        );
    }

    #[test]
    fn form_is_clamped_inside_surface() {
        let surface = Rect::new(10, 5, 40, 20);

        let centered = form_rect((30, 15), surface);
        assert_eq!(centered, Rect::new(14, 12, 32, 7));

        let corner = form_rect((49, 24), surface);
        assert_eq!(corner.right(), surface.right());
        assert_eq!(corner.bottom(), surface.bottom());

        let origin = form_rect((10, 5), surface);
        assert_eq!((origin.x, origin.y), (10, 5));

        let tiny = form_rect((1, 1), Rect::new(0, 0, 8, 3));
        assert_eq!(tiny, Rect::new(0, 0, 8, 3));
    }

    #[test]
    fn buttons_sit_on_the_bottom_border() {
        let form = Rect::new(14, 12, 32, 7);
        let (cancel, save) = form_buttons(form).unwrap();
        assert_eq!(save, Rect::new(39, 18, 6, 1));
        assert_eq!(cancel, Rect::new(30, 18, 8, 1));

        let geometry = PageGeometry {
            surface: Rect::new(10, 5, 40, 20),
            form: Some(form),
            form_buttons: Some((cancel, save)),
            markers: Vec::new(),
        };
        assert_eq!(geometry.form_button_at(30, 18), Some(FormButton::Cancel));
        assert_eq!(geometry.form_button_at(44, 18), Some(FormButton::Save));
        assert_eq!(geometry.form_button_at(38, 18), None);
        assert_eq!(geometry.form_button_at(40, 17), None);

        assert_eq!(form_buttons(Rect::new(0, 0, 8, 3)), None);
    }

    #[test]
    fn last_drawn_marker_wins() {
        let geometry = PageGeometry {
            markers: vec![(NoteId(1), 3, 4), (NoteId(2), 3, 4), (NoteId(3), 5, 4)],
            ..PageGeometry::default()
        };
        assert_eq!(geometry.marker_at(3, 4), Some(NoteId(2)));
        assert_eq!(geometry.marker_at(5, 4), Some(NoteId(3)));
        assert_eq!(geometry.marker_at(4, 4), None);
    }

    #[test]
    fn wide_markers_fall_back_to_default() {
        assert_eq!(marker_symbol("*"), "*");
        assert_eq!(marker_symbol("📝"), DEFAULT_MARKER);
        assert_eq!(marker_symbol(""), DEFAULT_MARKER);
        assert_eq!(marker_symbol("ab"), DEFAULT_MARKER);
    }
}
