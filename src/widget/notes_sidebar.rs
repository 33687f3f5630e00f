use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::notes::{Note, NoteId};
use crate::theme::Base16Palette;

/// Columns taken by the list's highlight symbol.
const HIGHLIGHT_WIDTH: u16 = 2;

/// Collapsible list of every note in the session.
#[derive(Debug, Default)]
pub struct NotesSidebar {
    list_state: ListState,
    /// Inner list area from the last render, used for mouse hit-testing.
    list_area: Option<Rect>,
    /// Rows taken by each entry in the last render.
    item_heights: Vec<u16>,
}

impl NotesSidebar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Keeps the selection valid for a list of `len` notes.
    pub fn sync(&mut self, len: usize) {
        match (self.list_state.selected(), len) {
            (_, 0) => self.list_state.select(None),
            (None, _) => self.list_state.select(Some(0)),
            (Some(i), len) if i >= len => self.list_state.select(Some(len - 1)),
            _ => {}
        }
    }

    pub fn move_selection_down(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    pub fn move_selection_up(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let previous = self.list_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.list_state.select(Some(previous));
    }

    pub fn selected_note(&self, notes: &[Note]) -> Option<NoteId> {
        self.list_state
            .selected()
            .and_then(|i| notes.get(i))
            .map(|note| note.id)
    }

    /// Maps a click to the note under it, selecting it.
    pub fn handle_mouse_click(&mut self, column: u16, row: u16, notes: &[Note]) -> Option<NoteId> {
        let area = self.list_area?;
        if !area.contains(Position::new(column, row)) {
            return None;
        }
        let index = item_at_row(&self.item_heights, self.list_state.offset(), area.y, row)?;
        let note = notes.get(index)?;
        self.list_state.select(Some(index));
        Some(note.id)
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.list_area
            .is_some_and(|area| area.contains(Position::new(column, row)))
    }

    pub fn render(
        &mut self,
        f: &mut Frame,
        area: Rect,
        notes: &[Note],
        current_page: u32,
        palette: &Base16Palette,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.base_03))
            .title(Span::styled(
                format!(" Notes ({}) ", notes.len()),
                Style::default()
                    .fg(palette.base_0a)
                    .add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        self.list_area = Some(inner);
        self.item_heights.clear();

        if notes.is_empty() {
            let hint = Paragraph::new(vec![
                Line::from("No notes yet."),
                Line::from(""),
                Line::from("Press n, then click on the page to add one."),
            ])
            .style(Style::default().fg(palette.base_03))
            .wrap(Wrap { trim: true })
            .block(block);
            f.render_widget(hint, area);
            return;
        }

        self.sync(notes.len());
        let text_width = usize::from(inner.width.saturating_sub(HIGHLIGHT_WIDTH)).max(1);

        let items: Vec<ListItem> = notes
            .iter()
            .map(|note| {
                let label_style = if note.page == current_page {
                    Style::default()
                        .fg(palette.base_0b)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                        .fg(palette.base_04)
                        .add_modifier(Modifier::BOLD)
                };
                let mut lines = vec![Line::from(Span::styled(
                    format!("Page {}", note.page),
                    label_style,
                ))];
                lines.extend(textwrap::wrap(&note.text, text_width).into_iter().map(|l| {
                    Line::from(Span::styled(
                        l.into_owned(),
                        Style::default().fg(palette.base_05),
                    ))
                }));
                self.item_heights.push(lines.len() as u16);
                ListItem::new(lines)
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(palette.base_02))
            .highlight_symbol("▌ ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }
}

/// Index of the entry drawn at `row`, given entry heights and the first
/// visible entry.
fn item_at_row(heights: &[u16], offset: usize, top: u16, row: u16) -> Option<usize> {
    let mut item_top = top;
    for (index, height) in heights.iter().enumerate().skip(offset) {
        let item_bottom = item_top.saturating_add(*height);
        if (item_top..item_bottom).contains(&row) {
            return Some(index);
        }
        item_top = item_bottom;
    }
    None
}
