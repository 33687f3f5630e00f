use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use crate::theme::Base16Palette;
use crate::viewer::AnnotatedViewer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarButton {
    Sidebar,
    Placement,
    PreviousPage,
    NextPage,
}

/// Screen regions of the clickable toolbar buttons from the last render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolbarRegions {
    buttons: Vec<(ToolbarButton, Rect)>,
}

impl ToolbarRegions {
    pub fn hit(&self, column: u16, row: u16) -> Option<ToolbarButton> {
        self.buttons
            .iter()
            .find(|(_, rect)| rect.contains(Position::new(column, row)))
            .map(|(button, _)| *button)
    }

    pub fn region(&self, button: ToolbarButton) -> Option<Rect> {
        self.buttons
            .iter()
            .find(|(candidate, _)| *candidate == button)
            .map(|(_, rect)| *rect)
    }
}

pub struct Toolbar<'a> {
    viewer: &'a AnnotatedViewer,
    palette: &'a Base16Palette,
}

impl<'a> Toolbar<'a> {
    pub fn new(viewer: &'a AnnotatedViewer, palette: &'a Base16Palette) -> Self {
        Self { viewer, palette }
    }

    /// Builds the toolbar line for `area` and records where each button ends
    /// up.
    pub fn layout(&self, area: Rect) -> (Line<'static>, ToolbarRegions) {
        let palette = self.palette;
        let button = Style::default().fg(palette.base_05).bg(palette.base_01);
        let active = Style::default()
            .fg(palette.base_00)
            .bg(palette.base_0d)
            .add_modifier(Modifier::BOLD);
        let disabled = Style::default().fg(palette.base_03);
        let plain = Style::default().fg(palette.base_05);

        let navigator = self.viewer.navigator();
        let placement_label = if self.viewer.placement().is_active() {
            " × Cancel Note "
        } else {
            " + Add Note "
        };

        let segments: Vec<(Option<ToolbarButton>, String, Style)> = vec![
            (
                Some(ToolbarButton::Sidebar),
                " ☰ Notes ".to_string(),
                if self.viewer.is_sidebar_open() {
                    active
                } else {
                    button
                },
            ),
            (None, " ".to_string(), plain),
            (
                Some(ToolbarButton::Placement),
                placement_label.to_string(),
                if self.viewer.placement().is_active() {
                    active
                } else {
                    button
                },
            ),
            (None, "  ".to_string(), plain),
            (
                Some(ToolbarButton::PreviousPage),
                " ‹ ".to_string(),
                if navigator.has_previous() {
                    button
                } else {
                    disabled
                },
            ),
            (
                None,
                format!(" Page {} of {} ", navigator.current(), navigator.total()),
                plain,
            ),
            (
                Some(ToolbarButton::NextPage),
                " › ".to_string(),
                if navigator.has_next() { button } else { disabled },
            ),
            (None, "  ".to_string(), plain),
            (
                None,
                self.viewer.source().display_name(),
                Style::default().fg(palette.base_03),
            ),
        ];

        let mut regions = ToolbarRegions::default();
        let mut spans = Vec::with_capacity(segments.len());
        let mut x = area.x;
        let right = area.x.saturating_add(area.width);

        for (kind, text, style) in segments {
            let width = text.width() as u16;
            if let Some(kind) = kind {
                if x < right {
                    let visible = width.min(right - x);
                    regions
                        .buttons
                        .push((kind, Rect::new(x, area.y, visible, 1)));
                }
            }
            x = x.saturating_add(width);
            spans.push(Span::styled(text, style));
        }

        (Line::from(spans), regions)
    }

    pub fn render(&self, f: &mut Frame, area: Rect) -> ToolbarRegions {
        let (line, regions) = self.layout(area);
        f.render_widget(Paragraph::new(line), area);
        regions
    }
}
