use crate::notes::NotePosition;
use log::debug;

/// Bounds of the surface that receives placement clicks, in the same units
/// as the click coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SurfaceRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

impl From<ratatui::layout::Rect> for SurfaceRect {
    fn from(rect: ratatui::layout::Rect) -> Self {
        Self::new(
            f64::from(rect.x),
            f64::from(rect.y),
            f64::from(rect.width),
            f64::from(rect.height),
        )
    }
}

/// Converts a click into a percentage position on `surface`.
///
/// Returns `None` for degenerate surfaces or non-finite results.
pub fn normalize_click(client_x: f64, client_y: f64, surface: SurfaceRect) -> Option<NotePosition> {
    if surface.width == 0.0 || surface.height == 0.0 {
        return None;
    }

    let x = 100.0 * (client_x - surface.left) / surface.width;
    let y = 100.0 * (client_y - surface.top) / surface.height;
    if !x.is_finite() || !y.is_finite() {
        return None;
    }

    Some(NotePosition::new(x, y))
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Placement {
    #[default]
    Idle,
    /// Placement mode is on; the next surface click stages a draft.
    Armed,
    Drafting { position: NotePosition, text: String },
}

impl Placement {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while placement mode is on, with or without a draft.
    pub fn is_active(&self) -> bool {
        !matches!(self, Placement::Idle)
    }

    pub fn is_drafting(&self) -> bool {
        matches!(self, Placement::Drafting { .. })
    }

    pub fn draft_position(&self) -> Option<NotePosition> {
        match self {
            Placement::Drafting { position, .. } => Some(*position),
            _ => None,
        }
    }

    pub fn draft_text(&self) -> Option<&str> {
        match self {
            Placement::Drafting { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Toolbar toggle. Turning placement off discards any draft.
    pub fn toggle(&mut self) {
        *self = match self {
            Placement::Idle => Placement::Armed,
            Placement::Armed | Placement::Drafting { .. } => Placement::Idle,
        };
    }

    /// Handles a click on the surface. Returns true if a draft was staged.
    ///
    /// A click while a draft is open moves it and clears its text.
    pub fn click(&mut self, client_x: f64, client_y: f64, surface: SurfaceRect) -> bool {
        if !self.is_active() {
            return false;
        }

        let Some(position) = normalize_click(client_x, client_y, surface) else {
            debug!("Ignoring click on degenerate surface {surface:?}");
            return false;
        };

        *self = Placement::Drafting {
            position,
            text: String::new(),
        };
        true
    }

    pub fn insert_char(&mut self, c: char) {
        if let Placement::Drafting { text, .. } = self {
            text.push(c);
        }
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    pub fn backspace(&mut self) {
        if let Placement::Drafting { text, .. } = self {
            text.pop();
        }
    }

    pub fn cancel(&mut self) {
        *self = Placement::Idle;
    }

    /// Ends placement mode. Yields the staged position and trimmed text when
    /// a non-empty draft was open.
    pub fn commit(&mut self) -> Option<(NotePosition, String)> {
        let previous = std::mem::take(self);
        match previous {
            Placement::Drafting { position, text } => {
                let text = text.trim();
                if text.is_empty() {
                    None
                } else {
                    Some((position, text.to_string()))
                }
            }
            _ => None,
        }
    }
}
