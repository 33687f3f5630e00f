use chrono::{DateTime, Utc};
use log::debug;
use std::fmt;

/// Stable identity of a note within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteId(pub u64);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Position on a page as percentages of the page surface, measured from its
/// top-left corner. Both components stay within `0.0..=100.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NotePosition {
    pub x: f64,
    pub y: f64,
}

impl NotePosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: clamp_percent(x),
            y: clamp_percent(y),
        }
    }
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub id: NoteId,
    pub page: u32,
    pub position: NotePosition,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Append-only, insertion-ordered collection of notes.
#[derive(Debug)]
pub struct NoteStore {
    notes: Vec<Note>,
    next_id: u64,
}

impl Default for NoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteStore {
    pub fn new() -> Self {
        Self {
            notes: Vec::new(),
            next_id: 1,
        }
    }

    /// Appends a note. Returns `None` without touching the store when the
    /// text is empty after trimming.
    pub fn add(&mut self, page: u32, position: NotePosition, text: &str) -> Option<&Note> {
        let text = text.trim();
        if text.is_empty() {
            debug!("Rejected empty note on page {page}");
            return None;
        }

        let id = NoteId(self.next_id);
        self.next_id += 1;

        debug!(
            "Adding note {id} on page {page} at ({:.1}, {:.1})",
            position.x, position.y
        );
        self.notes.push(Note {
            id,
            page,
            position,
            text: text.to_string(),
            created_at: Utc::now(),
        });
        self.notes.last()
    }

    pub fn notes_for_page(&self, page: u32) -> impl Iterator<Item = &Note> + '_ {
        self.notes.iter().filter(move |note| note.page == page)
    }

    pub fn all(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
