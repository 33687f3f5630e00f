use crate::document::DocumentSource;
use crate::navigation::PageNavigator;
use crate::notes::{Note, NoteId, NoteStore};
use crate::placement::{Placement, SurfaceRect};
use log::{debug, info};

/// One viewing session: the document, where the reader is in it, the notes
/// attached so far and the in-progress placement.
///
/// Every operation is total. Refused requests leave the session untouched
/// and are reported through the return value only.
#[derive(Debug)]
pub struct AnnotatedViewer {
    source: DocumentSource,
    navigator: PageNavigator,
    notes: NoteStore,
    placement: Placement,
    sidebar_open: bool,
}

impl AnnotatedViewer {
    pub fn new(source: DocumentSource, total_pages: u32) -> Self {
        Self {
            source,
            navigator: PageNavigator::new(total_pages),
            notes: NoteStore::new(),
            placement: Placement::new(),
            sidebar_open: false,
        }
    }

    pub fn source(&self) -> &DocumentSource {
        &self.source
    }

    pub fn navigator(&self) -> &PageNavigator {
        &self.navigator
    }

    pub fn current_page(&self) -> u32 {
        self.navigator.current()
    }

    pub fn total_pages(&self) -> u32 {
        self.navigator.total()
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn is_sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn next_page(&mut self) -> bool {
        self.navigator.next()
    }

    pub fn previous_page(&mut self) -> bool {
        self.navigator.previous()
    }

    pub fn jump_to(&mut self, page: u32) -> bool {
        self.navigator.jump_to(page)
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }

    pub fn toggle_placement(&mut self) {
        self.placement.toggle();
        debug!("Placement mode active: {}", self.placement.is_active());
    }

    /// Forwards a click on the page surface. Clicks only matter while
    /// placement mode is on.
    pub fn click_surface(&mut self, client_x: f64, client_y: f64, surface: SurfaceRect) -> bool {
        self.placement.click(client_x, client_y, surface)
    }

    pub fn draft_insert_char(&mut self, c: char) {
        self.placement.insert_char(c);
    }

    pub fn draft_insert_newline(&mut self) {
        self.placement.insert_newline();
    }

    pub fn draft_backspace(&mut self) {
        self.placement.backspace();
    }

    pub fn cancel_draft(&mut self) {
        self.placement.cancel();
    }

    /// Turns the open draft into a note on the current page. Placement mode
    /// ends whether or not a note was created.
    pub fn commit_draft(&mut self) -> Option<NoteId> {
        let (position, text) = self.placement.commit()?;
        let page = self.navigator.current();
        let note = self.notes.add(page, position, &text)?;
        info!("Added note {} on page {}", note.id, note.page);
        Some(note.id)
    }

    /// Jumps to the page of the selected note and closes the sidebar.
    pub fn select_note(&mut self, id: NoteId) -> bool {
        let Some(page) = self.notes.get(id).map(|note| note.page) else {
            debug!("Selected unknown note {id}");
            return false;
        };
        let jumped = self.navigator.jump_to(page);
        self.sidebar_open = false;
        jumped
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.get(id)
    }

    pub fn notes(&self) -> &[Note] {
        self.notes.all()
    }

    pub fn notes_on_current_page(&self) -> impl Iterator<Item = &Note> + '_ {
        self.notes.notes_for_page(self.navigator.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::NotePosition;

    fn viewer() -> AnnotatedViewer {
        AnnotatedViewer::new(DocumentSource::parse("/public/sample.pdf"), 10)
    }

    fn surface() -> SurfaceRect {
        SurfaceRect::new(0.0, 0.0, 100.0, 100.0)
    }

    #[test]
    fn committing_a_draft_adds_note_on_current_page() {
        let mut viewer = viewer();
        viewer.jump_to(4);
        viewer.toggle_placement();
        assert!(viewer.click_surface(30.0, 40.0, surface()));
        for c in "meeting notes".chars() {
            viewer.draft_insert_char(c);
        }

        let id = viewer.commit_draft().unwrap();
        assert_eq!(viewer.placement(), &Placement::Idle);

        let notes = viewer.notes();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, id);
        assert_eq!(notes[0].page, 4);
        assert_eq!(notes[0].position, NotePosition { x: 30.0, y: 40.0 });
        assert_eq!(notes[0].text, "meeting notes");
    }

    #[test]
    fn empty_commit_leaves_store_untouched() {
        let mut viewer = viewer();
        viewer.toggle_placement();
        viewer.click_surface(10.0, 10.0, surface());

        assert!(viewer.commit_draft().is_none());
        assert!(viewer.notes().is_empty());
        assert!(!viewer.placement().is_active());
    }

    #[test]
    fn clicks_are_ignored_outside_placement_mode() {
        let mut viewer = viewer();
        assert!(!viewer.click_surface(10.0, 10.0, surface()));
        assert!(!viewer.placement().is_drafting());
    }

    #[test]
    fn placement_survives_page_changes() {
        let mut viewer = viewer();
        viewer.toggle_placement();
        viewer.next_page();
        assert!(viewer.placement().is_active());
    }

    #[test]
    fn selecting_a_note_jumps_and_closes_sidebar() {
        let mut viewer = viewer();
        viewer.jump_to(7);
        viewer.toggle_placement();
        viewer.click_surface(50.0, 50.0, surface());
        viewer.draft_insert_char('x');
        let id = viewer.commit_draft().unwrap();

        viewer.jump_to(3);
        viewer.toggle_sidebar();
        assert!(viewer.is_sidebar_open());

        assert!(viewer.select_note(id));
        assert_eq!(viewer.current_page(), 7);
        assert!(!viewer.is_sidebar_open());
    }

    #[test]
    fn selecting_unknown_note_is_a_no_op() {
        let mut viewer = viewer();
        viewer.toggle_sidebar();
        assert!(!viewer.select_note(NoteId(42)));
        assert!(viewer.is_sidebar_open());
        assert_eq!(viewer.current_page(), 1);
    }

    #[test]
    fn current_page_notes_follow_navigation() {
        let mut viewer = viewer();
        for page in [1, 2, 1] {
            viewer.jump_to(page);
            viewer.toggle_placement();
            viewer.click_surface(5.0, 5.0, surface());
            viewer.draft_insert_char('n');
            viewer.commit_draft();
        }

        viewer.jump_to(1);
        assert_eq!(viewer.notes_on_current_page().count(), 2);
        viewer.next_page();
        assert_eq!(viewer.notes_on_current_page().count(), 1);
        viewer.next_page();
        assert_eq!(viewer.notes_on_current_page().count(), 0);
    }
}
