use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use log::{debug, error, info};
use ratatui::{
    Frame, Terminal,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::Paragraph,
};

use crate::document::{DocumentOpener, DocumentSource, SystemOpener};
use crate::event_source::EventSource;
use crate::notes::NoteId;
use crate::settings::Settings;
use crate::theme::{Base16Palette, ThemeId};
use crate::viewer::AnnotatedViewer;
use crate::widget::{
    FormButton, HelpPopup, HudMessage, HudMode, NotePopup, NotesSidebar, PageGeometry, PageView,
    Toolbar, ToolbarButton, ToolbarRegions,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Quit,
}

pub struct App {
    viewer: AnnotatedViewer,
    settings: Settings,
    palette: &'static Base16Palette,
    opener: Box<dyn DocumentOpener>,
    sidebar: NotesSidebar,
    show_help: bool,
    /// Note whose full text is shown after a marker click.
    open_note: Option<NoteId>,
    hud: Option<HudMessage>,
    page_geometry: PageGeometry,
    toolbar_regions: ToolbarRegions,
}

impl App {
    pub fn new(source: DocumentSource, settings: Settings) -> Self {
        Self::with_opener(source, settings, Box::new(SystemOpener))
    }

    pub fn with_opener(
        source: DocumentSource,
        settings: Settings,
        opener: Box<dyn DocumentOpener>,
    ) -> Self {
        info!(
            "Opening {source} with {} pages",
            settings.page_count.max(1)
        );
        Self {
            viewer: AnnotatedViewer::new(source, settings.page_count),
            palette: ThemeId::from_name(&settings.theme).palette(),
            settings,
            opener,
            sidebar: NotesSidebar::new(),
            show_help: false,
            open_note: None,
            hud: None,
            page_geometry: PageGeometry::default(),
            toolbar_regions: ToolbarRegions::default(),
        }
    }

    pub fn viewer(&self) -> &AnnotatedViewer {
        &self.viewer
    }

    pub fn page_geometry(&self) -> &PageGeometry {
        &self.page_geometry
    }

    pub fn toolbar_regions(&self) -> &ToolbarRegions {
        &self.toolbar_regions
    }

    pub fn hud(&self) -> Option<&HudMessage> {
        self.hud.as_ref()
    }

    pub fn is_help_visible(&self) -> bool {
        self.show_help
    }

    pub fn open_note(&self) -> Option<NoteId> {
        self.open_note
    }

    fn show_hud(&mut self, message: impl Into<String>, mode: HudMode) {
        let duration = Duration::from_secs(self.settings.hud_seconds);
        self.hud = Some(HudMessage::new(message, duration, mode));
    }

    /// Drops expired status messages. Returns true if one was removed.
    pub fn tick(&mut self) -> bool {
        if self.hud.as_ref().is_some_and(HudMessage::is_expired) {
            self.hud = None;
            return true;
        }
        false
    }

    pub fn handle_event(&mut self, event: &Event) -> Option<AppAction> {
        match event {
            Event::Key(key) => self.handle_key_event(*key),
            Event::Mouse(mouse) => {
                self.handle_mouse_event(*mouse);
                None
            }
            _ => None,
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<AppAction> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.code == KeyCode::Char('c')
            && key.modifiers.contains(KeyModifiers::CONTROL)
            && !is_text_input(key.modifiers)
        {
            return Some(AppAction::Quit);
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return None;
        }

        if self.open_note.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                self.open_note = None;
            }
            return None;
        }

        if self.viewer.placement().is_drafting() {
            self.handle_draft_key(key);
            return None;
        }

        if self.viewer.is_sidebar_open() && self.handle_sidebar_key(key) {
            return None;
        }

        match key.code {
            KeyCode::Char('q') => return Some(AppAction::Quit),
            KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown => {
                self.viewer.next_page();
            }
            KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => {
                self.viewer.previous_page();
            }
            KeyCode::Char('n') => self.toggle_placement(),
            KeyCode::Esc if self.viewer.placement().is_active() => self.toggle_placement(),
            KeyCode::Char('s') | KeyCode::Tab => self.toggle_sidebar(),
            KeyCode::Char('o') => self.open_document(),
            KeyCode::Char('?') => self.show_help = true,
            _ => {}
        }
        None
    }

    fn handle_draft_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.viewer.cancel_draft();
                debug!("Note draft cancelled");
            }
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
                self.viewer.draft_insert_newline();
            }
            KeyCode::Enter => self.commit_draft(),
            KeyCode::Backspace => self.viewer.draft_backspace(),
            KeyCode::Char(c) if is_text_input(key.modifiers) => {
                self.viewer.draft_insert_char(c);
            }
            _ => {}
        }
    }

    /// Returns true when the key was consumed by the sidebar.
    fn handle_sidebar_key(&mut self, key: KeyEvent) -> bool {
        let len = self.viewer.notes().len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.sidebar.move_selection_down(len),
            KeyCode::Char('k') | KeyCode::Up => self.sidebar.move_selection_up(len),
            KeyCode::Enter => {
                if let Some(id) = self.sidebar.selected_note(self.viewer.notes()) {
                    self.viewer.select_note(id);
                }
            }
            KeyCode::Esc => self.viewer.close_sidebar(),
            _ => return false,
        }
        true
    }

    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) || self.show_help {
            return;
        }
        if self.open_note.take().is_some() {
            return;
        }
        let (column, row) = (mouse.column, mouse.row);

        if let Some(button) = self.toolbar_regions.hit(column, row) {
            self.press_toolbar_button(button);
            return;
        }

        if self.viewer.is_sidebar_open() && self.sidebar.contains(column, row) {
            if let Some(id) = self.sidebar.handle_mouse_click(column, row, self.viewer.notes()) {
                self.viewer.select_note(id);
            }
            return;
        }

        match self.page_geometry.form_button_at(column, row) {
            Some(FormButton::Save) => {
                self.commit_draft();
                return;
            }
            Some(FormButton::Cancel) => {
                self.viewer.cancel_draft();
                debug!("Note draft cancelled");
                return;
            }
            None => {}
        }

        // The draft form sits on top of the page and swallows its own clicks
        if self.page_geometry.form_contains(column, row) {
            return;
        }

        if !self.viewer.placement().is_active() {
            if let Some(id) = self.page_geometry.marker_at(column, row) {
                debug!("Showing note {id}");
                self.open_note = Some(id);
            }
            return;
        }

        if self.page_geometry.surface_contains(column, row) {
            let surface = self.page_geometry.surface.into();
            if self
                .viewer
                .click_surface(f64::from(column), f64::from(row), surface)
            {
                debug!("Draft staged at cell ({column}, {row})");
            }
        }
    }

    fn press_toolbar_button(&mut self, button: ToolbarButton) {
        match button {
            ToolbarButton::Sidebar => self.toggle_sidebar(),
            ToolbarButton::Placement => self.toggle_placement(),
            ToolbarButton::PreviousPage => {
                self.viewer.previous_page();
            }
            ToolbarButton::NextPage => {
                self.viewer.next_page();
            }
        }
    }

    fn toggle_placement(&mut self) {
        self.viewer.toggle_placement();
        if self.viewer.placement().is_active() {
            self.show_hud("Click on the page to place a note", HudMode::Normal);
        } else {
            self.hud = None;
        }
    }

    fn toggle_sidebar(&mut self) {
        self.viewer.toggle_sidebar();
        self.sidebar.sync(self.viewer.notes().len());
    }

    fn commit_draft(&mut self) {
        match self.viewer.commit_draft() {
            Some(_) => {
                let message = format!("Note added to page {}", self.viewer.current_page());
                self.show_hud(message, HudMode::Normal);
            }
            None => self.show_hud("Empty note discarded", HudMode::Normal),
        }
    }

    fn open_document(&mut self) {
        let source = self.viewer.source().clone();
        match self.opener.open(&source) {
            Ok(()) => {
                info!("Handed {source} to the system viewer");
                self.show_hud(format!("Opened {}", source.display_name()), HudMode::Normal);
            }
            Err(e) => {
                error!("Failed to open {source}: {e:#}");
                self.show_hud(format!("Could not open document: {e}"), HudMode::Error);
            }
        }
    }

    pub fn draw(&mut self, f: &mut Frame) {
        let palette = self.palette;
        let screen = f.area();
        let [main, status] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(screen);

        let content = if self.viewer.is_sidebar_open() {
            let width = self.settings.sidebar_width.min(main.width / 2);
            let [sidebar, content] =
                Layout::horizontal([Constraint::Length(width), Constraint::Min(0)]).areas(main);
            self.sidebar.render(
                f,
                sidebar,
                self.viewer.notes(),
                self.viewer.current_page(),
                palette,
            );
            content
        } else {
            main
        };

        let [toolbar, page] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(content);
        self.toolbar_regions = Toolbar::new(&self.viewer, palette).render(f, toolbar);
        self.page_geometry =
            PageView::new(&self.viewer, palette, &self.settings.marker).render(f, page);

        self.render_status(f, status);

        if let Some(note) = self.open_note.and_then(|id| self.viewer.note(id)) {
            NotePopup::render(f, screen, note, palette);
        }

        if self.show_help {
            HelpPopup::render(f, screen, palette);
        }
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        if let Some(hud) = self.hud.as_ref().filter(|hud| !hud.is_expired()) {
            f.render_widget(Paragraph::new(hud.styled_line(self.palette)), area);
            return;
        }

        let hints = if self.open_note.is_some() {
            "Esc: Close note | q: Close"
        } else if self.viewer.placement().is_drafting() {
            "Type note | Enter: Save | Alt+Enter: New line | Esc: Cancel"
        } else if self.viewer.placement().is_active() {
            "Click the page to place the note | n/Esc: Cancel"
        } else if self.viewer.is_sidebar_open() {
            "j/k: Select | Enter: Go to note | Esc: Close | q: Quit"
        } else {
            "h/l: Page | n: Add note | s: Notes | o: Open | click marker: Read | ?: Help | q: Quit"
        };
        f.render_widget(
            Paragraph::new(Line::from(hints)).style(Style::default().fg(self.palette.base_03)),
            area,
        );
    }
}

/// Printable input for the draft. AltGr arrives as Ctrl+Alt on Windows.
fn is_text_input(modifiers: KeyModifiers) -> bool {
    let ctrl_alt = KeyModifiers::CONTROL | KeyModifiers::ALT;
    !modifiers.intersects(ctrl_alt) || modifiers.contains(ctrl_alt)
}

pub fn run_app_with_event_source<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_source: &mut dyn EventSource,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let tick_rate = Duration::from_millis(250);

    loop {
        terminal.draw(|f| app.draw(f))?;

        if event_source.poll(tick_rate)? {
            let event = event_source.read()?;
            if app.handle_event(&event) == Some(AppAction::Quit) {
                info!("Quit requested");
                return Ok(());
            }
        }

        app.tick();
    }
}
