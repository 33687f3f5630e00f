pub mod test_helpers {
    use crate::document::{DocumentOpener, DocumentSource};
    use crate::event_source::{Event, KeyCode, KeyModifiers, SimulatedEventSource};
    use crate::main_app::App;
    use crate::settings::Settings;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Builder for creating test scenarios with simulated user input
    pub struct TestScenarioBuilder {
        events: Vec<Event>,
    }

    impl Default for TestScenarioBuilder {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TestScenarioBuilder {
        pub fn new() -> Self {
            Self { events: Vec::new() }
        }

        /// Add a character key press
        pub fn press_char(mut self, c: char) -> Self {
            self.events.push(SimulatedEventSource::char_key(c));
            self
        }

        pub fn press_key(mut self, code: KeyCode) -> Self {
            self.events
                .push(SimulatedEventSource::key_event(code, KeyModifiers::empty()));
            self
        }

        pub fn press_enter(self) -> Self {
            self.press_key(KeyCode::Enter)
        }

        /// Alt+Enter, a line break inside a note draft
        pub fn press_alt_enter(mut self) -> Self {
            self.events.push(SimulatedEventSource::key_event(
                KeyCode::Enter,
                KeyModifiers::ALT,
            ));
            self
        }

        pub fn press_esc(self) -> Self {
            self.press_key(KeyCode::Esc)
        }

        /// Type every character of `text`
        pub fn type_text(mut self, text: &str) -> Self {
            for c in text.chars() {
                self.events.push(SimulatedEventSource::char_key(c));
            }
            self
        }

        /// Navigate to next page n times (press 'l')
        pub fn next_page(mut self, times: usize) -> Self {
            for _ in 0..times {
                self.events.push(SimulatedEventSource::char_key('l'));
            }
            self
        }

        /// Navigate to previous page n times (press 'h')
        pub fn prev_page(mut self, times: usize) -> Self {
            for _ in 0..times {
                self.events.push(SimulatedEventSource::char_key('h'));
            }
            self
        }

        pub fn click(mut self, column: u16, row: u16) -> Self {
            self.events
                .push(SimulatedEventSource::left_click(column, row));
            self
        }

        /// Quit the application (press 'q')
        pub fn quit(mut self) -> Self {
            self.events.push(SimulatedEventSource::char_key('q'));
            self
        }

        /// Build the simulated event source
        pub fn build(self) -> SimulatedEventSource {
            SimulatedEventSource::new(self.events)
        }
    }

    /// Records every document it is asked to open.
    #[derive(Clone, Default)]
    pub struct RecordingOpener {
        pub opened: Rc<RefCell<Vec<DocumentSource>>>,
    }

    impl DocumentOpener for RecordingOpener {
        fn open(&self, source: &DocumentSource) -> anyhow::Result<()> {
            self.opened.borrow_mut().push(source.clone());
            Ok(())
        }
    }

    /// App over `sample.pdf` with default settings and a recording opener
    pub fn create_test_app(page_count: u32) -> (App, RecordingOpener) {
        create_test_app_with(Settings {
            page_count,
            ..Settings::default()
        })
    }

    pub fn create_test_app_with(settings: Settings) -> (App, RecordingOpener) {
        let opener = RecordingOpener::default();
        let app = App::with_opener(
            DocumentSource::parse("/public/sample.pdf"),
            settings,
            Box::new(opener.clone()),
        );
        (app, opener)
    }

    /// Create a test terminal for snapshot testing
    pub fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
        let backend = TestBackend::new(width, height);
        Terminal::new(backend).unwrap()
    }

    pub fn draw(terminal: &mut Terminal<TestBackend>, app: &mut App) {
        terminal.draw(|f| app.draw(f)).unwrap();
    }

    /// Cell on the page surface at the given percentages, from the last draw
    pub fn surface_cell(app: &App, x_pct: f64, y_pct: f64) -> (u16, u16) {
        let surface = app.page_geometry().surface;
        let column = surface.x + (x_pct / 100.0 * f64::from(surface.width)).round() as u16;
        let row = surface.y + (y_pct / 100.0 * f64::from(surface.height)).round() as u16;
        (column, row)
    }

    /// Capture the current terminal buffer as a string
    pub fn capture_terminal_state(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut lines = Vec::new();

        for y in 0..buffer.area.height {
            let mut line = String::new();
            for x in 0..buffer.area.width {
                line.push_str(buffer[(x, y)].symbol());
            }
            // Trim trailing whitespace from each line
            lines.push(line.trim_end().to_string());
        }

        // Remove trailing empty lines
        while lines.last().map(|l| l.is_empty()).unwrap_or(false) {
            lines.pop();
        }

        lines.join("\n")
    }
}
