// Export modules for use in tests
pub mod document;
pub mod event_source;
pub mod main_app;
pub mod navigation;
pub mod notes;
pub mod panic_handler;
pub mod placement;
pub mod settings;
pub mod theme;
pub mod viewer;
pub mod widget;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export main app components
pub use main_app::{App, AppAction, run_app_with_event_source};
