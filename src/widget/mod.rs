pub mod help_popup;
pub mod hud_message;
pub mod note_popup;
pub mod notes_sidebar;
pub mod page_view;
pub mod toolbar;

pub use help_popup::HelpPopup;
pub use hud_message::{HudMessage, HudMode};
pub use note_popup::NotePopup;
pub use notes_sidebar::NotesSidebar;
pub use page_view::{FormButton, PageGeometry, PageView};
pub use toolbar::{Toolbar, ToolbarButton, ToolbarRegions};
