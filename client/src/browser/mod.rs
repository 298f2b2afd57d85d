//! Record-browsing UI: step through annotated media records, play the
//! media, edit label fields in place, export the edited set.

pub mod config;
pub mod download;
pub mod fetch;
pub mod media;
pub mod render;
pub mod state;
pub mod ui;
pub mod utils;

// Re-export main entry points
pub use state::BrowserState;
pub use ui::init_browser_panel;
