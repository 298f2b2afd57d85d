use common::RecordSession;

use crate::browser::config::BrowserConfig;

/// All mutable browser-side state: the record session plus the view
/// configuration. Held in one place and passed to the render/handler
/// functions, never spread across module globals.
pub struct BrowserState {
    pub session: RecordSession,
    pub config: BrowserConfig,
}

impl BrowserState {
    pub fn new() -> Self {
        Self {
            session: RecordSession::default(),
            config: BrowserConfig::default(),
        }
    }
}

impl Default for BrowserState {
    fn default() -> Self {
        Self::new()
    }
}
