use common::LabelView;

/// Browser-side configuration, taken from the page's query string so a
/// deployment can pick the label view without rebuilding anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowserConfig {
    /// `view=flat|table|raw`, defaults to the editable table
    pub view: LabelView,
    /// `edit_times=1`: raw start/end cells in the table view become
    /// editable inputs instead of read-only text
    pub edit_times: bool,
}

impl BrowserConfig {
    /// Parse from a location query string ("?view=raw&edit_times=1").
    /// Unknown keys and values fall back to the defaults.
    pub fn from_query(query: &str) -> Self {
        let mut config = Self::default();

        for pair in query.trim_start_matches('?').split('&') {
            let (key, value) = match pair.split_once('=') {
                Some((k, v)) => (k, v),
                None => (pair, ""),
            };
            match key {
                "view" => config.view = LabelView::from_str_loose(value),
                "edit_times" => {
                    config.edit_times = matches!(value, "" | "1" | "true" | "yes");
                }
                _ => {}
            }
        }

        config
    }

    pub fn from_window() -> Self {
        let query = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        Self::from_query(&query)
    }
}
