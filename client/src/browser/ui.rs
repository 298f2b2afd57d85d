use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Document;

use common::{FieldPath, LabelSection, RecordSession, SessionError};

use crate::browser::config::BrowserConfig;
use crate::browser::state::BrowserState;
use crate::browser::{download, fetch, media, render, utils};

thread_local! {
    static BROWSER_STATE: Rc<RefCell<BrowserState>> =
        Rc::new(RefCell::new(BrowserState::new()));
}

pub fn init_browser_panel() {
    let document = match web_sys::window().and_then(|w| w.document()) {
        Some(d) => d,
        None => return,
    };

    BROWSER_STATE.with(|state| {
        state.borrow_mut().config = BrowserConfig::from_window();
    });

    setup_nav_buttons(&document);
    setup_edit_capture(&document);

    // Initial fetch of the labels document; the interface stays in the
    // empty state until it resolves.
    wasm_bindgen_futures::spawn_local(load_labels());

    utils::log("[Browser] Panel initialized");
}

async fn load_labels() {
    let Some(document) = utils::document() else {
        return;
    };

    let text = match fetch::fetch_labels().await {
        Ok(text) => text,
        Err(e) => {
            let msg = fetch::error_message(&e);
            log::error!("Could not fetch labels: {}", msg);
            show_load_failure(&document, &msg);
            return;
        }
    };

    match RecordSession::from_json_str(&text) {
        Ok(session) => {
            log::info!("Labels data fetched successfully: {} records", session.len());
            BROWSER_STATE.with(|state| {
                state.borrow_mut().session = session;
            });
            display_current();
        }
        Err(e) => {
            log::error!("Could not parse labels: {}", e);
            show_load_failure(&document, &e.to_string());
        }
    }
}

/// LoadFailure path: inline error in the label region, no media
/// player, session stays empty.
fn show_load_failure(document: &Document, message: &str) {
    let _ = render::render_load_error(document, message);
    let _ = media::render_no_media(document);
    set_buttons_enabled(document, false);
    update_position_badge(document, None);
}

/// Render media and labels for the current record, or the explicit
/// no-data state when the set is empty.
fn display_current() {
    let Some(document) = utils::document() else {
        return;
    };

    let shown = BROWSER_STATE.with(|state| {
        let state = state.borrow();
        let record = state.session.current()?;

        if let Err(e) = media::render_media(&document, record.media_ref()) {
            utils::log(&format!("[Browser] media render error: {:?}", e));
        }
        if let Err(e) = render::render_labels(&document, record, &state.config) {
            utils::log(&format!("[Browser] label render error: {:?}", e));
        }
        Some((state.session.position(), state.session.len()))
    });

    match shown {
        Some((position, len)) => {
            set_buttons_enabled(&document, true);
            update_position_badge(&document, Some((position, len)));
            utils::log(&format!("[Browser] Displaying record {} of {}", position + 1, len));
        }
        None => {
            let _ = media::render_no_media(&document);
            let _ = render::render_no_labels(&document);
            set_buttons_enabled(&document, false);
            update_position_badge(&document, None);
        }
    }
}

fn setup_nav_buttons(document: &Document) {
    // Next button
    if let Some(button) = document.get_element_by_id("nextButton") {
        let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            handle_advance();
        }) as Box<dyn FnMut(_)>);

        if let Ok(element) = button.dyn_into::<web_sys::HtmlElement>() {
            let _ = element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    // Download button
    if let Some(button) = document.get_element_by_id("downloadButton") {
        let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            handle_export();
        }) as Box<dyn FnMut(_)>);

        if let Ok(element) = button.dyn_into::<web_sys::HtmlElement>() {
            let _ = element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }
}

/// Delegated input listener on the label container. Every editable
/// cell carries its field path as data attributes; the raw textarea
/// carries data-raw. Edits land in the session's edit buffer the
/// moment they happen, so commit never has to scan the DOM.
fn setup_edit_capture(document: &Document) {
    let Some(container) = document.get_element_by_id("labelContent") else {
        return;
    };

    let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
        let Some(target) = event.target() else {
            return;
        };
        let Ok(element) = target.dyn_into::<web_sys::Element>() else {
            return;
        };

        if element.get_attribute("data-raw").is_some() {
            if let Ok(textarea) = element.dyn_into::<web_sys::HtmlTextAreaElement>() {
                BROWSER_STATE.with(|state| {
                    state.borrow_mut().session.stage_raw_edit(textarea.value());
                });
            }
            return;
        }

        let (Some(section), Some(row), Some(field)) = (
            element.get_attribute("data-section"),
            element.get_attribute("data-row"),
            element.get_attribute("data-field"),
        ) else {
            return;
        };
        let Some(section) = LabelSection::from_str_loose(&section) else {
            return;
        };
        let Ok(row) = row.parse::<usize>() else {
            return;
        };
        let Ok(input) = element.dyn_into::<web_sys::HtmlInputElement>() else {
            return;
        };

        BROWSER_STATE.with(|state| {
            state
                .borrow_mut()
                .session
                .stage_field_edit(FieldPath::new(section, row, field), input.value());
        });
    }) as Box<dyn FnMut(_)>);

    let _ = container.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn handle_advance() {
    let result = BROWSER_STATE.with(|state| state.borrow_mut().session.advance());
    match result {
        Ok(()) => display_current(),
        Err(e) => alert_error(&e),
    }
}

fn handle_export() {
    let Some(document) = utils::document() else {
        return;
    };

    let exported = BROWSER_STATE.with(|state| {
        let mut state = state.borrow_mut();
        if state.session.is_empty() {
            return None;
        }
        Some(state.session.export())
    });

    match exported {
        None => show_transient_notice(&document, "No records loaded."),
        Some(Err(e)) => alert_error(&e),
        Some(Ok(json)) => {
            if let Err(e) = download::download_json(&document, &json, download::EXPORT_FILENAME) {
                utils::log(&format!("[Browser] download failed: {:?}", e));
                show_transient_notice(&document, "Download failed; labels are kept in memory.");
            }
        }
    }
}

/// EditParseFailure path: synchronous alert, transition already
/// cancelled by the session core.
fn alert_error(err: &SessionError) {
    utils::log(&format!("[Browser] {}", err));
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(&err.to_string());
    }
}

/// Transient banner, auto-dismissed after a few seconds
fn show_transient_notice(document: &Document, message: &str) {
    let Some(banner) = document.get_element_by_id("statusBanner") else {
        return;
    };
    banner.set_text_content(Some(message));
    banner.set_class_name("status-banner notice");

    let timeout = gloo_timers::callback::Timeout::new(4_000, move || {
        if let Some(document) = utils::document() {
            if let Some(banner) = document.get_element_by_id("statusBanner") {
                banner.set_text_content(None);
                banner.set_class_name("status-banner");
            }
        }
    });
    timeout.forget();
}

fn set_buttons_enabled(document: &Document, enabled: bool) {
    for id in ["nextButton", "downloadButton"] {
        if let Some(element) = document.get_element_by_id(id) {
            if let Ok(button) = element.dyn_into::<web_sys::HtmlButtonElement>() {
                button.set_disabled(!enabled);
            }
        }
    }
}

fn update_position_badge(document: &Document, shown: Option<(usize, usize)>) {
    if let Some(badge) = document.get_element_by_id("recordPosition") {
        match shown {
            Some((position, len)) => {
                badge.set_text_content(Some(&format!("Record {} / {}", position + 1, len)));
            }
            None => badge.set_text_content(Some("No records")),
        }
    }
}
