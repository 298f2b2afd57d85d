use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, Request, RequestInit, RequestMode, Response};

/// Fixed location of the labels document, relative to the page origin
pub const LABELS_ENDPOINT: &str = "data/labels.json";

/// Fetch the labels document and hand back its body text. A non-2xx
/// status is an error here; the caller renders it as the inline load
/// failure.
pub async fn fetch_labels() -> Result<String, JsValue> {
    let window = window().ok_or("No window")?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let url = format!(
        "{}/{}",
        window
            .location()
            .origin()
            .map_err(|_| JsValue::from_str("No origin"))?,
        LABELS_ENDPOINT
    );

    let request = Request::new_with_str_and_init(&url, &opts)?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    if !resp.ok() {
        return Err(JsValue::from_str(&format!(
            "HTTP error! status: {}",
            resp.status()
        )));
    }

    let text = JsFuture::from(resp.text()?).await?;
    text.as_string()
        .ok_or_else(|| JsValue::from_str("Labels response body was not text"))
}

/// Human-readable message for a fetch/parse failure
pub fn error_message(err: &JsValue) -> String {
    err.as_string()
        .unwrap_or_else(|| format!("{:?}", err))
}
