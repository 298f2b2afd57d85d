use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::Document;

/// Fixed name of the exported label set
pub const EXPORT_FILENAME: &str = "edited_labels.json";

/// Offer a JSON document as a client-side file download: blob, object
/// URL, programmatic anchor click. No server round-trip.
pub fn download_json(document: &Document, json: &str, filename: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(json));

    let props = web_sys::BlobPropertyBag::new();
    props.set_type("application/json");

    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &props)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let anchor: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    web_sys::Url::revoke_object_url(&url)?;
    Ok(())
}
