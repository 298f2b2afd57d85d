use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::Document;

use common::{classify_media, MediaClass};

/// Replace the media region with the player for the given reference:
/// exactly one `<video>` or `<audio>` element with native controls on
/// success, zero plus an inline message for an unsupported type.
pub fn render_media(document: &Document, media_path: Option<&str>) -> Result<(), JsValue> {
    let container = document
        .get_element_by_id("mediaPlayerContainer")
        .ok_or("mediaPlayerContainer not found")?;
    container.set_inner_html("");

    let Some(path) = media_path else {
        append_message(document, &container, "No media reference in record.")?;
        return Ok(());
    };

    let class = classify_media(path);
    let kind = match &class {
        MediaClass::Supported { kind, .. } => *kind,
        MediaClass::Unsupported { extension } => {
            append_message(
                document,
                &container,
                &format!("Unsupported media type: {}", extension),
            )?;
            return Ok(());
        }
    };
    let mime = class.mime_type().unwrap_or_default();

    let element = document.create_element(kind.tag_name())?;
    element.set_class_name("media-player");
    let player: web_sys::HtmlMediaElement = element.dyn_into()?;
    player.set_controls(true);

    let source: web_sys::HtmlSourceElement = document.create_element("source")?.dyn_into()?;
    source.set_src(path);
    source.set_type(&mime);

    player.append_child(&source)?;
    container.append_child(&player)?;
    player.load();

    Ok(())
}

/// Clear the media region to the empty-set message
pub fn render_no_media(document: &Document) -> Result<(), JsValue> {
    let container = document
        .get_element_by_id("mediaPlayerContainer")
        .ok_or("mediaPlayerContainer not found")?;
    container.set_inner_html("");
    append_message(document, &container, "No media to display.")
}

fn append_message(
    document: &Document,
    container: &web_sys::Element,
    text: &str,
) -> Result<(), JsValue> {
    let p = document.create_element("p")?;
    p.set_class_name("media-message");
    p.set_text_content(Some(text));
    container.append_child(&p)?;
    Ok(())
}
