use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use common::{flat_items, section_heading, table_sections, FlatItem, LabelView, Record, TableSection};

use crate::browser::config::BrowserConfig;

/// Replace the label region with the configured view of the record.
/// Editable cells are stamped with their field path
/// (data-section/data-row/data-field); the raw textarea carries
/// data-raw. The delegated input listener in ui.rs reads those
/// attributes to feed the edit buffer.
pub fn render_labels(
    document: &Document,
    record: &Record,
    config: &BrowserConfig,
) -> Result<(), JsValue> {
    let container = label_container(document)?;
    container.set_inner_html("");

    match config.view {
        LabelView::Flat => render_flat(document, &container, record),
        LabelView::Table => render_table(document, &container, record, config.edit_times),
        LabelView::Raw => render_raw(document, &container, record),
    }
}

/// Clear the label region to the empty-set message
pub fn render_no_labels(document: &Document) -> Result<(), JsValue> {
    let container = label_container(document)?;
    container.set_inner_html("");
    let p = document.create_element("p")?;
    p.set_class_name("label-message");
    p.set_text_content(Some("No labels to display."));
    container.append_child(&p)?;
    Ok(())
}

/// Inline load-failure message, rendered in place of label content
pub fn render_load_error(document: &Document, message: &str) -> Result<(), JsValue> {
    let container = label_container(document)?;
    container.set_inner_html("");
    let p = document.create_element("p")?;
    p.set_class_name("error-text");
    p.set_text_content(Some(&format!("Error loading labels: {}", message)));
    container.append_child(&p)?;
    Ok(())
}

fn label_container(document: &Document) -> Result<Element, JsValue> {
    document
        .get_element_by_id("labelContent")
        .ok_or_else(|| JsValue::from_str("labelContent not found"))
}

fn render_flat(document: &Document, container: &Element, record: &Record) -> Result<(), JsValue> {
    let list = document.create_element("ul")?;
    list.set_class_name("label-list");

    for item in flat_items(record) {
        match item {
            FlatItem::Scalar { key, value } => {
                let li = document.create_element("li")?;
                let key_span = document.create_element("span")?;
                key_span.set_class_name("label-key");
                key_span.set_text_content(Some(&format!("{}: ", key)));
                let value_span = document.create_element("span")?;
                value_span.set_class_name("label-value");
                value_span.set_text_content(Some(&value));
                li.append_child(&key_span)?;
                li.append_child(&value_span)?;
                list.append_child(&li)?;
            }
            FlatItem::List { key, rows } => {
                append_group_heading(document, &list, &key)?;
                let sublist = document.create_element("ul")?;
                sublist.set_class_name("label-sublist");
                for row in rows {
                    let li = document.create_element("li")?;
                    for (field, value) in row {
                        let span = document.create_element("span")?;
                        span.set_text_content(Some(&format!("{}: {} ", field, value)));
                        li.append_child(&span)?;
                    }
                    sublist.append_child(&li)?;
                }
                list.append_child(&sublist)?;
            }
            FlatItem::Nested { key, entries } => {
                append_group_heading(document, &list, &key)?;
                let sublist = document.create_element("ul")?;
                sublist.set_class_name("label-sublist");
                for (field, value) in entries {
                    let li = document.create_element("li")?;
                    let key_span = document.create_element("span")?;
                    key_span.set_class_name("label-key");
                    key_span.set_text_content(Some(&format!("{}: ", field)));
                    let value_span = document.create_element("span")?;
                    value_span.set_text_content(Some(&value));
                    li.append_child(&key_span)?;
                    li.append_child(&value_span)?;
                    sublist.append_child(&li)?;
                }
                list.append_child(&sublist)?;
            }
        }
    }

    container.append_child(&list)?;
    Ok(())
}

fn append_group_heading(document: &Document, list: &Element, key: &str) -> Result<(), JsValue> {
    let heading = document.create_element("h3")?;
    heading.set_class_name("label-heading");
    heading.set_text_content(Some(&section_heading(key)));
    list.append_child(&heading)?;
    Ok(())
}

fn render_table(
    document: &Document,
    container: &Element,
    record: &Record,
    edit_times: bool,
) -> Result<(), JsValue> {
    let sections = table_sections(record);
    if sections.is_empty() {
        let p = document.create_element("p")?;
        p.set_class_name("label-message");
        p.set_text_content(Some("No transcript or sound-event labels in record."));
        container.append_child(&p)?;
        return Ok(());
    }

    for section in sections {
        append_section_table(document, container, &section, edit_times)?;
    }
    Ok(())
}

fn append_section_table(
    document: &Document,
    container: &Element,
    section: &TableSection,
    edit_times: bool,
) -> Result<(), JsValue> {
    let heading = document.create_element("h3")?;
    heading.set_class_name("label-heading");
    heading.set_text_content(Some(section.section.display_name()));
    container.append_child(&heading)?;

    let table = document.create_element("table")?;
    table.set_class_name("label-table");

    let thead = document.create_element("thead")?;
    let header_row = document.create_element("tr")?;
    let payload_title = section
        .rows
        .first()
        .map(|r| r.payload_field)
        .unwrap_or("text");
    for title in ["start_time", "end_time", payload_title] {
        let th = document.create_element("th")?;
        th.set_text_content(Some(title));
        header_row.append_child(&th)?;
    }
    thead.append_child(&header_row)?;
    table.append_child(&thead)?;

    let tbody = document.create_element("tbody")?;
    for row in &section.rows {
        let tr = document.create_element("tr")?;

        for (field, value) in [("start_time", &row.start_time), ("end_time", &row.end_time)] {
            let td = document.create_element("td")?;
            if edit_times {
                td.append_child(&editable_cell(document, section, row.index, field, value)?.into())?;
            } else {
                td.set_text_content(Some(value));
            }
            tr.append_child(&td)?;
        }

        let td = document.create_element("td")?;
        td.append_child(&editable_cell(
            document,
            section,
            row.index,
            row.payload_field,
            &row.payload,
        )?.into())?;
        tr.append_child(&td)?;

        tbody.append_child(&tr)?;
    }
    table.append_child(&tbody)?;
    container.append_child(&table)?;
    Ok(())
}

fn editable_cell(
    document: &Document,
    section: &TableSection,
    index: usize,
    field: &str,
    value: &str,
) -> Result<web_sys::HtmlInputElement, JsValue> {
    let input: web_sys::HtmlInputElement = document.create_element("input")?.dyn_into()?;
    input.set_type("text");
    input.set_class_name("label-cell");
    input.set_value(value);
    input.set_attribute("data-section", section.section.as_str())?;
    input.set_attribute("data-row", &index.to_string())?;
    input.set_attribute("data-field", field)?;
    Ok(input)
}

fn render_raw(document: &Document, container: &Element, record: &Record) -> Result<(), JsValue> {
    let textarea: web_sys::HtmlTextAreaElement = document.create_element("textarea")?.dyn_into()?;
    textarea.set_class_name("raw-json");
    textarea.set_attribute("data-raw", "1")?;
    textarea.set_rows(24);
    textarea.set_value(&record.pretty());
    container.append_child(&textarea)?;
    Ok(())
}
