use serde_json::Value;

use crate::record::{value_text, LabelSection, Record};

/// Label presentation style. A closed set, selected by configuration
/// rather than by inspecting the record shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelView {
    Flat,
    #[default]
    Table,
    Raw,
}

impl LabelView {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelView::Flat => "flat",
            LabelView::Table => "table",
            LabelView::Raw => "raw",
        }
    }

    /// Parse from a string representation
    pub fn from_str_loose(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "flat" | "list" => LabelView::Flat,
            "raw" | "json" => LabelView::Raw,
            _ => LabelView::Table,
        }
    }
}

/// One item of the flat/nested text list view
#[derive(Debug, Clone, PartialEq)]
pub enum FlatItem {
    /// Simple key-value line
    Scalar { key: String, value: String },
    /// Array-valued key: one sub-list entry per element, each a set of
    /// field name/value pairs
    List { key: String, rows: Vec<Vec<(String, String)>> },
    /// Object-valued key rendered as a nested key-value list
    Nested { key: String, entries: Vec<(String, String)> },
}

/// Heading text for a section key, the way the page always spelled it:
/// underscores to spaces, uppercased.
pub fn section_heading(key: &str) -> String {
    key.replace('_', " ").to_uppercase()
}

/// Build the flat-list view model for a record. Every top-level key is
/// represented; no validation of field types is performed.
pub fn flat_items(record: &Record) -> Vec<FlatItem> {
    let Some(obj) = record.as_value().as_object() else {
        return Vec::new();
    };

    obj.iter()
        .map(|(key, value)| match value {
            Value::Array(elements) => FlatItem::List {
                key: key.clone(),
                rows: elements.iter().map(row_fields).collect(),
            },
            Value::Object(fields) => FlatItem::Nested {
                key: key.clone(),
                entries: fields
                    .iter()
                    .map(|(k, v)| (k.clone(), value_text(Some(v))))
                    .collect(),
            },
            other => FlatItem::Scalar {
                key: key.replace('_', " "),
                value: value_text(Some(other)),
            },
        })
        .collect()
}

fn row_fields(row: &Value) -> Vec<(String, String)> {
    match row.as_object() {
        Some(fields) => fields
            .iter()
            .map(|(k, v)| (k.clone(), value_text(Some(v))))
            .collect(),
        None => vec![(String::new(), value_text(Some(row)))],
    }
}

/// One editable table of the tabular view. Column order is fixed:
/// start_time, end_time, payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSection {
    pub section: LabelSection,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub index: usize,
    pub start_time: String,
    pub end_time: String,
    /// Field key the payload cell writes back to ("text", "tag" or "label")
    pub payload_field: &'static str,
    pub payload: String,
}

/// Build the tabular view model: one table per label section present
/// in the record, in transcript-then-events order.
pub fn table_sections(record: &Record) -> Vec<TableSection> {
    let mut sections = Vec::new();

    if record.rows(LabelSection::Transcript).is_some() {
        let rows = record
            .transcript_entries()
            .into_iter()
            .enumerate()
            .map(|(index, entry)| TableRow {
                index,
                start_time: entry.start_time,
                end_time: entry.end_time,
                payload_field: "text",
                payload: entry.text,
            })
            .collect();
        sections.push(TableSection {
            section: LabelSection::Transcript,
            rows,
        });
    }

    if record.rows(LabelSection::Events).is_some() {
        let rows = record
            .sound_events()
            .into_iter()
            .enumerate()
            .map(|(index, event)| TableRow {
                index,
                start_time: event.start_time,
                end_time: event.end_time,
                payload_field: event.payload_field,
                payload: event.payload,
            })
            .collect();
        sections.push(TableSection {
            section: LabelSection::Events,
            rows,
        });
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_label_view_from_str_loose() {
        assert_eq!(LabelView::from_str_loose("flat"), LabelView::Flat);
        assert_eq!(LabelView::from_str_loose("RAW"), LabelView::Raw);
        assert_eq!(LabelView::from_str_loose("json"), LabelView::Raw);
        assert_eq!(LabelView::from_str_loose("table"), LabelView::Table);
        assert_eq!(LabelView::from_str_loose("whatever"), LabelView::Table);
    }

    #[test]
    fn test_flat_items_cover_all_top_level_keys() {
        let record = Record::new(json!({
            "file_path": "a.mp4",
            "detected_language": "en",
            "metadata": {"duration_seconds": 12.5},
            "auto_transcript": [
                {"start_time": "0", "end_time": "1", "text": "hi"}
            ]
        }));

        let items = flat_items(&record);
        assert_eq!(items.len(), 4);

        assert!(items.iter().any(|i| matches!(
            i,
            FlatItem::Scalar { key, value } if key == "detected language" && value == "en"
        )));
        assert!(items.iter().any(|i| matches!(
            i,
            FlatItem::Nested { key, entries }
                if key == "metadata" && entries == &[("duration_seconds".to_string(), "12.5".to_string())]
        )));
        assert!(items.iter().any(|i| match i {
            FlatItem::List { key, rows } => key == "auto_transcript" && rows.len() == 1,
            _ => false,
        }));
    }

    #[test]
    fn test_section_heading() {
        assert_eq!(section_heading("auto_transcript"), "AUTO TRANSCRIPT");
        assert_eq!(section_heading("sound_events"), "SOUND EVENTS");
    }

    #[test]
    fn test_table_sections_fixed_shape() {
        let record = Record::new(json!({
            "file_path": "a.mp4",
            "auto_transcript": [
                {"start_time": "0", "end_time": "1", "text": "hi"},
                {"start_time": "1", "end_time": "2", "text": "there"}
            ],
            "sound_events": [
                {"start_time": 3, "end_time": 4, "tag": "door_slam"}
            ]
        }));

        let sections = table_sections(&record);
        assert_eq!(sections.len(), 2);

        assert_eq!(sections[0].section, LabelSection::Transcript);
        assert_eq!(sections[0].rows.len(), 2);
        assert_eq!(sections[0].rows[1].index, 1);
        assert_eq!(sections[0].rows[1].payload_field, "text");
        assert_eq!(sections[0].rows[1].payload, "there");

        assert_eq!(sections[1].section, LabelSection::Events);
        assert_eq!(sections[1].rows[0].start_time, "3");
        assert_eq!(sections[1].rows[0].payload_field, "tag");
    }

    #[test]
    fn test_table_sections_skip_absent_sections() {
        let record = Record::new(json!({"file_path": "a.mp4"}));
        assert!(table_sections(&record).is_empty());

        let transcript_only = Record::new(json!({
            "label": {"transcript": [{"start_time": "0", "end_time": "1", "text": "x"}]}
        }));
        let sections = table_sections(&transcript_only);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].section, LabelSection::Transcript);
    }
}
