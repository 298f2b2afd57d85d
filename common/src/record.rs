use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One media item plus its structured label payload.
///
/// The wrapped JSON object is kept as-is so that both observed schema
/// variants (flat `auto_transcript`/`sound_events` keys, or the
/// `label.{transcript,events}` nesting) and any fields this tool knows
/// nothing about survive a load/export round trip unchanged. Typed
/// access goes through the resolver methods below; edits are written
/// back to whichever location the record actually uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Value);

/// Label sub-collection within a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelSection {
    Transcript,
    Events,
}

impl LabelSection {
    /// (flat top-level key, key under the `label` nesting)
    fn keys(&self) -> (&'static str, &'static str) {
        match self {
            LabelSection::Transcript => ("auto_transcript", "transcript"),
            LabelSection::Events => ("sound_events", "events"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LabelSection::Transcript => "transcript",
            LabelSection::Events => "events",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "transcript" | "auto_transcript" => Some(LabelSection::Transcript),
            "events" | "sound_events" => Some(LabelSection::Events),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LabelSection::Transcript => "Transcript",
            LabelSection::Events => "Sound events",
        }
    }
}

/// Transcript row view: `{start_time, end_time, text}`
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub start_time: String,
    pub end_time: String,
    pub text: String,
}

impl TranscriptEntry {
    pub fn from_row(row: &Value) -> Self {
        Self {
            start_time: value_text(row.get("start_time")),
            end_time: value_text(row.get("end_time")),
            text: value_text(row.get("text")),
        }
    }
}

/// Sound-event row view: `{start_time, end_time, tag|label}`
#[derive(Debug, Clone, PartialEq)]
pub struct SoundEvent {
    pub start_time: String,
    pub end_time: String,
    /// Key the payload was found under ("tag" unless only "label" exists)
    pub payload_field: &'static str,
    pub payload: String,
}

impl SoundEvent {
    pub fn from_row(row: &Value) -> Self {
        let payload_field = if row.get("tag").is_none() && row.get("label").is_some() {
            "label"
        } else {
            "tag"
        };
        Self {
            start_time: value_text(row.get("start_time")),
            end_time: value_text(row.get("end_time")),
            payload_field,
            payload: value_text(row.get(payload_field)),
        }
    }
}

impl Record {
    pub fn new(value: Value) -> Self {
        Record(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Wholesale replacement, used by the raw-JSON edit commit
    pub fn replace(&mut self, value: Value) {
        self.0 = value;
    }

    /// Media reference: `file_path`, falling back to `audio_file`
    pub fn media_ref(&self) -> Option<&str> {
        self.0
            .get("file_path")
            .and_then(Value::as_str)
            .or_else(|| self.0.get("audio_file").and_then(Value::as_str))
    }

    /// Rows of a label section, wherever the record keeps them
    pub fn rows(&self, section: LabelSection) -> Option<&Vec<Value>> {
        let (flat, nested) = section.keys();
        if let Some(v) = self.0.get(flat) {
            return v.as_array();
        }
        self.0.get("label")?.get(nested)?.as_array()
    }

    pub fn rows_mut(&mut self, section: LabelSection) -> Option<&mut Vec<Value>> {
        let (flat, nested) = section.keys();
        if self.0.get(flat).is_some() {
            return self.0.get_mut(flat)?.as_array_mut();
        }
        self.0.get_mut("label")?.get_mut(nested)?.as_array_mut()
    }

    /// Overwrite one field of one section row in place. Returns false
    /// when the row (or the section) does not exist in this record.
    pub fn set_row_field(&mut self, section: LabelSection, index: usize, field: &str, value: Value) -> bool {
        let Some(rows) = self.rows_mut(section) else {
            return false;
        };
        let Some(obj) = rows.get_mut(index).and_then(Value::as_object_mut) else {
            return false;
        };
        obj.insert(field.to_string(), value);
        true
    }

    pub fn transcript_entries(&self) -> Vec<TranscriptEntry> {
        self.rows(LabelSection::Transcript)
            .map(|rows| rows.iter().map(TranscriptEntry::from_row).collect())
            .unwrap_or_default()
    }

    pub fn sound_events(&self) -> Vec<SoundEvent> {
        self.rows(LabelSection::Events)
            .map(|rows| rows.iter().map(SoundEvent::from_row).collect())
            .unwrap_or_default()
    }

    /// Formatted JSON for the raw edit view (2-space indent)
    pub fn pretty(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_default()
    }
}

/// Text rendition of a label value: strings as-is, everything else in
/// its JSON spelling, absent/null as empty. No numeric validation,
/// values are round-tripped as text.
pub fn value_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
