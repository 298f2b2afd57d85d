use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::record::{LabelSection, Record};

/// Address of one editable label field: section + row index + field key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    pub section: LabelSection,
    pub index: usize,
    pub field: String,
}

impl FieldPath {
    pub fn new(section: LabelSection, index: usize, field: impl Into<String>) -> Self {
        Self {
            section,
            index,
            field: field.into(),
        }
    }
}

/// In-memory staging of user edits, the single source of truth for
/// pending changes. Flushed into the current record on commit; the
/// rendered interface is never re-scanned.
#[derive(Debug, Default)]
pub struct EditBuffer {
    fields: HashMap<FieldPath, String>,
    /// Raw-JSON view: the full replacement text for the current record
    raw_record: Option<String>,
}

impl EditBuffer {
    pub fn stage_field(&mut self, path: FieldPath, value: String) {
        self.fields.insert(path, value);
    }

    pub fn stage_raw(&mut self, text: String) {
        self.raw_record = Some(text);
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.raw_record.is_none()
    }

    pub fn clear(&mut self) {
        self.fields.clear();
        self.raw_record = None;
    }
}

#[derive(Debug)]
pub enum SessionError {
    /// The labels document could not be parsed as a record array
    Load(String),
    /// Raw-JSON edit text is not valid JSON; the transition is aborted
    EditParse(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Load(msg) => write!(f, "malformed labels document: {}", msg),
            SessionError::EditParse(msg) => write!(f, "Invalid JSON in edited record: {}", msg),
        }
    }
}

impl std::error::Error for SessionError {}

/// The record-browsing session: the loaded record set, the current
/// position, and the edit buffer. Owns the whole edit protocol; every
/// position change and every export commits pending edits first, so
/// nothing a user typed is lost to navigation.
///
/// Two states: Empty (no records, navigation is a no-op) and Ready
/// (`0 <= position < len`). A failed load leaves the session Empty.
#[derive(Debug, Default)]
pub struct RecordSession {
    records: Vec<Record>,
    position: usize,
    edits: EditBuffer,
}

impl RecordSession {
    /// Parse a labels document (a JSON array of records) into a fresh
    /// session at position 0.
    pub fn from_json_str(text: &str) -> Result<Self, SessionError> {
        let records: Vec<Record> =
            serde_json::from_str(text).map_err(|e| SessionError::Load(e.to_string()))?;
        Ok(Self {
            records,
            position: 0,
            edits: EditBuffer::default(),
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current(&self) -> Option<&Record> {
        self.records.get(self.position)
    }

    pub fn stage_field_edit(&mut self, path: FieldPath, value: String) {
        self.edits.stage_field(path, value);
    }

    pub fn stage_raw_edit(&mut self, text: String) {
        self.edits.stage_raw(text);
    }

    pub fn has_pending_edits(&self) -> bool {
        !self.edits.is_empty()
    }

    /// Flush the edit buffer into the current record.
    ///
    /// A raw replacement is applied first and must parse; on parse
    /// failure nothing is mutated and the buffer is kept, so the user
    /// can fix the text and retry. Field edits whose row no longer
    /// exists are skipped, matching what a scan of the rendered inputs
    /// would have found.
    pub fn commit_edits(&mut self) -> Result<(), SessionError> {
        if self.edits.is_empty() {
            return Ok(());
        }

        let raw_replacement = match &self.edits.raw_record {
            Some(text) => Some(
                serde_json::from_str::<Value>(text)
                    .map_err(|e| SessionError::EditParse(e.to_string()))?,
            ),
            None => None,
        };

        let Some(record) = self.records.get_mut(self.position) else {
            // Nothing to write into; drop the stale buffer
            self.edits.clear();
            return Ok(());
        };

        if let Some(value) = raw_replacement {
            record.replace(value);
        }

        for (path, text) in self.edits.fields.drain() {
            record.set_row_field(path.section, path.index, &path.field, Value::String(text));
        }
        self.edits.clear();
        Ok(())
    }

    /// Commit edits, then step to the next record, wrapping to 0 after
    /// the last one. No-op on an empty set.
    pub fn advance(&mut self) -> Result<(), SessionError> {
        if self.records.is_empty() {
            return Ok(());
        }
        self.commit_edits()?;
        self.position = (self.position + 1) % self.records.len();
        Ok(())
    }

    /// Commit edits, then serialize the entire record set as
    /// pretty-printed JSON. Position and records are otherwise
    /// untouched.
    pub fn export(&mut self) -> Result<String, SessionError> {
        self.commit_edits()?;
        serde_json::to_string_pretty(&self.records)
            .map_err(|e| SessionError::Load(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ONE_RECORD: &str =
        r#"[{"file_path":"a.mp4","auto_transcript":[{"start_time":"0","end_time":"1","text":"hi"}]}]"#;

    fn three_record_session() -> RecordSession {
        let doc = json!([
            {"file_path": "a.mp4", "auto_transcript": [
                {"start_time": "0", "end_time": "1", "text": "one"}
            ]},
            {"audio_file": "b.wav", "sound_events": [
                {"start_time": 1, "end_time": 2, "tag": "bark"}
            ]},
            {"file_path": "c.mov", "label": {"transcript": [
                {"start_time": "5", "end_time": "6", "text": "three"}
            ]}}
        ]);
        RecordSession::from_json_str(&doc.to_string()).unwrap()
    }

    #[test]
    fn test_load_malformed_document() {
        assert!(matches!(
            RecordSession::from_json_str("not json"),
            Err(SessionError::Load(_))
        ));
        // A top-level object is not a record array either
        assert!(matches!(
            RecordSession::from_json_str(r#"{"file_path":"a.mp4"}"#),
            Err(SessionError::Load(_))
        ));
    }

    #[test]
    fn test_advance_wraps_after_full_cycle() {
        let mut session = three_record_session();
        assert_eq!(session.position(), 0);
        for _ in 0..session.len() {
            session.advance().unwrap();
        }
        assert_eq!(session.position(), 0);
        session.advance().unwrap();
        assert_eq!(session.position(), 1);
    }

    #[test]
    fn test_empty_session_operations_are_noops() {
        let mut session = RecordSession::from_json_str("[]").unwrap();
        assert!(session.is_empty());
        assert!(session.current().is_none());
        session.advance().unwrap();
        assert_eq!(session.position(), 0);
        assert_eq!(session.export().unwrap(), "[]");
    }

    #[test]
    fn test_export_without_edits_round_trips() {
        let input: Value = serde_json::from_str(ONE_RECORD).unwrap();
        let mut session = RecordSession::from_json_str(ONE_RECORD).unwrap();
        let output: Value = serde_json::from_str(&session.export().unwrap()).unwrap();
        assert_eq!(input, output);
    }

    #[test]
    fn test_export_is_pretty_printed() {
        let mut session = RecordSession::from_json_str(ONE_RECORD).unwrap();
        let text = session.export().unwrap();
        assert!(text.contains("\n  {"), "expected 2-space indent, got: {}", text);
    }

    #[test]
    fn test_edit_then_export_changes_only_that_field() {
        let mut session = RecordSession::from_json_str(ONE_RECORD).unwrap();
        session.stage_field_edit(
            FieldPath::new(LabelSection::Transcript, 0, "text"),
            "bye".to_string(),
        );

        let exported: Value = serde_json::from_str(&session.export().unwrap()).unwrap();
        let row = &exported[0]["auto_transcript"][0];
        assert_eq!(row["text"], json!("bye"));
        assert_eq!(row["start_time"], json!("0"));
        assert_eq!(row["end_time"], json!("1"));
        assert_eq!(exported[0]["file_path"], json!("a.mp4"));
    }

    #[test]
    fn test_edits_commit_before_navigation() {
        let mut session = three_record_session();
        session.stage_field_edit(
            FieldPath::new(LabelSection::Transcript, 0, "text"),
            "edited".to_string(),
        );
        session.advance().unwrap();
        assert!(!session.has_pending_edits());

        // The edit landed in record 0, not in the new current record
        let exported: Value = serde_json::from_str(&session.export().unwrap()).unwrap();
        assert_eq!(exported[0]["auto_transcript"][0]["text"], json!("edited"));
        assert_eq!(exported[1]["sound_events"][0]["tag"], json!("bark"));
    }

    #[test]
    fn test_edit_writes_back_to_nested_variant() {
        let mut session = three_record_session();
        session.advance().unwrap();
        session.advance().unwrap();
        assert_eq!(session.position(), 2);
        session.stage_field_edit(
            FieldPath::new(LabelSection::Transcript, 0, "text"),
            "trois".to_string(),
        );

        let exported: Value = serde_json::from_str(&session.export().unwrap()).unwrap();
        assert_eq!(exported[2]["label"]["transcript"][0]["text"], json!("trois"));
        assert!(exported[2].get("auto_transcript").is_none());
    }

    #[test]
    fn test_raw_edit_replaces_current_record() {
        let mut session = RecordSession::from_json_str(ONE_RECORD).unwrap();
        session.stage_raw_edit(r#"{"file_path":"a.mp4","note":"rewritten"}"#.to_string());
        session.advance().unwrap();

        let exported: Value = serde_json::from_str(&session.export().unwrap()).unwrap();
        assert_eq!(exported[0]["note"], json!("rewritten"));
        assert!(exported[0].get("auto_transcript").is_none());
    }

    #[test]
    fn test_raw_parse_failure_aborts_and_preserves_state() {
        let mut session = RecordSession::from_json_str(ONE_RECORD).unwrap();
        session.stage_raw_edit("{not valid json".to_string());

        assert!(matches!(session.advance(), Err(SessionError::EditParse(_))));
        // Nothing moved, nothing mutated, buffer still pending
        assert_eq!(session.position(), 0);
        assert!(session.has_pending_edits());
        assert_eq!(
            session.current().unwrap().transcript_entries()[0].text,
            "hi"
        );

        assert!(matches!(session.export(), Err(SessionError::EditParse(_))));

        // A corrected buffer goes through
        session.stage_raw_edit(r#"{"file_path":"a.mp4"}"#.to_string());
        session.advance().unwrap();
        assert_eq!(session.position(), 0); // single record wraps to itself
    }

    #[test]
    fn test_stale_field_edit_is_skipped() {
        let mut session = RecordSession::from_json_str(ONE_RECORD).unwrap();
        session.stage_field_edit(
            FieldPath::new(LabelSection::Events, 3, "tag"),
            "ghost".to_string(),
        );
        session.advance().unwrap();

        let exported: Value = serde_json::from_str(&session.export().unwrap()).unwrap();
        assert!(exported[0].get("sound_events").is_none());
    }

    #[test]
    fn test_single_record_table_edit_end_to_end() {
        // load [{file_path:"a.mp4", auto_transcript:[{"0","1","hi"}]}],
        // edit the text cell to "bye", export: only text differs.
        let mut session = RecordSession::from_json_str(ONE_RECORD).unwrap();
        let rows = session.current().unwrap().transcript_entries();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text, "hi");

        session.stage_field_edit(
            FieldPath::new(LabelSection::Transcript, 0, "text"),
            "bye".to_string(),
        );
        let exported: Value = serde_json::from_str(&session.export().unwrap()).unwrap();
        let row = &exported[0]["auto_transcript"][0];
        assert_eq!(row["text"], json!("bye"));
        assert_eq!(row["start_time"], json!("0"));
        assert_eq!(row["end_time"], json!("1"));
    }
}
