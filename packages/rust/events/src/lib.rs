//! Classification of raw chat event payloads into typed events.
//!
//! The chat server delivers batches shaped like
//! `{"r17": {"e": [{"id": 1, "event_type": 1, ...}, ...]}}`, keyed by an
//! arbitrary room identifier. [`classify`] reads the first room's event list
//! and turns each record into an [`Event`] keyed by its event id.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use docbot_shared::{DocbotError, Result};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Fields common to every chat event record. All but `id` may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventRecord {
    pub id: u64,
    pub event_type: u32,
    pub time_stamp: Option<i64>,
    pub room_id: Option<u64>,
    pub room_name: Option<String>,
    pub user_id: Option<i64>,
    pub user_name: Option<String>,
    pub message_id: Option<u64>,
    pub parent_id: Option<u64>,
    pub target_user_id: Option<i64>,
    pub content: Option<String>,
}

impl EventRecord {
    /// Event time as UTC, when the record carries a valid unix timestamp.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.time_stamp
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
    }
}

/// A classified chat event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    NewMessage(EventRecord),
    EditMessage(EventRecord),
    UserEnter(EventRecord),
    UserLeave(EventRecord),
    RoomEdit(EventRecord),
    StarMessage(EventRecord),
    MentionMessage(EventRecord),
    DeleteMessage(EventRecord),
    /// Unrecognised type code; carries the whole raw payload.
    Unknown(Value),
}

impl Event {
    /// Short name of the variant, for logs and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NewMessage(_) => "new-message",
            Self::EditMessage(_) => "edit-message",
            Self::UserEnter(_) => "user-enter",
            Self::UserLeave(_) => "user-leave",
            Self::RoomEdit(_) => "room-edit",
            Self::StarMessage(_) => "star-message",
            Self::MentionMessage(_) => "mention-message",
            Self::DeleteMessage(_) => "delete-message",
            Self::Unknown(_) => "unknown",
        }
    }

    /// The typed record, if this is a recognised event.
    pub fn record(&self) -> Option<&EventRecord> {
        match self {
            Self::NewMessage(r)
            | Self::EditMessage(r)
            | Self::UserEnter(r)
            | Self::UserLeave(r)
            | Self::RoomEdit(r)
            | Self::StarMessage(r)
            | Self::MentionMessage(r)
            | Self::DeleteMessage(r) => Some(r),
            Self::Unknown(_) => None,
        }
    }

    fn from_record(record: EventRecord) -> std::result::Result<Self, EventRecord> {
        Ok(match record.event_type {
            1 => Self::NewMessage(record),
            2 => Self::EditMessage(record),
            3 => Self::UserEnter(record),
            4 => Self::UserLeave(record),
            5 => Self::RoomEdit(record),
            6 => Self::StarMessage(record),
            8 => Self::MentionMessage(record),
            10 => Self::DeleteMessage(record),
            _ => return Err(record),
        })
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify every identifiable event in `payload`.
///
/// Records without an `id` are skipped. A repeated id keeps its first
/// occurrence. Records with an unknown `event_type`, or that do not fit
/// [`EventRecord`], become [`Event::Unknown`] holding the whole payload.
pub fn classify(payload: &Value) -> Result<BTreeMap<u64, Event>> {
    let rooms = payload
        .as_object()
        .ok_or_else(|| DocbotError::parse("event payload is not a JSON object"))?;

    let mut events = BTreeMap::new();

    let Some(records) = rooms
        .values()
        .next()
        .and_then(|room| room.get("e"))
        .and_then(Value::as_array)
    else {
        debug!("payload carries no events");
        return Ok(events);
    };

    for raw in records {
        let Some(id) = raw.get("id").and_then(event_id) else {
            continue;
        };
        if events.contains_key(&id) {
            debug!(id, "duplicate event id, keeping first");
            continue;
        }

        let event = match serde_json::from_value::<EventRecord>(normalize_record(raw, id)) {
            Ok(record) => Event::from_record(record).unwrap_or_else(|record| {
                debug!(id, event_type = record.event_type, "unknown event type");
                Event::Unknown(payload.clone())
            }),
            Err(e) => {
                warn!(id, error = %e, "malformed event record");
                Event::Unknown(payload.clone())
            }
        };

        events.insert(id, event);
    }

    Ok(events)
}

/// Parse a payload from JSON text and classify it.
pub fn classify_str(json: &str) -> Result<BTreeMap<u64, Event>> {
    let payload: Value = serde_json::from_str(json)
        .map_err(|e| DocbotError::parse(format!("invalid event payload: {e}")))?;
    classify(&payload)
}

/// Event ids arrive as numbers, occasionally as numeric strings.
fn event_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Pin the parsed id and coerce a missing or stringly `event_type` to a number.
fn normalize_record(raw: &Value, id: u64) -> Value {
    let mut record = raw.clone();
    if let Some(obj) = record.as_object_mut() {
        obj.insert("id".into(), Value::from(id));
        let event_type = obj.get("event_type").and_then(event_id).unwrap_or(0);
        obj.insert("event_type".into(), Value::from(event_type));
    }
    record
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn classifies_known_types() {
        let payload = json!({
            "r11": {
                "e": [
                    {"id": 100, "event_type": 1, "room_id": 11, "user_name": "alice",
                     "content": "!!docs strlen", "message_id": 9, "time_stamp": 1_460_000_000},
                    {"id": 101, "event_type": 3, "user_id": 7},
                    {"id": 102, "event_type": 10, "message_id": 9},
                ],
                "t": 102
            }
        });

        let events = classify(&payload).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[&100].kind(), "new-message");
        assert_eq!(events[&101].kind(), "user-enter");
        assert_eq!(events[&102].kind(), "delete-message");

        let record = events[&100].record().unwrap();
        assert_eq!(record.content.as_deref(), Some("!!docs strlen"));
        assert_eq!(
            record.timestamp().unwrap().to_rfc3339(),
            "2016-04-07T03:33:20+00:00"
        );
    }

    #[test]
    fn unknown_type_carries_raw_payload() {
        let payload = json!({"r1": {"e": [{"id": 5, "event_type": 99}]}});
        let events = classify(&payload).unwrap();
        assert_eq!(events[&5], Event::Unknown(payload.clone()));
    }

    #[test]
    fn missing_type_is_unknown() {
        let payload = json!({"r1": {"e": [{"id": 5}]}});
        assert_eq!(classify(&payload).unwrap()[&5].kind(), "unknown");
    }

    #[test]
    fn skips_records_without_id() {
        let payload = json!({"r1": {"e": [{"event_type": 1}, {"id": "42", "event_type": "2"}]}});
        let events = classify(&payload).unwrap();
        assert_eq!(events.keys().copied().collect::<Vec<_>>(), vec![42]);
        assert_eq!(events[&42].kind(), "edit-message");
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let payload = json!({"r1": {"e": [
            {"id": 1, "event_type": 6},
            {"id": 1, "event_type": 4},
        ]}});
        let events = classify(&payload).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[&1].kind(), "star-message");
    }

    #[test]
    fn only_first_room_is_read() {
        let events = classify_str(
            r#"{"r2": {"e": [{"id": 1, "event_type": 8}]}, "r1": {"e": [{"id": 2, "event_type": 1}]}}"#,
        )
        .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[&1].kind(), "mention-message");
    }

    #[test]
    fn malformed_record_is_unknown() {
        let payload = json!({"r1": {"e": [{"id": 3, "event_type": 1, "content": 12}]}});
        assert_eq!(classify(&payload).unwrap()[&3].kind(), "unknown");
    }

    #[test]
    fn empty_and_invalid_payloads() {
        assert!(classify(&json!({})).unwrap().is_empty());
        assert!(classify(&json!({"r1": {}})).unwrap().is_empty());
        assert!(classify(&json!([1, 2])).is_err());
        assert!(classify_str("not json").is_err());
    }
}
