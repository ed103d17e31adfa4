use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

use crate::models::IncidentRecord;

#[derive(Debug, Clone)]
struct Entry {
    record: IncidentRecord,
    last_touched: DateTime<Utc>,
}

/// In-memory incident records keyed by the caller's session id.
///
/// Only used when a request carries `session_id`; callers that round-trip the
/// record themselves never touch it. Sessions idle longer than the TTL are
/// treated as abandoned and swept on the next save.
#[derive(Debug)]
pub struct SessionStore {
    records: Mutex<HashMap<String, Entry>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(Duration::minutes(30))
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn get(&self, session_id: &str) -> Option<IncidentRecord> {
        self.get_at(session_id, Utc::now())
    }

    /// Stores the record, or drops the session once the record is complete.
    pub fn save(&self, session_id: &str, record: &IncidentRecord) {
        self.save_at(session_id, record, Utc::now());
    }

    fn get_at(&self, session_id: &str, now: DateTime<Utc>) -> Option<IncidentRecord> {
        let records = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        records
            .get(session_id)
            .filter(|entry| now - entry.last_touched <= self.ttl)
            .map(|entry| entry.record.clone())
    }

    fn save_at(&self, session_id: &str, record: &IncidentRecord, now: DateTime<Utc>) {
        let mut records = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let before = records.len();
        records.retain(|_, entry| now - entry.last_touched <= self.ttl);
        let expired = before - records.len();
        if expired > 0 {
            tracing::info!(expired, "swept idle sessions");
        }

        if record.complete {
            records.remove(session_id);
            tracing::info!(session_id, "incident complete, session closed");
        } else {
            records.insert(
                session_id.to_string(),
                Entry {
                    record: record.clone(),
                    last_touched: now,
                },
            );
        }
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .map(|r| r.len())
            .unwrap_or_else(|poisoned| poisoned.into_inner().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
