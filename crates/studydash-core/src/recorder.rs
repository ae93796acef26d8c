//! Turns finished timer intervals into persisted study sessions.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::Result;
use crate::storage::{PersistenceAdapter, SESSIONS_KEY, SUBJECTS_KEY};
use crate::subjects::{resolve_subject_name, Subject};

/// One persisted record of study time. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: String,
    /// Subject name at the time of saving.
    pub subject: String,
    /// Day the session was saved on, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub duration_seconds: u64,
}

/// Appends [`StudySession`]s through a persistence adapter.
pub struct SessionRecorder<S> {
    store: S,
    clock: Arc<dyn Clock>,
}

impl<S: PersistenceAdapter> SessionRecorder<S> {
    pub fn new(store: S, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Record `duration_secs` of study against `subject_id`.
    ///
    /// A zero duration is dropped and returns `Ok(None)`. The session is
    /// dated with the current day, so an interval spanning midnight belongs
    /// to the day it was saved on. Unknown subjects are recorded as
    /// `"General"`.
    ///
    /// # Errors
    /// Propagates failures from the persistence adapter.
    pub fn record(&self, duration_secs: u64, subject_id: &str) -> Result<Option<StudySession>> {
        if duration_secs == 0 {
            tracing::debug!("dropping zero-length session");
            return Ok(None);
        }

        let subjects: Vec<Subject> = self.store.load_list(SUBJECTS_KEY)?;
        let session = StudySession {
            id: self.store.generate_id(),
            subject: resolve_subject_name(&subjects, subject_id).to_string(),
            date: self.clock.today(),
            duration_seconds: duration_secs,
        };

        let mut sessions: Vec<StudySession> = self.store.load_list(SESSIONS_KEY)?;
        sessions.push(session.clone());
        self.store.save_list(SESSIONS_KEY, &sessions)?;

        tracing::info!(
            subject = %session.subject,
            date = %session.date,
            duration_secs,
            "study session recorded"
        );
        Ok(Some(session))
    }

    /// All recorded sessions, oldest first.
    pub fn sessions(&self) -> Result<Vec<StudySession>> {
        Ok(self.store.load_list(SESSIONS_KEY)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::storage::MemoryStore;
    use crate::subjects::add_subject;

    fn recorder_at(date: NaiveDate) -> (SessionRecorder<Arc<MemoryStore>>, Arc<MemoryStore>, ManualClock) {
        let store = Arc::new(MemoryStore::new());
        let clock = ManualClock::at_date(date);
        let recorder = SessionRecorder::new(store.clone(), Arc::new(clock.clone()));
        (recorder, store, clock)
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn zero_duration_is_not_recorded() {
        let (recorder, store, _) = recorder_at(day(2024, 5, 1));
        assert_eq!(recorder.record(0, "general").unwrap(), None);
        assert_eq!(store.list_len(SESSIONS_KEY), 0);
    }

    #[test]
    fn records_resolved_subject_name() {
        let (recorder, store, _) = recorder_at(day(2024, 5, 1));
        let math = add_subject(&*store, "Math", "#f00").unwrap();

        let session = recorder.record(125, &math.id).unwrap().unwrap();
        assert_eq!(session.subject, "Math");
        assert_eq!(session.duration_seconds, 125);
        assert_eq!(session.date, day(2024, 5, 1));
        assert_eq!(recorder.sessions().unwrap(), vec![session]);
    }

    #[test]
    fn unknown_subject_recorded_as_general() {
        let (recorder, _, _) = recorder_at(day(2024, 5, 1));
        let session = recorder.record(30, "deleted-id").unwrap().unwrap();
        assert_eq!(session.subject, "General");
    }

    #[test]
    fn session_dated_on_save_day() {
        let (recorder, _, clock) = recorder_at(day(2024, 5, 1));
        clock.advance_secs(24 * 3600 + 10);
        let session = recorder.record(3600, "general").unwrap().unwrap();
        assert_eq!(session.date, day(2024, 5, 2));
    }

    #[test]
    fn appends_without_merging() {
        let (recorder, store, _) = recorder_at(day(2024, 5, 1));
        recorder.record(60, "general").unwrap();
        recorder.record(60, "general").unwrap();
        assert_eq!(store.list_len(SESSIONS_KEY), 2);
    }

    #[test]
    fn serializes_with_record_field_names() {
        let session = StudySession {
            id: "abc".into(),
            subject: "General".into(),
            date: day(2024, 1, 31),
            duration_seconds: 900,
        };
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "abc",
                "subject": "General",
                "date": "2024-01-31",
                "durationSeconds": 900
            })
        );
    }
}
