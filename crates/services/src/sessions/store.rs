use std::convert::Infallible;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex as WriteGate;

use storage::repository::KeyValueStore;
use study_core::Clock;
use study_core::model::{
    Feedback, ModuleProgress, QuestionId, Score, SessionKey, SessionSnapshot, SnapshotError,
    StudyMode,
};

use crate::error::SessionStoreError;

/// Whether snapshots are still being written to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceStatus {
    Active,
    /// Storage failed once; the session continues in memory only.
    Degraded { reason: String },
}

impl PersistenceStatus {
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

/// Single source of truth for one study session.
///
/// Every mutation rewrites the full snapshot under the session key. Mutations
/// are serialized by a write gate that is held across the storage write, so
/// snapshots reach storage in the order they were produced.
pub struct SessionStore {
    key: SessionKey,
    storage: Arc<dyn KeyValueStore>,
    started_at: DateTime<Utc>,
    state: Mutex<SessionSnapshot>,
    persistence: Mutex<PersistenceStatus>,
    write_gate: WriteGate<()>,
    revision: AtomicU64,
}

impl SessionStore {
    /// Hydrate from the snapshot stored under `key`, or start empty.
    ///
    /// Never fails: unreadable or corrupt snapshots leave the store empty and
    /// in degraded (memory-only) mode.
    pub async fn open(storage: Arc<dyn KeyValueStore>, key: SessionKey, clock: Clock) -> Self {
        let (snapshot, status) = match storage.get(key.as_str()).await {
            Ok(Some(raw)) => match SessionSnapshot::from_json(&raw) {
                Ok(snapshot) => {
                    log::info!("restored session {key}");
                    (snapshot, PersistenceStatus::Active)
                }
                Err(err) => degraded_start(&key, &err),
            },
            Ok(None) => {
                log::debug!("starting new session {key}");
                (SessionSnapshot::default(), PersistenceStatus::Active)
            }
            Err(err) => degraded_start(&key, &err),
        };

        Self {
            key,
            storage,
            started_at: clock.now(),
            state: Mutex::new(snapshot),
            persistence: Mutex::new(status),
            write_gate: WriteGate::new(()),
            revision: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Bumped after every mutation; lets views detect changes cheaply.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn persistence_status(&self) -> PersistenceStatus {
        self.persistence
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.read().clone()
    }

    #[must_use]
    pub fn answer(&self, id: &QuestionId) -> Option<String> {
        self.read().answers.get(id).cloned()
    }

    /// The answer for `id` once every mutation queued before this call has run.
    pub async fn answer_settled(&self, id: &QuestionId) -> Option<String> {
        let _gate = self.write_gate.lock().await;
        self.answer(id)
    }

    #[must_use]
    pub fn feedback(&self, id: &QuestionId) -> Option<Feedback> {
        self.read().feedback.get(id).cloned()
    }

    #[must_use]
    pub fn is_hint_shown(&self, id: &QuestionId) -> bool {
        self.read().hints_shown.contains(id)
    }

    #[must_use]
    pub fn current_mode(&self) -> Option<StudyMode> {
        self.read().current_mode
    }

    #[must_use]
    pub fn progress(&self, mode: StudyMode) -> ModuleProgress {
        *self.read().progress_by_mode.get(mode)
    }

    #[must_use]
    pub fn questions_answered(&self) -> u32 {
        self.read().questions_answered
    }

    /// Overwrite the answer for `id`.
    pub async fn set_answer(&self, id: &QuestionId, text: impl Into<String>) {
        let text = text.into();
        self.mutate(|state| {
            state.answers.insert(id.clone(), text);
        })
        .await;
    }

    /// Overwrite the feedback for `id`.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError::MissingAnswer` if no answer is stored for `id`.
    pub async fn set_feedback(
        &self,
        id: &QuestionId,
        feedback: Feedback,
    ) -> Result<(), SessionStoreError> {
        self.try_mutate(|state| {
            if !state.answers.contains_key(id) {
                return Err(SessionStoreError::MissingAnswer(id.clone()));
            }
            state.feedback.insert(id.clone(), feedback);
            Ok(())
        })
        .await
    }

    /// Flip hint visibility for `id`; returns whether the hint is now shown.
    pub async fn toggle_hint(&self, id: &QuestionId) -> bool {
        self.mutate(|state| {
            if state.hints_shown.remove(id) {
                false
            } else {
                state.hints_shown.insert(id.clone());
                true
            }
        })
        .await
    }

    /// `None` returns to mode selection. Progress is untouched.
    pub async fn set_current_mode(&self, mode: Option<StudyMode>) {
        self.mutate(|state| state.current_mode = mode).await;
    }

    /// Record one accepted submission for `mode`.
    ///
    /// Not idempotent: call exactly once per accepted submission.
    pub async fn update_progress(&self, mode: StudyMode, score: Score) -> ModuleProgress {
        log::debug!("updating progress for {mode} with score {score}");
        self.mutate(|state| {
            let progress = state.progress_by_mode.get_mut(mode);
            progress.record(score);
            *progress
        })
        .await
    }

    pub async fn increment_questions_answered(&self) -> u32 {
        self.mutate(count_answered).await
    }

    /// Store feedback, count the submission and bump the answered counter in one write.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError::MissingAnswer` if no answer is stored for `id`;
    /// nothing is changed in that case.
    pub async fn record_submission(
        &self,
        id: &QuestionId,
        feedback: Feedback,
    ) -> Result<ModuleProgress, SessionStoreError> {
        let mode = id.mode();
        let score = feedback.score;
        self.try_mutate(|state| {
            if !state.answers.contains_key(id) {
                return Err(SessionStoreError::MissingAnswer(id.clone()));
            }
            state.feedback.insert(id.clone(), feedback);
            count_answered(state);
            let progress = state.progress_by_mode.get_mut(mode);
            progress.record(score);
            Ok(*progress)
        })
        .await
    }

    /// Zero `mode`'s progress and drop its answers and feedback.
    pub async fn reset_mode_progress(&self, mode: StudyMode) {
        log::info!("resetting progress for {mode}");
        self.mutate(|state| {
            state.progress_by_mode.get_mut(mode).reset();
            state.clear_mode_entries(mode);
        })
        .await;
    }

    /// Zero every mode's progress and clear answers, feedback and hints.
    pub async fn reset_all_progress(&self) {
        log::info!("resetting all progress");
        self.mutate(|state| {
            state.progress_by_mode.reset_all();
            state.answers.clear();
            state.feedback.clear();
            state.hints_shown.clear();
        })
        .await;
    }

    /// Drop `mode`'s answers and feedback but keep its progress counters.
    pub async fn clear_mode_attempt(&self, mode: StudyMode) {
        self.mutate(|state| state.clear_mode_entries(mode)).await;
    }

    /// Start a fresh attempt at `mode` and make it the current mode.
    pub async fn begin_attempt(&self, mode: StudyMode) {
        self.mutate(|state| {
            state.clear_mode_entries(mode);
            state.current_mode = Some(mode);
        })
        .await;
    }

    fn read(&self) -> MutexGuard<'_, SessionSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn mutate<T>(&self, f: impl FnOnce(&mut SessionSnapshot) -> T) -> T {
        match self.try_mutate(|state| Ok::<_, Infallible>(f(state))).await {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    async fn try_mutate<T, E>(
        &self,
        f: impl FnOnce(&mut SessionSnapshot) -> Result<T, E>,
    ) -> Result<T, E> {
        let _gate = self.write_gate.lock().await;
        let (value, encoded) = {
            let mut state = self.read();
            let value = f(&mut state)?;
            (value, state.to_json())
        };
        self.revision.fetch_add(1, Ordering::AcqRel);
        self.persist(encoded).await;
        Ok(value)
    }

    async fn persist(&self, encoded: Result<String, SnapshotError>) {
        if self.persistence_status().is_degraded() {
            return;
        }
        let result = match encoded {
            Ok(json) => self
                .storage
                .set(self.key.as_str(), &json)
                .await
                .map_err(|err| err.to_string()),
            Err(err) => Err(err.to_string()),
        };
        if let Err(reason) = result {
            log::warn!(
                "session {} is no longer persisted, continuing in memory: {reason}",
                self.key
            );
            *self
                .persistence
                .lock()
                .unwrap_or_else(PoisonError::into_inner) = PersistenceStatus::Degraded { reason };
        }
    }
}

fn count_answered(state: &mut SessionSnapshot) -> u32 {
    state.questions_answered = state.questions_answered.saturating_add(1);
    state.questions_answered
}

fn degraded_start(
    key: &SessionKey,
    err: &dyn std::fmt::Display,
) -> (SessionSnapshot, PersistenceStatus) {
    log::warn!("could not load session {key}, continuing in memory: {err}");
    (
        SessionSnapshot::default(),
        PersistenceStatus::Degraded {
            reason: err.to_string(),
        },
    )
}
