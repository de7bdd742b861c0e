use chrono::{DateTime, Utc};

/// Pausable elapsed-time counter for the active study mode.
///
/// Callers pass the current instant in, usually from `Clock::now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudyTimer {
    started_at: DateTime<Utc>,
    /// Seconds banked before the current running stretch.
    banked_secs: u64,
    paused_at: Option<DateTime<Utc>>,
}

impl StudyTimer {
    #[must_use]
    pub fn start(now: DateTime<Utc>) -> Self {
        Self {
            started_at: now,
            banked_secs: 0,
            paused_at: None,
        }
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub fn pause(&mut self, now: DateTime<Utc>) {
        if self.paused_at.is_none() {
            self.banked_secs += running_secs(self.started_at, now);
            self.paused_at = Some(now);
        }
    }

    pub fn resume(&mut self, now: DateTime<Utc>) {
        if self.paused_at.take().is_some() {
            self.started_at = now;
        }
    }

    pub fn toggle(&mut self, now: DateTime<Utc>) {
        if self.is_paused() {
            self.resume(now);
        } else {
            self.pause(now);
        }
    }

    #[must_use]
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> u64 {
        if self.paused_at.is_some() {
            self.banked_secs
        } else {
            self.banked_secs + running_secs(self.started_at, now)
        }
    }
}

fn running_secs(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    u64::try_from((to - from).num_seconds()).unwrap_or(0)
}

/// `"1h 2m 3s"`, or `"2m 3s"` under an hour.
#[must_use]
pub fn format_elapsed(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else {
        format!("{minutes}m {secs}s")
    }
}
