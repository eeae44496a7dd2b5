//! Transient on-screen notices with timed fade-out.

use std::time::{Duration, Instant};

/// Lifecycle phase of a notice at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticePhase {
    /// Fully visible.
    Visible,
    /// In its fade-out window.
    Fading,
    /// Past the fade window; dropped on the next sweep.
    Expired,
}

/// One transient notice.
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    posted: Instant,
}

impl Notice {
    /// When the notice was posted.
    pub fn posted(&self) -> Instant {
        self.posted
    }
}

/// Queue of transient notices.
///
/// Every surfaced error passes through here; notices are never fatal and
/// auto-dismiss after a fixed visible window plus a fade. Time is passed in
/// explicitly so expiry is testable.
#[derive(Debug, Clone)]
pub struct NoticeCenter {
    notices: Vec<Notice>,
    duration: Duration,
    fade: Duration,
}

impl NoticeCenter {
    /// Create a center with the given visible and fade windows.
    pub fn new(duration: Duration, fade: Duration) -> Self {
        Self {
            notices: Vec::new(),
            duration,
            fade,
        }
    }

    /// Post a notice, also tracing it to the log.
    pub fn post(&mut self, message: impl Into<String>, now: Instant) {
        let message = message.into();
        log::warn!("{message}");
        self.notices.push(Notice {
            message,
            posted: now,
        });
    }

    /// Phase of a notice at `now`.
    pub fn phase(&self, notice: &Notice, now: Instant) -> NoticePhase {
        let age = now.saturating_duration_since(notice.posted);
        if age < self.duration {
            NoticePhase::Visible
        } else if age < self.duration + self.fade {
            NoticePhase::Fading
        } else {
            NoticePhase::Expired
        }
    }

    /// Notices still on screen (visible or fading) at `now`.
    pub fn active(&self, now: Instant) -> impl Iterator<Item = &Notice> {
        self.notices
            .iter()
            .filter(move |notice| self.phase(notice, now) != NoticePhase::Expired)
    }

    /// Drop expired notices.
    pub fn sweep(&mut self, now: Instant) {
        let duration = self.duration;
        let fade = self.fade;
        self.notices
            .retain(|notice| now.saturating_duration_since(notice.posted) < duration + fade);
    }

    /// Number of notices still tracked (including expired, pre-sweep).
    pub fn len(&self) -> usize {
        self.notices.len()
    }

    /// Check whether no notices are tracked.
    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}
