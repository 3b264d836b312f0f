// SPDX-License-Identifier: MIT
//
// FIFO toast queue with tick-driven autohide.
//
//   trigger ──▶ [ t0 | t1 | t2 ] ──▶ rendered top to bottom
//                  │
//                  ├── close(id)  user dismissed it
//                  ├── tick(now)  deadline passed (autohide only)
//                  └── clear()    everything goes
//
// Each entry leaves the queue exactly once, whichever path gets there
// first. Closing an id that is already gone is a no-op.

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Message shown when the caller doesn't provide one.
pub const DEFAULT_MESSAGE: &str = "Default Toast Message";

/// How long an autohide toast stays up by default.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

// ─── Message ─────────────────────────────────────────────────────────────────

/// An optional action button on a toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastButton {
    pub label: String,
    /// Action key the host dispatches when the button is pressed.
    pub action: String,
}

/// What the caller asks to show. Missing fields take the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastMessage {
    pub message: String,
    /// Hide after `timeout`; when false the toast waits for dismissal.
    pub autohide: bool,
    #[serde(with = "millis")]
    pub timeout: Duration,
    /// Background class or color for the toast body.
    pub background: Option<String>,
    pub button: Option<ToastButton>,
}

impl Default for ToastMessage {
    fn default() -> Self {
        Self {
            message: DEFAULT_MESSAGE.to_owned(),
            autohide: true,
            timeout: DEFAULT_TIMEOUT,
            background: None,
            button: None,
        }
    }
}

impl ToastMessage {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Keep the toast up until it is dismissed.
    #[must_use]
    pub fn persistent(self) -> Self {
        Self {
            autohide: false,
            ..self
        }
    }

    #[must_use]
    pub fn timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    #[must_use]
    pub fn background(self, background: impl Into<String>) -> Self {
        Self {
            background: Some(background.into()),
            ..self
        }
    }

    #[must_use]
    pub fn button(self, label: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            button: Some(ToastButton {
                label: label.into(),
                action: action.into(),
            }),
            ..self
        }
    }
}

/// Durations as whole milliseconds on the wire.
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

// ─── Toast ───────────────────────────────────────────────────────────────────

/// Identifies a toast for dismissal. Never reused within a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToastId(u64);

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast#{}", self.0)
    }
}

/// A queued toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: ToastId,
    #[serde(flatten)]
    pub message: ToastMessage,
    /// When autohide removes it. `None` for persistent toasts.
    #[serde(skip)]
    deadline: Option<Instant>,
}

impl Toast {
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    fn expired(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| d <= now)
    }
}

// ─── Queue ───────────────────────────────────────────────────────────────────

/// Toasts in arrival order.
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    next_id: u64,
}

impl ToastQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a toast. Autohide toasts get a deadline of `now + timeout`.
    pub fn trigger(&mut self, message: ToastMessage, now: Instant) -> ToastId {
        let id = ToastId(self.next_id);
        self.next_id += 1;

        let deadline = message.autohide.then(|| now + message.timeout);
        debug!(%id, autohide = message.autohide, timeout_ms = message.timeout.as_millis(), "toast queued");
        self.toasts.push_back(Toast {
            id,
            message,
            deadline,
        });
        id
    }

    /// Dismiss a toast. Returns it if it was still queued.
    pub fn close(&mut self, id: ToastId) -> Option<Toast> {
        let index = self.toasts.iter().position(|t| t.id == id)?;
        debug!(%id, "toast closed");
        self.toasts.remove(index)
    }

    /// Drop every toast.
    pub fn clear(&mut self) {
        self.toasts.clear();
    }

    /// Remove and return every toast whose deadline is at or before `now`,
    /// oldest first.
    pub fn tick(&mut self, now: Instant) -> Vec<Toast> {
        if !self.toasts.iter().any(|t| t.expired(now)) {
            return Vec::new();
        }

        let (expired, kept): (VecDeque<Toast>, VecDeque<Toast>) =
            self.toasts.drain(..).partition(|t| t.expired(now));
        self.toasts = kept;
        for t in &expired {
            debug!(id = %t.id, "toast timed out");
        }
        expired.into()
    }

    /// The earliest pending deadline, for scheduling the next tick.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.toasts.iter().filter_map(|t| t.deadline).min()
    }

    #[must_use]
    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.id == id)
    }

    /// Toasts in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn messages(q: &ToastQueue) -> Vec<&str> {
        q.iter().map(|t| t.message.message.as_str()).collect()
    }

    // ── Defaults ─────────────────────────────────────────────────────

    #[test]
    fn defaults() {
        let m = ToastMessage::default();
        assert_eq!(m.message, "Default Toast Message");
        assert!(m.autohide);
        assert_eq!(m.timeout, ms(5000));
        assert_eq!(m.background, None);
        assert_eq!(m.button, None);
    }

    #[test]
    fn builder() {
        let m = ToastMessage::new("Saved")
            .timeout(ms(1500))
            .background("variant-filled-success")
            .button("Undo", "undo-save");
        assert_eq!(m.message, "Saved");
        assert_eq!(m.timeout, ms(1500));
        assert_eq!(m.background.as_deref(), Some("variant-filled-success"));
        assert_eq!(m.button.map(|b| b.action), Some("undo-save".to_owned()));
    }

    // ── Queue order and ids ──────────────────────────────────────────

    #[test]
    fn fifo_order_and_unique_ids() {
        let now = Instant::now();
        let mut q = ToastQueue::new();
        let a = q.trigger(ToastMessage::new("a"), now);
        let b = q.trigger(ToastMessage::new("b"), now);
        let c = q.trigger(ToastMessage::new("c"), now);
        assert!(a < b && b < c);
        assert_eq!(messages(&q), vec!["a", "b", "c"]);
    }

    #[test]
    fn ids_not_reused_after_clear() {
        let now = Instant::now();
        let mut q = ToastQueue::new();
        let first = q.trigger(ToastMessage::default(), now);
        q.clear();
        assert!(q.is_empty());
        let second = q.trigger(ToastMessage::default(), now);
        assert_ne!(first, second);
    }

    // ── Dismissal ────────────────────────────────────────────────────

    #[test]
    fn close_removes_only_that_toast() {
        let now = Instant::now();
        let mut q = ToastQueue::new();
        q.trigger(ToastMessage::new("a"), now);
        let b = q.trigger(ToastMessage::new("b"), now);
        q.trigger(ToastMessage::new("c"), now);

        let closed = q.close(b).expect("b is queued");
        assert_eq!(closed.message.message, "b");
        assert_eq!(messages(&q), vec!["a", "c"]);
    }

    #[test]
    fn close_unknown_is_noop() {
        let now = Instant::now();
        let mut q = ToastQueue::new();
        let a = q.trigger(ToastMessage::new("a"), now);
        q.trigger(ToastMessage::new("b"), now);
        assert!(q.close(a).is_some());
        assert!(q.close(a).is_none());
        assert_eq!(messages(&q), vec!["b"]);
    }

    // ── Autohide ─────────────────────────────────────────────────────

    #[test]
    fn tick_expires_due_toasts_in_order() {
        let now = Instant::now();
        let mut q = ToastQueue::new();
        q.trigger(ToastMessage::new("slow").timeout(ms(3000)), now);
        q.trigger(ToastMessage::new("fast").timeout(ms(1000)), now);
        q.trigger(ToastMessage::new("sticky").persistent(), now);

        assert!(q.tick(now + ms(999)).is_empty());

        let gone = q.tick(now + ms(1000));
        assert_eq!(gone.len(), 1);
        assert_eq!(gone[0].message.message, "fast");
        assert_eq!(messages(&q), vec!["slow", "sticky"]);

        let gone = q.tick(now + ms(60_000));
        assert_eq!(gone.len(), 1);
        assert_eq!(messages(&q), vec!["sticky"]);
    }

    #[test]
    fn persistent_never_expires() {
        let now = Instant::now();
        let mut q = ToastQueue::new();
        let id = q.trigger(ToastMessage::new("sticky").persistent(), now);
        assert_eq!(q.get(id).and_then(Toast::deadline), None);
        assert!(q.tick(now + Duration::from_secs(3600)).is_empty());
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn closed_toast_does_not_expire_later() {
        let now = Instant::now();
        let mut q = ToastQueue::new();
        let id = q.trigger(ToastMessage::new("bye").timeout(ms(100)), now);
        assert!(q.close(id).is_some());
        assert!(q.tick(now + ms(200)).is_empty());
    }

    #[test]
    fn next_deadline_is_earliest() {
        let now = Instant::now();
        let mut q = ToastQueue::new();
        assert_eq!(q.next_deadline(), None);
        q.trigger(ToastMessage::new("a").timeout(ms(800)), now);
        q.trigger(ToastMessage::new("b").timeout(ms(300)), now);
        q.trigger(ToastMessage::new("c").persistent(), now);
        assert_eq!(q.next_deadline(), Some(now + ms(300)));
    }

    // ── Wire format ──────────────────────────────────────────────────

    #[test]
    fn partial_message_takes_defaults() {
        let m: ToastMessage =
            serde_json::from_str(r#"{"message": "Copied!", "timeout": 2000}"#).expect("valid json");
        assert_eq!(m.message, "Copied!");
        assert!(m.autohide);
        assert_eq!(m.timeout, ms(2000));
    }
}
