// SPDX-License-Identifier: MIT
//
// swatch-toast — the notification queue behind swatchbook's toasts.
//
// Toasts are shown in arrival order. Each one either persists until the
// user dismisses it or hides itself after a timeout. Timeouts are plain
// deadlines checked on the host's tick, the same way an event loop drives
// cursor blink: no background threads, no timers to cancel. Dismissing a
// toast drops its deadline with it.

pub mod queue;

pub use queue::{Toast, ToastButton, ToastId, ToastMessage, ToastQueue};
