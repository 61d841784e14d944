// Copyright (C) 2026 Agio Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operator notification seam.
//!
//! Operations report outcomes through a [`Notifier`] rather than logging
//! directly, so embedders can route messages to whatever surface they
//! have. The default implementation writes structured log records.

/// The severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// The operation completed.
    Success,
    /// The operation failed or was partially applied.
    Error,
}

/// Receives outcome notifications from the caller-facing operations.
pub trait Notifier {
    /// Delivers a notification.
    fn notify(&mut self, kind: NotificationKind, message: &str);
}

/// A notifier that writes to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&mut self, kind: NotificationKind, message: &str) {
        match kind {
            NotificationKind::Success => tracing::info!("{message}"),
            NotificationKind::Error => tracing::warn!("{message}"),
        }
    }
}
