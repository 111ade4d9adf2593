//! Cooperative cancellation for request processing.
//!
//! A [`CancellationSource`] owns the signal; the [`CancellationToken`]s it
//! hands out are cheap to clone and are threaded from the dispatcher down to
//! every store and cache call. I/O runs under [`CancellationToken::run`],
//! which drops the in-flight future when the signal fires.

use crate::{EshopError, EshopResult};
use std::future::Future;
use tokio::sync::watch;

/// Owner side of a cancellation signal.
#[derive(Debug)]
pub struct CancellationSource {
    sender: watch::Sender<bool>,
}

impl CancellationSource {
    /// Creates a new, not yet cancelled source.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self { sender }
    }

    /// Returns a token observing this source.
    #[must_use]
    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            receiver: Some(self.sender.subscribe()),
        }
    }

    /// Signals cancellation to every token.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    /// Returns true once `cancel` has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }
}

impl Default for CancellationSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer side of a cancellation signal.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    receiver: Option<watch::Receiver<bool>>,
}

impl CancellationToken {
    /// A token that is never cancelled.
    #[must_use]
    pub const fn none() -> Self {
        Self { receiver: None }
    }

    /// Returns true if cancellation has been signalled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.receiver.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Fails with [`EshopError::Cancelled`] if cancellation has been signalled.
    pub fn ensure_active(&self) -> EshopResult<()> {
        if self.is_cancelled() {
            Err(EshopError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Resolves once cancellation is signalled. Never resolves for
    /// [`CancellationToken::none`] or when the source was dropped uncancelled.
    pub async fn cancelled(&self) {
        let Some(receiver) = &self.receiver else {
            return std::future::pending().await;
        };

        let mut receiver = receiver.clone();
        if receiver.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }

    /// Runs `future` unless cancellation fires first, in which case the
    /// future is dropped and [`EshopError::Cancelled`] is returned.
    pub async fn run<T, F>(&self, future: F) -> EshopResult<T>
    where
        F: Future<Output = EshopResult<T>>,
    {
        self.ensure_active()?;

        tokio::select! {
            biased;
            () = self.cancelled() => Err(EshopError::Cancelled),
            result = future => result,
        }
    }
}
