//! Request context passed to every query.
//!
//! Binds a resolution pipeline to the caller's request: once the paired
//! `CancelHandle` fires, in-flight fetches are abandoned and the query returns
//! `ResolveError::Cancelled`.

use tokio::sync::watch;

/// The caller's side of a request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    cancelled: watch::Receiver<bool>,
}

/// Cancels the `RequestContext` it was created with (and all its clones).
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl RequestContext {
    /// A cancellable context and its handle.
    pub fn new() -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        (Self { cancelled: rx }, CancelHandle { tx })
    }

    /// A context that is never cancelled.
    pub fn background() -> Self {
        let (_, rx) = watch::channel(false);
        Self { cancelled: rx }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.borrow()
    }

    /// Resolves once the context is cancelled. Never resolves for a
    /// background context or after the handle is dropped uncancelled.
    pub async fn cancelled(&self) {
        let mut rx = self.cancelled.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::background()
    }
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn cancel_wakes_waiters() {
        let (ctx, handle) = RequestContext::new();
        assert!(!ctx.is_cancelled());

        let waiter = ctx.clone();
        let task = tokio::spawn(async move { waiter.cancelled().await });
        handle.cancel();

        task.await.unwrap();
        assert!(ctx.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn background_never_cancels() {
        let ctx = RequestContext::background();
        let outcome = tokio::time::timeout(Duration::from_secs(60), ctx.cancelled()).await;
        assert!(outcome.is_err());
        assert!(!ctx.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_handle_does_not_cancel() {
        let (ctx, handle) = RequestContext::new();
        drop(handle);
        let outcome = tokio::time::timeout(Duration::from_secs(60), ctx.cancelled()).await;
        assert!(outcome.is_err());
    }
}
