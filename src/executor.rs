use futures::future::BoxFuture;

/// Fire-and-forget execution primitive for work that must outlive the call
/// that produced it.
///
/// The caching layer hands revalidation tasks to an implementation of this
/// trait and never awaits them; it owns no scheduler of its own. The
/// implementation must let a scheduled task run to completion even after
/// the response that triggered it has been delivered, and must not surface
/// task failures to the caller.
pub trait BackgroundExecutor: Send + Sync {
    /// Hand off a task. Returns immediately.
    fn schedule(&self, task: BoxFuture<'static, ()>);
}

/// Executor backed by the tokio runtime.
pub struct TokioExecutor;

impl BackgroundExecutor for TokioExecutor {
    fn schedule(&self, task: BoxFuture<'static, ()>) {
        tokio::spawn(task);
    }
}
