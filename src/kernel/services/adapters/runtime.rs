use std::io;

use crate::kernel::services::ports::{AsyncExecutor, BoxFuture};

/// Tokio-backed executor for hosts that don't bring their own runtime.
pub struct TokioExecutor {
    runtime: tokio::runtime::Runtime,
}

impl TokioExecutor {
    pub fn new() -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        Ok(Self { runtime })
    }

    pub fn handle(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }
}

impl AsyncExecutor for TokioExecutor {
    fn spawn(&self, task: BoxFuture) {
        self.runtime.spawn(task);
    }
}
