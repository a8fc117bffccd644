//! Pacing between sends

use std::time::Duration;

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

/// Suspends the batch between recipients
#[async_trait]
pub trait Pacer: Send + Sync + 'static {
    /// Wait for `delay` before the next recipient is processed
    async fn pause(&self, delay: Duration);
}

#[cfg(test)]
mock! {
    pub Pacer {}

    #[async_trait]
    impl Pacer for Pacer {
        async fn pause(&self, delay: Duration);
    }
}

/// Pacer backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    #[mutants::skip]
    async fn pause(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}
