use crate::warn;
use async_trait::async_trait;
use std::time::Duration;

/// The network link underneath all remote calls.
#[async_trait]
pub trait Connectivity: Send {
    fn is_connected(&self) -> bool;
    /// Tears the link down and brings it back up. Returns once the link had
    /// a chance to come back, not necessarily once it is up.
    async fn restart(&mut self);
}

/// Link of a hosted system where the operating system owns the network.
///
/// It always reports a connection and a restart only waits for the network
/// stack to settle.
pub struct HostLink {
    settle_delay: Duration,
    restarts: u32,
}

impl HostLink {
    pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(5);

    pub fn new() -> Self { Self { settle_delay: Self::DEFAULT_SETTLE_DELAY, restarts: 0 } }
}

impl Default for HostLink {
    fn default() -> Self { Self::new() }
}

#[async_trait]
impl Connectivity for HostLink {
    fn is_connected(&self) -> bool { true }

    async fn restart(&mut self) {
        self.restarts += 1;
        warn!(
            "Restarting network link (restart #{}), waiting {}s",
            self.restarts,
            self.settle_delay.as_secs()
        );
        tokio::time::sleep(self.settle_delay).await;
    }
}
