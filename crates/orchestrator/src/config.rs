//! Orchestrator configuration.

use std::time::Duration;

/// Default time budget for each outbound gateway call.
pub const DEFAULT_GATEWAY_TIMEOUT: Duration = Duration::from_secs(2);

/// Time budgets for outbound calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// Budget for resolving parts during order creation.
    pub inventory_timeout: Duration,
    /// Budget for executing a payment.
    pub payment_timeout: Duration,
}

impl OrchestratorConfig {
    /// Uses the same budget for every gateway.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            inventory_timeout: timeout,
            payment_timeout: timeout,
        }
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self::with_timeout(DEFAULT_GATEWAY_TIMEOUT)
    }
}
