//! Logging SMS sender for development and testing

use async_trait::async_trait;
use pd_shared::mobile::{is_valid_local_mobile, mask_mobile};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::InfrastructureError;

use super::SmsSender;

/// SMS sender that records a masked delivery in the log
///
/// The message body is never logged because it carries the code.
#[derive(Clone, Default)]
pub struct LogSmsSender {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures
    simulate_failure: Arc<AtomicBool>,
}

impl LogSmsSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the total number of messages sent
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }
}

#[async_trait]
impl SmsSender for LogSmsSender {
    async fn send_sms(&self, mobile: &str, message: &str) -> Result<String, InfrastructureError> {
        if !is_valid_local_mobile(mobile) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid mobile number format: {}",
                mask_mobile(mobile)
            )));
        }

        if self.simulate_failure.load(Ordering::SeqCst) {
            return Err(InfrastructureError::Sms("Simulated SMS failure".to_string()));
        }

        let message_id = format!("log-{}", Uuid::new_v4());
        self.message_count.fetch_add(1, Ordering::SeqCst);

        info!(
            mobile = %mask_mobile(mobile),
            message_id = %message_id,
            length = message.chars().count(),
            event = "sms_logged",
            "SMS delivery logged"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "log"
    }
}
