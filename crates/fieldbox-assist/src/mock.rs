//! Mock model backend for deterministic testing.
//!
//! Implements both boundary traits with scripted responses, optional
//! simulated latency, and a call log for assertions. Failures are scripted
//! explicitly rather than sampled, so tests stay reproducible.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use fieldbox_core::{ChatBackend, Error, GroundedReply, GroundedSearchBackend, Result};

/// One logged boundary call.
#[derive(Debug, Clone)]
pub struct MockCall {
    /// "chat" or "grounded".
    pub operation: String,
    pub input: String,
    /// System framing for chat calls; grounded calls carry none.
    pub system: Option<String>,
}

#[derive(Debug, Clone)]
struct MockConfig {
    default_reply: String,
    mapped_replies: HashMap<String, String>,
    grounded_reply: GroundedReply,
    latency_ms: u64,
    fail: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            default_reply: "Mock reply".to_string(),
            mapped_replies: HashMap::new(),
            grounded_reply: GroundedReply::default(),
            latency_ms: 0,
            fail: false,
        }
    }
}

/// Deterministic in-memory model backend.
#[derive(Clone, Default)]
pub struct MockModelBackend {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

impl MockModelBackend {
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the reply used when no mapping matches.
    pub fn with_default_reply(mut self, reply: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).default_reply = reply.into();
        self
    }

    /// Add a reply mapping for a specific chat message.
    pub fn with_reply_mapping(
        mut self,
        message: impl Into<String>,
        reply: impl Into<String>,
    ) -> Self {
        Arc::make_mut(&mut self.config)
            .mapped_replies
            .insert(message.into(), reply.into());
        self
    }

    /// Set the grounded reply served to `generate_grounded`.
    pub fn with_grounded_reply(mut self, reply: GroundedReply) -> Self {
        Arc::make_mut(&mut self.config).grounded_reply = reply;
        self
    }

    /// Set simulated latency for all operations.
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        Arc::make_mut(&mut self.config).latency_ms = latency_ms;
        self
    }

    /// Make every call fail with an inference error.
    pub fn with_failure(mut self, fail: bool) -> Self {
        Arc::make_mut(&mut self.config).fail = fail;
        self
    }

    /// All logged calls, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Number of chat calls issued.
    pub fn chat_call_count(&self) -> usize {
        self.calls().iter().filter(|c| c.operation == "chat").count()
    }

    /// Number of grounded calls issued.
    pub fn grounded_call_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.operation == "grounded")
            .count()
    }

    fn log_call(&self, operation: &str, input: &str, system: Option<&str>) {
        self.call_log.lock().unwrap().push(MockCall {
            operation: operation.to_string(),
            input: input.to_string(),
            system: system.map(str::to_string),
        });
    }

    async fn simulate_latency(&self) {
        if self.config.latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.config.latency_ms)).await;
        }
    }
}

#[async_trait]
impl ChatBackend for MockModelBackend {
    async fn generate_with_system(&self, system: &str, message: &str) -> Result<String> {
        self.log_call("chat", message, Some(system));
        self.simulate_latency().await;

        if self.config.fail {
            return Err(Error::Inference("Simulated failure".to_string()));
        }

        if let Some(reply) = self.config.mapped_replies.get(message) {
            return Ok(reply.clone());
        }
        Ok(self.config.default_reply.clone())
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

#[async_trait]
impl GroundedSearchBackend for MockModelBackend {
    async fn generate_grounded(&self, prompt: &str) -> Result<GroundedReply> {
        self.log_call("grounded", prompt, None);
        self.simulate_latency().await;

        if self.config.fail {
            return Err(Error::Inference("Simulated failure".to_string()));
        }
        Ok(self.config.grounded_reply.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mapped_replies_take_precedence() {
        let backend = MockModelBackend::new()
            .with_default_reply("default")
            .with_reply_mapping("hello", "world");

        assert_eq!(
            backend.generate_with_system("s", "hello").await.unwrap(),
            "world"
        );
        assert_eq!(
            backend.generate_with_system("s", "other").await.unwrap(),
            "default"
        );
    }

    #[tokio::test]
    async fn failure_is_deterministic() {
        let backend = MockModelBackend::new().with_failure(true);
        assert!(backend.generate_with_system("s", "m").await.is_err());
        assert!(backend.generate_grounded("p").await.is_err());
    }

    #[tokio::test]
    async fn call_log_records_operations_in_order() {
        let backend = MockModelBackend::new();

        backend.generate_with_system("s", "一つ目").await.unwrap();
        backend.generate_grounded("二つ目").await.unwrap();

        let calls = backend.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].operation, "chat");
        assert_eq!(calls[1].operation, "grounded");
        assert_eq!(backend.chat_call_count(), 1);
        assert_eq!(backend.grounded_call_count(), 1);
    }
}
