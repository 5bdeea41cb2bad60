//! Core traits for the generative-model boundary.
//!
//! These traits define the only suspending operations in fieldbox. Concrete
//! implementations live in `fieldbox-assist` (the Gemini REST backend and a
//! deterministic mock); everything above the boundary is written against the
//! traits so backends stay pluggable and testable.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::GroundedReply;

/// One-shot chat generation with a system framing.
///
/// Each call is stateless from the model's perspective: the conversation
/// history beyond the latest message is never replayed, only the system
/// framing and the message itself are sent.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Generate a reply to `message` under `system` framing.
    async fn generate_with_system(&self, system: &str, message: &str) -> Result<String>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}

/// One-shot, web-search-grounded generation.
///
/// Invocations are independent; callers may have several in flight at once
/// with no shared state between them.
#[async_trait]
pub trait GroundedSearchBackend: Send + Sync {
    /// Generate a grounded answer for `prompt`, returning the raw text and
    /// grounding citations as the model produced them (normalization is the
    /// caller's job).
    async fn generate_grounded(&self, prompt: &str) -> Result<GroundedReply>;
}
