//! Structured logging schema and field name constants for fieldbox.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized field names across
//! every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, fallback value served to the caller |
//! | INFO  | Lifecycle events (startup, seed), mutation completions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-item iteration (per-document match checks) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "api", "store", "query", "assist"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "catalog", "accounts", "gemini", "session", "resolver"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "add", "update", "toggle_favorite", "send", "explain"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Document id being operated on.
pub const DOCUMENT_ID: &str = "document_id";

/// Account id being operated on.
pub const ACCOUNT_ID: &str = "account_id";

/// Search query text.
pub const QUERY: &str = "query";

/// Technical term being explained.
pub const TERM: &str = "term";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned by a search or query.
pub const RESULT_COUNT: &str = "result_count";

/// Number of grounding sources after deduplication.
pub const SOURCE_COUNT: &str = "source_count";

/// Byte length of a prompt.
pub const PROMPT_LEN: &str = "prompt_len";

/// Byte length of a model response.
pub const RESPONSE_LEN: &str = "response_len";

// ─── Inference fields ──────────────────────────────────────────────────────

/// Model name used for inference.
pub const MODEL: &str = "model";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
