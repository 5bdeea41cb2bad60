//! Grounded-explanation resolver.
//!
//! Single-shot: one search-grounded request per technical term, normalized
//! into text plus a uri-unique source list. This boundary never raises;
//! once a call settles the caller always has a renderable value.

use std::collections::HashSet;

use tracing::{debug, warn};

use fieldbox_core::{defaults, Explanation, GroundedReply, GroundedSearchBackend, Source};

use crate::prompts;

/// Explain `term` via one web-search-grounded model call.
///
/// On success the primary text is returned with the grounding citations
/// normalized and deduplicated; a missing/empty model text falls back to a
/// fixed string rather than an empty answer. On failure a fixed
/// error-explanation with no sources is returned.
///
/// Invocations are independent; callers may run several in parallel. A
/// caller presenting results to a single surface must render the latest
/// invocation's result (last-request-wins is the presenter's obligation).
pub async fn explain(backend: &dyn GroundedSearchBackend, term: &str) -> Explanation {
    let prompt = prompts::explanation_prompt(term);

    match backend.generate_grounded(&prompt).await {
        Ok(reply) => {
            let explanation = normalize(reply);
            debug!(
                subsystem = "assist",
                component = "resolver",
                op = "explain",
                term,
                source_count = explanation.sources.len(),
                success = true,
                "Explanation resolved"
            );
            explanation
        }
        Err(e) => {
            warn!(
                subsystem = "assist",
                component = "resolver",
                op = "explain",
                term,
                error = %e,
                success = false,
                "Boundary call failed; serving fallback explanation"
            );
            Explanation {
                text: defaults::EXPLANATION_ERROR_TEXT.to_string(),
                sources: Vec::new(),
            }
        }
    }
}

/// Normalize a raw grounded reply: apply the text fallback, fill missing
/// citation titles with the placeholder, and deduplicate by uri keeping the
/// first occurrence and its order.
fn normalize(reply: GroundedReply) -> Explanation {
    let text = reply
        .text
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| defaults::EXPLANATION_EMPTY_TEXT.to_string());

    let mut seen = HashSet::new();
    let sources = reply
        .citations
        .into_iter()
        .filter(|c| seen.insert(c.uri.clone()))
        .map(|c| Source {
            title: c
                .title
                .unwrap_or_else(|| defaults::SOURCE_TITLE_PLACEHOLDER.to_string()),
            uri: c.uri,
        })
        .collect();

    Explanation { text, sources }
}
