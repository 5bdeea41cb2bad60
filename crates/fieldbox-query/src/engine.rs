//! Two-stage document filtering: category selection, then substring search.

use tracing::debug;

use fieldbox_core::{CategoryFilter, Document};

/// Compute the ordered visible subset of `docs` for `filter` and `search`.
///
/// Stage 1 applies the category filter: `FAVORITES` keeps favorited
/// documents, `ALL` keeps everything, and a specific equipment category
/// keeps exact category matches. Stage 2, applied only when `search` is
/// non-empty, keeps documents where the lowercased query is a substring of
/// the title, manufacturer, model series, or any one tag. A document either
/// matches or it does not; survivors keep their stage-1 relative order.
///
/// Whitespace-only search text counts as non-empty and is matched literally.
pub fn visible_documents(
    docs: &[Document],
    filter: &CategoryFilter,
    search: &str,
) -> Vec<Document> {
    let needle = search.to_lowercase();

    let visible: Vec<Document> = docs
        .iter()
        .filter(|doc| matches_category(doc, filter))
        .filter(|doc| search.is_empty() || matches_search(doc, &needle))
        .cloned()
        .collect();

    debug!(
        subsystem = "query",
        component = "engine",
        op = "visible_documents",
        filter = %filter,
        query = search,
        result_count = visible.len(),
        "Query evaluated"
    );
    visible
}

fn matches_category(doc: &Document, filter: &CategoryFilter) -> bool {
    match filter {
        CategoryFilter::All => true,
        CategoryFilter::Favorites => doc.is_favorite,
        CategoryFilter::Equipment(category) => doc.category == *category,
    }
}

/// Case-insensitive substring match against the searchable fields.
/// `needle` must already be lowercased.
fn matches_search(doc: &Document, needle: &str) -> bool {
    doc.title.to_lowercase().contains(needle)
        || doc.manufacturer.to_lowercase().contains(needle)
        || doc.model_series.to_lowercase().contains(needle)
        || doc.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
}
