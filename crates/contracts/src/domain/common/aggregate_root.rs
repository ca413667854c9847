use super::{AggregateId, EntityMetadata};

/// Aggregate root of a document collection.
///
/// `New` is the validated payload for an insert (no id yet), `Patch` the
/// validated partial update. Stores assign the id and call [`assemble`] and
/// [`apply`], so insert/update semantics live with the aggregate.
///
/// [`assemble`]: AggregateRoot::assemble
/// [`apply`]: AggregateRoot::apply
pub trait AggregateRoot: Clone + Send + Sync + 'static {
    type Id: AggregateId;
    type New: Send + Sync + 'static;
    type Patch: Send + Sync + 'static;

    // ============================================================================
    // Instance data
    // ============================================================================

    fn id(&self) -> Self::Id;

    fn metadata(&self) -> &EntityMetadata;

    fn metadata_mut(&mut self) -> &mut EntityMetadata;

    /// Build a fresh aggregate from an insert payload
    fn assemble(id: Self::Id, new: Self::New) -> Self;

    /// Apply a partial update; fields absent from the patch stay untouched
    fn apply(&mut self, patch: &Self::Patch);

    /// Case-insensitive substring match; `term` is already lowercased
    fn matches_search(&self, term: &str) -> bool;

    // ============================================================================
    // Class metadata
    // ============================================================================

    /// Aggregate index (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// Collection name (e.g. "artists")
    fn collection_name() -> &'static str;

    /// UI name of one element
    fn element_name() -> &'static str;

    /// UI name of the list
    fn list_name() -> &'static str;

    /// Table name (e.g. "a001_artist")
    fn table_name() -> String;
}

pub(crate) fn contains_folded(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(term)
}

/// Client-side search over a loaded list; an empty term keeps everything
pub fn filter_by_search<T: AggregateRoot>(items: &[T], term: &str) -> Vec<T> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| item.matches_search(&term))
        .cloned()
        .collect()
}
