use crate::session::Principal;

use super::model::Collection;

/// Pure visibility predicate: public collections are readable by anyone,
/// private ones only by their owner.
pub fn can_read(principal: Option<&Principal>, collection: &Collection) -> bool {
    collection.is_public || can_mutate(principal, collection)
}

/// Pure mutation predicate: only the owner may curate a collection,
/// whatever its visibility.
pub fn can_mutate(principal: Option<&Principal>, collection: &Collection) -> bool {
    principal.is_some_and(|p| p.id == collection.owner_id)
}
