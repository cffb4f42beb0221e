// Comma-joined id lists as stored in the favorite and deleted ledgers
use std::collections::BTreeSet;

use crate::models::ProductId;

/// Set of product ids kept in a ledger record
pub type IdSet = BTreeSet<ProductId>;

/// Parse a ledger field. A missing or blank field is an empty set.
pub fn parse_id_list(raw: Option<&str>) -> IdSet {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ProductId::parse)
        .collect()
}

/// Serialize a set back into the ledger's comma-joined form
pub fn join_id_list(ids: &IdSet) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Copy of `ids` with `id` flipped in or out
pub fn toggled(ids: &IdSet, id: &ProductId) -> IdSet {
    let mut next = ids.clone();
    if !next.remove(id) {
        next.insert(id.clone());
    }
    next
}

/// Copy of `ids` with `id` added
pub fn with_added(ids: &IdSet, id: &ProductId) -> IdSet {
    let mut next = ids.clone();
    next.insert(id.clone());
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_or_blank_field_is_empty() {
        assert!(parse_id_list(None).is_empty());
        assert!(parse_id_list(Some("")).is_empty());
        assert!(parse_id_list(Some(" , ,")).is_empty());
    }

    #[test]
    fn test_parse_mixed_ids() {
        let ids = parse_id_list(Some("3,recX, 12,3"));
        assert_eq!(ids.len(), 3);
        assert!(ids.contains(&ProductId::Numeric(3)));
        assert!(ids.contains(&ProductId::Numeric(12)));
        assert!(ids.contains(&ProductId::Text("recX".into())));
    }

    #[test]
    fn test_join_is_canonical() {
        let ids = parse_id_list(Some("recX,12,3"));
        assert_eq!(join_id_list(&ids), "3,12,recX");
        assert_eq!(parse_id_list(Some(&join_id_list(&ids))), ids);
    }

    #[test]
    fn test_toggle_twice_restores_set() {
        let original = parse_id_list(Some("1,2"));
        let id = ProductId::Numeric(5);

        let once = toggled(&original, &id);
        assert!(once.contains(&id));
        assert_eq!(toggled(&once, &id), original);

        let removed = toggled(&original, &ProductId::Numeric(1));
        assert!(!removed.contains(&ProductId::Numeric(1)));
    }

    #[test]
    fn test_with_added_is_idempotent() {
        let ids = parse_id_list(Some("1"));
        let added = with_added(&ids, &ProductId::Numeric(1));
        assert_eq!(added, ids);
    }
}
