use uuid::Uuid;

/// Generate a fresh record identifier.
///
/// Identifiers are random v4 UUIDs in simple (hyphen-free) form, so they are
/// never reused within a store's lifetime.
pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_distinct() {
        let ids: HashSet<String> = (0..1000).map(|_| new_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn ids_have_no_hyphens() {
        let id = new_id();
        assert_eq!(id.len(), 32);
        assert!(!id.contains('-'));
    }
}
