//! Session-local favorites.
//!
//! Kept separate from the `is_favorite` flag on the event record: toggling a
//! favorite here never changes what the query engine's `only_favorites`
//! filter returns.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserFavorites(BTreeSet<String>);

impl UserFavorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the id if absent, remove it if present. Returns whether the id is
    /// a favorite afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.0.remove(id) {
            false
        } else {
            self.0.insert(id.to_string());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Value-returning form of [`UserFavorites::toggle`].
pub fn toggle_favorite(mut favorites: UserFavorites, id: &str) -> UserFavorites {
    favorites.toggle(id);
    favorites
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut favorites = UserFavorites::new();
        assert!(favorites.toggle("1"));
        assert!(favorites.contains("1"));
        assert!(!favorites.toggle("1"));
        assert!(favorites.is_empty());
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        let start = ["1", "4", "9"]
            .into_iter()
            .fold(UserFavorites::new(), toggle_favorite);

        for id in ["1", "2", "9", "unknown"] {
            let back = toggle_favorite(toggle_favorite(start.clone(), id), id);
            assert_eq!(back, start, "toggling {id} twice changed the set");
        }
    }

    #[test]
    fn serializes_as_id_list() {
        let favorites = toggle_favorite(toggle_favorite(UserFavorites::new(), "b"), "a");
        assert_eq!(serde_json::to_string(&favorites).unwrap(), r#"["a","b"]"#);
        assert_eq!(favorites.iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
