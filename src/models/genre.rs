use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::GenreId;

/// A catalog genre
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

impl Genre {
    pub fn new(id: GenreId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Genre id → name mapping for the whole catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreCatalog {
    names: BTreeMap<GenreId, String>,
}

impl GenreCatalog {
    /// Looks up the display name of a genre
    pub fn name(&self, id: GenreId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Picker options ordered by genre id
    pub fn options(&self) -> Vec<Genre> {
        self.names
            .iter()
            .map(|(id, name)| Genre::new(*id, name.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<Genre> for GenreCatalog {
    fn from_iter<I: IntoIterator<Item = Genre>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(|g| (g.id, g.name)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> GenreCatalog {
        vec![
            Genre::new(35, "Comedy"),
            Genre::new(28, "Action"),
            Genre::new(18, "Drama"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_name_lookup() {
        let catalog = catalog();
        assert_eq!(catalog.name(28), Some("Action"));
        assert_eq!(catalog.name(99), None);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_options_sorted_by_id() {
        let ids: Vec<GenreId> = catalog().options().iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![18, 28, 35]);
    }

    #[test]
    fn test_default_is_empty() {
        assert!(GenreCatalog::default().is_empty());
    }
}
