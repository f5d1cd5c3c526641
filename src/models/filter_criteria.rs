use serde::{Deserialize, Serialize};

use super::GenreId;

/// Active constraints on the catalog view
///
/// Every field is independent; `None` means the field does not constrain the view.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterCriteria {
    #[serde(default)]
    pub genre: Option<GenreId>,
    /// Matched as a literal prefix of the release date
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub min_rating: Option<f64>,
}

impl FilterCriteria {
    pub fn genre(genre: GenreId) -> Self {
        Self {
            genre: Some(genre),
            ..Self::default()
        }
    }

    pub fn year(year: impl Into<String>) -> Self {
        Self {
            year: Some(year.into()),
            ..Self::default()
        }
    }

    pub fn min_rating(min_rating: f64) -> Self {
        Self {
            min_rating: Some(min_rating),
            ..Self::default()
        }
    }

    /// Drops inputs that cannot constrain anything: a blank year, a non-finite rating
    pub fn normalized(self) -> Self {
        let year = self
            .year
            .map(|y| y.trim().to_string())
            .filter(|y| !y.is_empty());
        let min_rating = self.min_rating.filter(|r| r.is_finite());

        Self {
            genre: self.genre,
            year,
            min_rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_drops_blank_year() {
        let criteria = FilterCriteria::year("  ").normalized();
        assert_eq!(criteria.year, None);
        assert_eq!(criteria, FilterCriteria::default());
    }

    #[test]
    fn test_normalized_trims_year() {
        let criteria = FilterCriteria::year(" 2020 ").normalized();
        assert_eq!(criteria.year.as_deref(), Some("2020"));
    }

    #[test]
    fn test_normalized_drops_nan_rating() {
        let criteria = FilterCriteria::min_rating(f64::NAN).normalized();
        assert_eq!(criteria.min_rating, None);
    }

    #[test]
    fn test_deserialize_partial() {
        let criteria: FilterCriteria = serde_json::from_str(r#"{"genre": 28}"#).unwrap();
        assert_eq!(criteria, FilterCriteria::genre(28));
    }
}
