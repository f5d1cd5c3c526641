use crate::models::{FilterCriteria, Movie};

/// Derives the filtered view of `movies` under `criteria`
///
/// Genre, year and rating predicates are applied in that order and combine by
/// conjunction; each is skipped when its criterion is absent. The input is never
/// mutated and the relative order of kept movies is preserved.
pub fn filter(movies: &[Movie], criteria: &FilterCriteria) -> Vec<Movie> {
    movies
        .iter()
        .filter(|m| matches_genre(m, criteria))
        .filter(|m| matches_year(m, criteria))
        .filter(|m| matches_rating(m, criteria))
        .cloned()
        .collect()
}

fn matches_genre(movie: &Movie, criteria: &FilterCriteria) -> bool {
    criteria
        .genre
        .map_or(true, |genre| movie.genre_ids.contains(&genre))
}

// Plain prefix test: an undated movie never matches a year.
fn matches_year(movie: &Movie, criteria: &FilterCriteria) -> bool {
    criteria
        .year
        .as_deref()
        .map_or(true, |year| movie.release_date.starts_with(year))
}

fn matches_rating(movie: &Movie, criteria: &FilterCriteria) -> bool {
    criteria
        .min_rating
        .map_or(true, |min| movie.vote_average >= min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GenreId, MovieId};

    fn movie(id: MovieId, genres: &[GenreId], release_date: &str, vote_average: f64) -> Movie {
        Movie {
            id,
            title: format!("Movie {}", id),
            overview: String::new(),
            poster_path: None,
            release_date: release_date.to_string(),
            vote_average,
            genre_ids: genres.iter().copied().collect(),
        }
    }

    fn ids(movies: &[Movie]) -> Vec<MovieId> {
        movies.iter().map(|m| m.id).collect()
    }

    fn sample() -> Vec<Movie> {
        vec![
            movie(1, &[28], "2021-01-01", 8.1),
            movie(2, &[35], "2019-06-01", 5.0),
            movie(3, &[28, 35], "2020-05-01", 7.0),
            movie(4, &[18], "", 6.9),
            movie(5, &[28], "2020-11-30", 6.9),
        ]
    }

    #[test]
    fn test_no_criteria_keeps_everything() {
        let movies = sample();
        assert_eq!(filter(&movies, &FilterCriteria::default()), movies);
    }

    #[test]
    fn test_genre_only_keeps_members_in_order() {
        let result = filter(&sample(), &FilterCriteria::genre(28));
        assert_eq!(ids(&result), vec![1, 3, 5]);
    }

    #[test]
    fn test_year_is_prefix_match() {
        let movies = vec![
            movie(1, &[], "2020-05-01", 5.0),
            movie(2, &[], "2019-12-31", 5.0),
            movie(3, &[], "", 5.0),
        ];

        let result = filter(&movies, &FilterCriteria::year("2020"));
        assert_eq!(ids(&result), vec![1]);
    }

    #[test]
    fn test_partial_year_prefix() {
        let result = filter(&sample(), &FilterCriteria::year("202"));
        assert_eq!(ids(&result), vec![1, 3, 5]);
    }

    #[test]
    fn test_min_rating_is_inclusive() {
        let movies = vec![movie(1, &[], "", 7.0), movie(2, &[], "", 6.9)];

        let result = filter(&movies, &FilterCriteria::min_rating(7.0));
        assert_eq!(ids(&result), vec![1]);
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let criteria = FilterCriteria {
            genre: Some(28),
            year: Some("2020".to_string()),
            min_rating: Some(7.0),
        };

        assert_eq!(ids(&filter(&sample(), &criteria)), vec![3]);
    }

    #[test]
    fn test_input_untouched_and_idempotent() {
        let movies = sample();
        let criteria = FilterCriteria::genre(35);

        let first = filter(&movies, &criteria);
        let second = filter(&movies, &criteria);

        assert_eq!(first, second);
        assert_eq!(movies, sample());
    }

    #[test]
    fn test_unknown_genre_yields_empty_view() {
        assert!(filter(&sample(), &FilterCriteria::genre(9999)).is_empty());
    }
}
