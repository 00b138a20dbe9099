use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

const BUILTIN: &str = include_str!("../seed/movies.json");

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub genres: Vec<String>,
    pub users: Vec<UserSeed>,
    pub movies: Vec<MovieSeed>,
    pub reviews: Vec<ReviewSeed>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct UserSeed {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MovieSeed {
    pub title: String,
    pub release_year: i32,
    /// Genre name, resolved to an id at seed time.
    pub genre: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ReviewSeed {
    pub movie_title: String,
    pub user_email: String,
    pub rating: f64,
    #[serde(default)]
    pub comment: Option<String>,
}

impl Dataset {
    pub fn builtin() -> anyhow::Result<Self> {
        serde_json::from_str(BUILTIN).context("parsing built-in seed dataset")
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&data).with_context(|| format!("failed to parse {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn builtin_dataset_shape() {
        let ds = Dataset::builtin().unwrap();
        assert_eq!(ds.genres.len(), 9);
        assert_eq!(ds.users.len(), 2);
        assert_eq!(ds.movies.len(), 10);
        assert_eq!(ds.reviews.len(), 3);
    }

    #[test]
    fn builtin_references_resolve_within_dataset() {
        let ds = Dataset::builtin().unwrap();
        for movie in &ds.movies {
            assert!(ds.genres.contains(&movie.genre), "unknown genre {}", movie.genre);
        }
        for review in &ds.reviews {
            assert!(ds.movies.iter().any(|m| m.title == review.movie_title));
            assert!(ds.users.iter().any(|u| u.email == review.user_email));
        }
    }

    #[test]
    fn from_path_fills_missing_sections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "genres": ["Western"],
                "reviews": [{{ "movie_title": "Unforgiven", "user_email": "a@example.com", "rating": 9 }}]
            }}"#
        )
        .unwrap();

        let ds = Dataset::from_path(file.path()).unwrap();
        assert_eq!(ds.genres, vec!["Western".to_string()]);
        assert!(ds.users.is_empty());
        assert!(ds.movies.is_empty());
        assert_eq!(ds.reviews[0].rating, 9.0);
        assert_eq!(ds.reviews[0].comment, None);
    }

    #[test]
    fn from_path_reports_bad_files() {
        let err = Dataset::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = Dataset::from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }
}
