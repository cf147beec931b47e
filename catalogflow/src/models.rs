//! Catalog data models.
//!
//! [`Show`] and [`ShowPage`] mirror the remote JSON; [`MovieCollection`] and
//! [`TvCollection`] are the aggregates the use cases assemble.

use serde::{Deserialize, Serialize};

/// Base URL for poster images.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500/";

/// A single movie or TV show entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    /// Remote identifier.
    pub id: i64,
    /// Display name (TV) or title (movies).
    #[serde(default, alias = "title")]
    pub name: Option<String>,
    /// Original-language name.
    #[serde(default, alias = "original_title")]
    pub original_name: Option<String>,
    /// Plot summary.
    #[serde(default)]
    pub overview: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// First air date (TV) or release date (movies).
    #[serde(default, alias = "release_date")]
    pub first_air_date: Option<String>,
    /// Genre identifiers.
    #[serde(default)]
    pub genre_ids: Option<Vec<i64>>,
    /// Countries of origin.
    #[serde(default)]
    pub origin_country: Option<Vec<String>>,
    /// ISO language code.
    #[serde(default)]
    pub original_language: Option<String>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Average vote.
    #[serde(default)]
    pub vote_average: f64,
    /// Number of votes.
    #[serde(default)]
    pub vote_count: i64,
}

impl Show {
    /// Creates a show with only an id and a name.
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            original_name: None,
            overview: None,
            backdrop_path: None,
            poster_path: None,
            first_air_date: None,
            genre_ids: None,
            origin_country: None,
            original_language: None,
            popularity: 0.0,
            vote_average: 0.0,
            vote_count: 0,
        }
    }

    /// Sets the poster path.
    #[must_use]
    pub fn with_poster_path(mut self, path: impl Into<String>) -> Self {
        self.poster_path = Some(path.into());
        self
    }

    /// Returns the poster URL under the default image host.
    #[must_use]
    pub fn image_url(&self) -> String {
        self.image_url_with_base(DEFAULT_IMAGE_BASE_URL)
    }

    /// Returns the poster URL under `base`.
    #[must_use]
    pub fn image_url_with_base(&self, base: &str) -> String {
        let path = self.poster_path.as_deref().unwrap_or_default();
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// One page of results for a catalog category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShowPage {
    /// The shows on this page.
    #[serde(rename = "results", default)]
    pub shows: Option<Vec<Show>>,
}

impl ShowPage {
    /// Creates a page holding `shows`.
    #[must_use]
    pub fn new(shows: Vec<Show>) -> Self {
        Self { shows: Some(shows) }
    }

    /// Number of shows on the page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shows.as_ref().map_or(0, Vec::len)
    }

    /// Returns true when the page has no shows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Movie lists shown on the home screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieCollection {
    /// Movies now in theatres.
    pub now_playing: Option<Vec<Show>>,
    /// Movies trending this week.
    pub trending: Option<Vec<Show>>,
    /// Top rated movies.
    pub top_rated: Option<Vec<Show>>,
    /// Popular movies.
    pub popular: Option<Vec<Show>>,
}

impl MovieCollection {
    /// Returns true once every list has been filled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.now_playing.is_some()
            && self.trending.is_some()
            && self.top_rated.is_some()
            && self.popular.is_some()
    }
}

/// TV lists shown on the home screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TvCollection {
    /// Popular TV shows.
    pub popular: Option<Vec<Show>>,
    /// TV shows trending this week.
    pub trending: Option<Vec<Show>>,
    /// Top rated TV shows.
    pub top_rated: Option<Vec<Show>>,
}

impl TvCollection {
    /// Returns true once every list has been filled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.popular.is_some() && self.trending.is_some() && self.top_rated.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_show_page_from_json() {
        let json = r#"{
            "page": 1,
            "results": [
                {"id": 1399, "name": "Game of Thrones", "poster_path": "/got.jpg",
                 "vote_average": 8.4, "origin_country": ["US"]},
                {"id": 550, "title": "Fight Club", "release_date": "1999-10-15"}
            ]
        }"#;

        let page: ShowPage = serde_json::from_str(json).unwrap();
        let shows = page.shows.unwrap();

        assert_eq!(shows.len(), 2);
        assert_eq!(shows[0].name.as_deref(), Some("Game of Thrones"));
        assert_eq!(shows[0].vote_count, 0);
        assert_eq!(shows[1].name.as_deref(), Some("Fight Club"));
        assert_eq!(shows[1].first_air_date.as_deref(), Some("1999-10-15"));
    }

    #[test]
    fn test_show_page_without_results() {
        let page: ShowPage = serde_json::from_str("{}").unwrap();
        assert!(page.shows.is_none());
        assert!(page.is_empty());
    }

    #[test]
    fn test_image_url() {
        let show = Show::new(1, "Dark").with_poster_path("/apbrbWs8M9lyOpJYU5WXrpFbk1Z.jpg");
        assert_eq!(
            show.image_url(),
            "https://image.tmdb.org/t/p/w500/apbrbWs8M9lyOpJYU5WXrpFbk1Z.jpg"
        );
    }

    #[test]
    fn test_collections_start_empty() {
        assert!(!MovieCollection::default().is_complete());
        assert!(!TvCollection::default().is_complete());

        let tv = TvCollection {
            popular: Some(vec![]),
            trending: Some(vec![]),
            top_rated: Some(vec![]),
        };
        assert!(tv.is_complete());
    }
}
