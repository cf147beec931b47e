//! Transport seam for fetching catalog pages.
//!
//! This module provides:
//! - The [`Category`] of every remote collection and its endpoint path
//! - The [`CatalogTransport`] trait a network layer implements
//! - [`StatusFailure`], the failure a transport raises for non-2xx answers
//! - An HTTP implementation on `reqwest` (feature `http`)

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::HttpCatalogTransport;

use crate::models::ShowPage;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A remote collection that can be fetched independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Popular movies.
    MoviePopular,
    /// Top rated movies.
    MovieTopRated,
    /// Movies trending this week.
    MovieTrending,
    /// Movies now in theatres.
    MovieNowPlaying,
    /// Popular TV shows.
    TvPopular,
    /// Top rated TV shows.
    TvTopRated,
    /// TV shows trending this week.
    TvTrending,
}

impl Category {
    /// Every category, movies first.
    pub const ALL: [Self; 7] = [
        Self::MoviePopular,
        Self::MovieTopRated,
        Self::MovieTrending,
        Self::MovieNowPlaying,
        Self::TvPopular,
        Self::TvTopRated,
        Self::TvTrending,
    ];

    /// Endpoint path relative to the versioned API root.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::MoviePopular => "/movie/popular",
            Self::MovieTopRated => "/movie/top_rated",
            Self::MovieTrending => "/trending/movie/week",
            Self::MovieNowPlaying => "/movie/now_playing",
            Self::TvPopular => "/tv/popular",
            Self::TvTopRated => "/tv/top_rated",
            Self::TvTrending => "/trending/tv/week",
        }
    }

    /// Returns true for movie categories.
    #[must_use]
    pub fn is_movie(self) -> bool {
        matches!(
            self,
            Self::MoviePopular | Self::MovieTopRated | Self::MovieTrending | Self::MovieNowPlaying
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoviePopular => write!(f, "movie_popular"),
            Self::MovieTopRated => write!(f, "movie_top_rated"),
            Self::MovieTrending => write!(f, "movie_trending"),
            Self::MovieNowPlaying => write!(f, "movie_now_playing"),
            Self::TvPopular => write!(f, "tv_popular"),
            Self::TvTopRated => write!(f, "tv_top_rated"),
            Self::TvTrending => write!(f, "tv_trending"),
        }
    }
}

/// Raised by a transport when the endpoint answers with a non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("HTTP {status}: {body}")]
pub struct StatusFailure {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

impl StatusFailure {
    /// Creates a new status failure.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status means missing or rejected credentials.
    #[must_use]
    pub fn is_authorization(&self) -> bool {
        matches!(self.status, 401 | 403)
    }
}

/// Protocol for fetching one page of a catalog category.
///
/// Implementations return the decoded page or raise a failure: a timeout
/// signal, an I/O error, a [`StatusFailure`], or anything else. Failures
/// are classified by the caller, never by the transport.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    /// Fetches the first page of `category`.
    async fn fetch(&self, category: Category) -> anyhow::Result<ShowPage>;
}
