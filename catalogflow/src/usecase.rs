//! Use cases assembling catalog aggregates.
//!
//! Each use case is an orchestration entry point: calling
//! [`UseCase::invoke`] fans out one fetch per field of its aggregate and
//! folds the results back in a fixed order through an [`Aggregator`].

use crate::aggregator::Aggregator;
use crate::models::{MovieCollection, ShowPage, TvCollection};
use crate::outcome::DomainResult;
use crate::repository::{MovieRepository, TvRepository};
use async_trait::async_trait;

/// An orchestration entry point producing a [`DomainResult`].
#[async_trait]
pub trait UseCase: Send + Sync {
    /// Input accepted by the use case.
    type Input: Send + 'static;
    /// Value produced on success.
    type Output: Send + 'static;

    /// Runs the use case.
    async fn invoke(&self, input: Self::Input) -> DomainResult<Self::Output>;
}

/// Assembles a [`MovieCollection`].
///
/// Declared order: now playing, popular, top rated, trending.
#[derive(Debug, Clone)]
pub struct GetMovieCollection {
    repository: MovieRepository,
}

impl GetMovieCollection {
    /// Creates the use case.
    #[must_use]
    pub fn new(repository: MovieRepository) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UseCase for GetMovieCollection {
    type Input = ();
    type Output = MovieCollection;

    async fn invoke(&self, _input: ()) -> DomainResult<MovieCollection> {
        Aggregator::new("movie_collection", MovieCollection::default())
            .fetch(
                "now_playing",
                self.repository.get_now_playing(),
                |acc: &mut MovieCollection, page: ShowPage| acc.now_playing = page.shows,
            )
            .fetch(
                "popular",
                self.repository.get_popular(),
                |acc: &mut MovieCollection, page: ShowPage| acc.popular = page.shows,
            )
            .fetch(
                "top_rated",
                self.repository.get_top_rated(),
                |acc: &mut MovieCollection, page: ShowPage| acc.top_rated = page.shows,
            )
            .fetch(
                "trending",
                self.repository.get_trending(),
                |acc: &mut MovieCollection, page: ShowPage| acc.trending = page.shows,
            )
            .run()
            .await
    }
}

/// Assembles a [`TvCollection`].
///
/// Declared order: popular, trending, top rated.
#[derive(Debug, Clone)]
pub struct GetTvCollection {
    repository: TvRepository,
}

impl GetTvCollection {
    /// Creates the use case.
    #[must_use]
    pub fn new(repository: TvRepository) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UseCase for GetTvCollection {
    type Input = ();
    type Output = TvCollection;

    async fn invoke(&self, _input: ()) -> DomainResult<TvCollection> {
        Aggregator::new("tv_collection", TvCollection::default())
            .fetch(
                "popular",
                self.repository.get_popular(),
                |acc: &mut TvCollection, page: ShowPage| acc.popular = page.shows,
            )
            .fetch(
                "trending",
                self.repository.get_trending(),
                |acc: &mut TvCollection, page: ShowPage| acc.trending = page.shows,
            )
            .fetch(
                "top_rated",
                self.repository.get_top_rated(),
                |acc: &mut TvCollection, page: ShowPage| acc.top_rated = page.shows,
            )
            .run()
            .await
    }
}
