//! Home screen state holder.
//!
//! [`HomeViewModel`] runs the movie and TV use cases side by side, combines
//! their results with the movie result on the left, and publishes the
//! outcome on a `watch` channel for any number of observers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{error, info};

use crate::errors::ErrorKind;
use crate::models::{MovieCollection, TvCollection};
use crate::outcome::DomainResult;
use crate::repository::{MovieRepository, TvRepository};
use crate::transport::CatalogTransport;
use crate::usecase::{GetMovieCollection, GetTvCollection, UseCase};

/// Snapshot published to observers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HomeState {
    /// Last successfully fetched movie collection.
    pub movies: Option<MovieCollection>,
    /// Last successfully fetched TV collection.
    pub tv: Option<TvCollection>,
    /// True while a refresh is in flight.
    pub refreshing: bool,
    /// Error of the most recent refresh, if it failed.
    #[serde(skip)]
    pub error: Option<ErrorKind>,
    /// When the collections were last replaced.
    pub updated_at: Option<DateTime<Utc>>,
}

impl HomeState {
    /// Returns true when both collections are present.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.movies.is_some() && self.tv.is_some()
    }
}

/// Holds the home screen state and refreshes it from the use cases.
pub struct HomeViewModel<M, T> {
    movies: M,
    tv: T,
    state: watch::Sender<HomeState>,
}

impl<M, T> HomeViewModel<M, T>
where
    M: UseCase<Input = (), Output = MovieCollection>,
    T: UseCase<Input = (), Output = TvCollection>,
{
    /// Creates a view model with an empty state.
    #[must_use]
    pub fn new(movies: M, tv: T) -> Self {
        let (state, _) = watch::channel(HomeState::default());
        Self { movies, tv, state }
    }

    /// Returns a receiver observing every published state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<HomeState> {
        self.state.subscribe()
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn state(&self) -> HomeState {
        self.state.borrow().clone()
    }

    /// Fetches both collections and publishes the combined result.
    ///
    /// On error the previous collections are kept and the error recorded.
    pub async fn refresh(&self) -> DomainResult<(MovieCollection, TvCollection)> {
        self.state.send_modify(|state| state.refreshing = true);

        let (movies, tv) = tokio::join!(self.movies.invoke(()), self.tv.invoke(()));

        movies
            .zip(tv)
            .on_success(|(movies, tv)| {
                info!("home collections refreshed");
                self.state.send_modify(|state| {
                    state.movies = Some(movies.clone());
                    state.tv = Some(tv.clone());
                    state.error = None;
                    state.updated_at = Some(Utc::now());
                    state.refreshing = false;
                });
            })
            .on_error(|err| {
                error!(error_kind = err.kind_name(), error = %err, "home refresh failed");
                self.state.send_modify(|state| {
                    state.error = Some(err.clone());
                    state.refreshing = false;
                });
            })
    }
}

impl HomeViewModel<GetMovieCollection, GetTvCollection> {
    /// Wires both use cases to one shared transport.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn CatalogTransport>) -> Self {
        Self::new(
            GetMovieCollection::new(MovieRepository::new(Arc::clone(&transport))),
            GetTvCollection::new(TvRepository::new(transport)),
        )
    }
}

impl<M, T> std::fmt::Debug for HomeViewModel<M, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomeViewModel")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}
