//! Repositories wrapping one transport call per category.
//!
//! Every method returns a `'static` future so use cases can spawn it
//! directly. The future runs the transport call through
//! [`execute`](crate::outcome::execute) and then refines status failures
//! into [`ErrorKind::AuthorizationError`] or [`ErrorKind::ApiError`].

use crate::errors::ErrorKind;
use crate::models::ShowPage;
use crate::outcome::{execute, Outcome};
use crate::transport::{CatalogTransport, Category, StatusFailure};
use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Fetches `category` and classifies the result.
fn fetch_category(
    transport: &Arc<dyn CatalogTransport>,
    category: Category,
) -> BoxFuture<'static, Outcome<ShowPage>> {
    let transport = Arc::clone(transport);
    async move {
        debug!(category = %category, "fetching catalog page");
        execute(transport.fetch(category))
            .await
            .catch(|error| Outcome::Error(refine_status(error)))
            .tap_success(|page| debug!(category = %category, shows = page.len(), "catalog page fetched"))
            .tap_error(|error| {
                warn!(
                    category = %category,
                    error_kind = error.kind_name(),
                    error = %error,
                    "catalog fetch failed"
                );
            })
    }
    .boxed()
}

/// Turns an unclassified [`StatusFailure`] into the kind its status implies.
///
/// 401 and 403 become [`ErrorKind::AuthorizationError`]; any other status
/// becomes [`ErrorKind::ApiError`] with the body decoded as JSON when
/// possible. Every other error is returned unchanged.
#[must_use]
pub fn refine_status(error: ErrorKind) -> ErrorKind {
    let ErrorKind::UnknownError { cause } = &error else {
        return error;
    };
    let Some(failure) = cause.find::<StatusFailure>() else {
        return error;
    };

    let code = i32::from(failure.status);
    let body = decode_body(&failure.body);
    if failure.is_authorization() {
        ErrorKind::authorization(authorization_message(&body), code, cause.clone())
    } else {
        ErrorKind::api(body, code, cause.clone())
    }
}

fn decode_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

fn authorization_message(body: &Value) -> String {
    match body {
        Value::Object(map) => map
            .get("status_message")
            .and_then(Value::as_str)
            .unwrap_or("Unauthorized")
            .to_string(),
        Value::String(text) if !text.is_empty() => text.clone(),
        _ => "Unauthorized".to_string(),
    }
}

/// Movie categories.
#[derive(Clone)]
pub struct MovieRepository {
    transport: Arc<dyn CatalogTransport>,
}

impl MovieRepository {
    /// Creates a repository over `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn CatalogTransport>) -> Self {
        Self { transport }
    }

    /// Popular movies.
    pub fn get_popular(&self) -> BoxFuture<'static, Outcome<ShowPage>> {
        fetch_category(&self.transport, Category::MoviePopular)
    }

    /// Trending movies.
    pub fn get_trending(&self) -> BoxFuture<'static, Outcome<ShowPage>> {
        fetch_category(&self.transport, Category::MovieTrending)
    }

    /// Top rated movies.
    pub fn get_top_rated(&self) -> BoxFuture<'static, Outcome<ShowPage>> {
        fetch_category(&self.transport, Category::MovieTopRated)
    }

    /// Movies now playing.
    pub fn get_now_playing(&self) -> BoxFuture<'static, Outcome<ShowPage>> {
        fetch_category(&self.transport, Category::MovieNowPlaying)
    }
}

impl std::fmt::Debug for MovieRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MovieRepository").finish_non_exhaustive()
    }
}

/// TV categories.
#[derive(Clone)]
pub struct TvRepository {
    transport: Arc<dyn CatalogTransport>,
}

impl TvRepository {
    /// Creates a repository over `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn CatalogTransport>) -> Self {
        Self { transport }
    }

    /// Popular TV shows.
    pub fn get_popular(&self) -> BoxFuture<'static, Outcome<ShowPage>> {
        fetch_category(&self.transport, Category::TvPopular)
    }

    /// Trending TV shows.
    pub fn get_trending(&self) -> BoxFuture<'static, Outcome<ShowPage>> {
        fetch_category(&self.transport, Category::TvTrending)
    }

    /// Top rated TV shows.
    pub fn get_top_rated(&self) -> BoxFuture<'static, Outcome<ShowPage>> {
        fetch_category(&self.transport, Category::TvTopRated)
    }
}

impl std::fmt::Debug for TvRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TvRepository").finish_non_exhaustive()
    }
}
