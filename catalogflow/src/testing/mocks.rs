//! Stub transports for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io;
use std::time::Duration;

use crate::models::ShowPage;
use crate::transport::{CatalogTransport, Category, StatusFailure};

/// A failure a [`StubTransport`] raises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubFailure {
    /// An I/O error of kind `TimedOut`.
    Timeout,
    /// An I/O error of the given kind.
    Io(io::ErrorKind),
    /// A non-2xx response.
    Status {
        /// HTTP status.
        status: u16,
        /// Response body.
        body: String,
    },
    /// An unclassified failure with this message.
    Other(String),
}

impl StubFailure {
    /// Creates a status failure.
    #[must_use]
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    fn raise(&self, category: Category) -> anyhow::Error {
        match self {
            Self::Timeout => io::Error::new(io::ErrorKind::TimedOut, format!("{category} timed out")).into(),
            Self::Io(kind) => io::Error::new(*kind, format!("{category} I/O failure")).into(),
            Self::Status { status, body } => StatusFailure::new(*status, body.clone()).into(),
            Self::Other(message) => anyhow::anyhow!("{message}"),
        }
    }
}

#[derive(Debug, Clone)]
struct Scripted {
    response: Result<ShowPage, StubFailure>,
    delay: Duration,
}

/// A transport answering from scripted per-category responses.
///
/// Unscripted categories fail with an unclassified error.
#[derive(Debug, Default)]
pub struct StubTransport {
    scripts: HashMap<Category, Scripted>,
    calls: Mutex<Vec<Category>>,
}

impl StubTransport {
    /// Creates a stub with no scripted responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `category` with `page`.
    #[must_use]
    pub fn with_page(mut self, category: Category, page: ShowPage) -> Self {
        self.script(category, Ok(page));
        self
    }

    /// Answers `category` by raising `failure`.
    #[must_use]
    pub fn with_failure(mut self, category: Category, failure: StubFailure) -> Self {
        self.script(category, Err(failure));
        self
    }

    /// Delays the answer for `category`.
    #[must_use]
    pub fn with_delay(mut self, category: Category, delay: Duration) -> Self {
        self.scripts
            .entry(category)
            .or_insert_with(|| Scripted {
                response: Err(StubFailure::Other(format!("no stub response for {category}"))),
                delay: Duration::ZERO,
            })
            .delay = delay;
        self
    }

    fn script(&mut self, category: Category, response: Result<ShowPage, StubFailure>) {
        let delay = self.scripts.get(&category).map_or(Duration::ZERO, |s| s.delay);
        self.scripts.insert(category, Scripted { response, delay });
    }

    /// Returns the categories fetched so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<Category> {
        self.calls.lock().clone()
    }

    /// Returns how often `category` was fetched.
    #[must_use]
    pub fn call_count(&self, category: Category) -> usize {
        self.calls.lock().iter().filter(|c| **c == category).count()
    }
}

#[async_trait]
impl CatalogTransport for StubTransport {
    async fn fetch(&self, category: Category) -> anyhow::Result<ShowPage> {
        self.calls.lock().push(category);

        let Some(scripted) = self.scripts.get(&category).cloned() else {
            return Err(anyhow::anyhow!("no stub response for {category}"));
        };
        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        scripted.response.map_err(|failure| failure.raise(category))
    }
}
