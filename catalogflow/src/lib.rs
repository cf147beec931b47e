//! # Catalogflow
//!
//! Concurrent assembly of catalog collections over a railway-oriented
//! result algebra.
//!
//! Catalogflow provides:
//!
//! - **A failure taxonomy**: [`ErrorKind`](errors::ErrorKind) and
//!   [`classify`](errors::classify), turning opaque fetch failures into a
//!   closed set of kinds
//! - **Two result types**: [`Outcome`](outcome::Outcome) for the data layer
//!   and [`DomainResult`](outcome::DomainResult) for the domain layer, sharing
//!   one combinator library
//! - **Fan-out / fan-in aggregation**: [`Aggregator`](aggregator::Aggregator)
//!   launches every fetch before awaiting any, then folds the results in
//!   declared order and short-circuits on the first error in that order
//! - **A catalog client**: repositories, use cases and a home state holder
//!   built on a pluggable [`CatalogTransport`](transport::CatalogTransport)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use catalogflow::prelude::*;
//!
//! let transport = HttpCatalogTransport::new(CatalogConfig::new().with_api_key(key))?;
//! let home = HomeViewModel::with_transport(Arc::new(transport));
//!
//! match home.refresh().await {
//!     DomainResult::Success((movies, tv)) => render(movies, tv),
//!     DomainResult::Error(error) => eprintln!("{error}"),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod aggregator;
pub mod config;
pub mod errors;
pub mod home;
pub mod models;
pub mod observability;
pub mod outcome;
pub mod repository;
pub mod testing;
pub mod transport;
pub mod usecase;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::aggregator::Aggregator;
    pub use crate::config::CatalogConfig;
    pub use crate::errors::{classify, CatalogflowError, Cause, ErrorKind};
    pub use crate::home::{HomeState, HomeViewModel};
    pub use crate::models::{MovieCollection, Show, ShowPage, TvCollection};
    pub use crate::observability::{init_tracing, LogFormat};
    pub use crate::outcome::{execute, AsSuccess, DomainResult, Outcome};
    pub use crate::repository::{MovieRepository, TvRepository};
    pub use crate::transport::{CatalogTransport, Category, StatusFailure};
    #[cfg(feature = "http")]
    pub use crate::transport::HttpCatalogTransport;
    pub use crate::usecase::{GetMovieCollection, GetTvCollection, UseCase};
}
