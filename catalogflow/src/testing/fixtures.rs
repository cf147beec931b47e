//! Test fixtures for catalog data.

use crate::models::{Show, ShowPage};
use crate::transport::Category;

use super::StubTransport;

/// Builds `count` shows named `{prefix} 1`, `{prefix} 2`, ...
#[must_use]
pub fn sample_shows(prefix: &str, count: usize) -> Vec<Show> {
    (1..=count)
        .map(|n| {
            let id = i64::try_from(n).unwrap_or(i64::MAX);
            Show::new(id, format!("{prefix} {n}")).with_poster_path(format!("/{prefix}-{n}.jpg"))
        })
        .collect()
}

/// Builds a page of [`sample_shows`].
#[must_use]
pub fn sample_page(prefix: &str, count: usize) -> ShowPage {
    ShowPage::new(sample_shows(prefix, count))
}

/// A stub answering every category with a distinct sample page.
///
/// Each page is prefixed with the category name and holds two shows.
#[must_use]
pub fn stub_all_categories() -> StubTransport {
    Category::ALL.iter().fold(StubTransport::new(), |stub, category| {
        stub.with_page(*category, sample_page(&category.to_string(), 2))
    })
}
