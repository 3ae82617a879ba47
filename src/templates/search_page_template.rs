use askama::Template;

use crate::form::Row;

/// The search page. Element ids (`searchinfo`, `filters`, `searches`,
/// `resultlisting`) are part of the page contract.
#[derive(Template)]
#[template(path = "search.html")]
pub struct SearchPageTemplate<'a> {
    pub base_url: String,
    pub filters: &'a [Row],
    pub searches: &'a [Row],
    pub results: &'a [String],
    pub document_count: usize,
}
