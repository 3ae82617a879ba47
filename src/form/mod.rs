pub mod models;
pub mod session;
pub mod submit;

pub use models::{Row, SearchForm, SectionKind, UnknownSection};
pub use session::FormSessions;
pub use submit::{submit_search, SubmitOutcome};

/// A button press on the search page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    Search,
    AddRow(SectionKind),
    RemoveRow(String),
}

impl FormAction {
    /// Decode the `action` field: `search`, `add:<section>` or
    /// `delete:<row id>`.
    pub fn parse(raw: &str) -> Result<Self, String> {
        if raw == "search" {
            return Ok(FormAction::Search);
        }
        if let Some(section) = raw.strip_prefix("add:") {
            return section
                .parse::<SectionKind>()
                .map(FormAction::AddRow)
                .map_err(|e| e.to_string());
        }
        if let Some(id) = raw.strip_prefix("delete:") {
            return Ok(FormAction::RemoveRow(id.to_string()));
        }
        Err(format!("unknown form action: {}", raw))
    }
}
