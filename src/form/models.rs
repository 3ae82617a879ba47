use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::models::SearchRequest;
use crate::utils::{parse_leading_int, random_row_id};

/// The two row sections of the search form. The string form doubles as the
/// DOM id of the section's `<tbody>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Filters,
    Searches,
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Filters => "filters",
            SectionKind::Searches => "searches",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSection(pub String);

impl fmt::Display for UnknownSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown form section: {}", self.0)
    }
}

impl std::error::Error for UnknownSection {}

impl FromStr for SectionKind {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "filters" => Ok(SectionKind::Filters),
            "searches" => Ok(SectionKind::Searches),
            other => Err(UnknownSection(other.to_string())),
        }
    }
}

/// One name/value entry of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub id: String,
    pub name: String,
    pub value: String,
}

impl Row {
    fn blank() -> Self {
        Self {
            id: random_row_id(),
            name: String::new(),
            value: String::new(),
        }
    }
}

/// Per-browser state of the search page: the data rows of both sections and
/// the last rendered result listing. The page appends two structural rows
/// (add control, spacer) after each section's data rows; those are never
/// part of this model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchForm {
    filters: Vec<Row>,
    searches: Vec<Row>,
    results: Vec<String>,
}

impl SearchForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self, section: SectionKind) -> &[Row] {
        match section {
            SectionKind::Filters => &self.filters,
            SectionKind::Searches => &self.searches,
        }
    }

    fn rows_mut(&mut self, section: SectionKind) -> &mut Vec<Row> {
        match section {
            SectionKind::Filters => &mut self.filters,
            SectionKind::Searches => &mut self.searches,
        }
    }

    /// Append an empty row to `section`, just before its add control.
    /// Returns the new row's id.
    pub fn add_row(&mut self, section: SectionKind) -> String {
        let row = Row::blank();
        let id = row.id.clone();
        self.rows_mut(section).push(row);
        id
    }

    /// Remove the row with `id` from whichever section holds it. Unknown ids
    /// are ignored; the return value says whether anything was removed.
    pub fn remove_row(&mut self, id: &str) -> bool {
        for section in [SectionKind::Filters, SectionKind::Searches] {
            let rows = self.rows_mut(section);
            if let Some(pos) = rows.iter().position(|r| r.id == id) {
                rows.remove(pos);
                return true;
            }
        }
        false
    }

    fn row_mut(&mut self, id: &str) -> Option<&mut Row> {
        self.filters
            .iter_mut()
            .chain(self.searches.iter_mut())
            .find(|r| r.id == id)
    }

    pub fn set_name(&mut self, id: &str, name: &str) -> bool {
        match self.row_mut(id) {
            Some(row) => {
                row.name = name.to_string();
                true
            }
            None => false,
        }
    }

    pub fn set_value(&mut self, id: &str, value: &str) -> bool {
        match self.row_mut(id) {
            Some(row) => {
                row.value = value.to_string();
                true
            }
            None => false,
        }
    }

    /// Copy posted `name_<id>` / `value_<id>` inputs into the rows. Fields for
    /// rows that no longer exist are dropped.
    pub fn sync_inputs<'a, I>(&mut self, fields: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (key, val) in fields {
            if let Some(id) = key.strip_prefix("name_") {
                self.set_name(id, val);
            } else if let Some(id) = key.strip_prefix("value_") {
                self.set_value(id, val);
            }
        }
    }

    /// Build the request for the current rows. Filter values that start
    /// with an integer are sent as numbers; search values stay strings.
    /// Later rows win when names repeat.
    pub fn to_request(&self) -> SearchRequest {
        let mut request = SearchRequest::default();
        for row in &self.filters {
            let value = match parse_leading_int(&row.value) {
                Some(n) => Value::Number(n),
                None => Value::String(row.value.clone()),
            };
            request.filters.insert(row.name.clone(), value);
        }
        for row in &self.searches {
            request.searches.insert(row.name.clone(), row.value.clone());
        }
        request
    }

    pub fn results(&self) -> &[String] {
        &self.results
    }

    /// Clear the listing and store one JSON text per result item.
    pub fn replace_results(&mut self, items: &[Value]) {
        self.results = items
            .iter()
            .map(|item| serde_json::to_string(item).unwrap_or_default())
            .collect();
    }
}
