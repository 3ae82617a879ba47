use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::form::{submit_search, FormAction, SearchForm};
use crate::models::AppState;
use crate::templates::SearchPageTemplate;
use crate::utils::parse_form_pairs;

use super::helpers::{ensure_form_session, render_template, status_text};

pub async fn search_page_get(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (jar, sid) = ensure_form_session(&state, jar);
    let form = state.forms.snapshot(&sid).unwrap_or_else(SearchForm::new);
    let page = render_template(SearchPageTemplate {
        base_url: state.public_base_url.clone(),
        filters: form.rows(crate::form::SectionKind::Filters),
        searches: form.rows(crate::form::SectionKind::Searches),
        results: form.results(),
        document_count: state.store.len(),
    });
    (jar, page).into_response()
}

/// Every button on the page posts here. Typed input is synced into the
/// session first, then the pressed button's action runs, then the browser is
/// sent back to the page.
pub async fn search_page_post(State(state): State<AppState>, jar: CookieJar, body: Bytes) -> Response {
    let (jar, sid) = ensure_form_session(&state, jar);
    let fields = parse_form_pairs(&body);

    // A button's value is only posted for the button that was pressed.
    let action = fields
        .iter()
        .rev()
        .find(|(k, _)| k == "action")
        .map(|(_, v)| v.as_str())
        .unwrap_or("search");
    let action = match FormAction::parse(action) {
        Ok(a) => a,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected form action");
            return (jar, status_text(StatusCode::BAD_REQUEST, e)).into_response();
        }
    };

    state.forms.with_form(&sid, |form| {
        form.sync_inputs(fields.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        match &action {
            FormAction::AddRow(section) => {
                let id = form.add_row(*section);
                tracing::debug!(section = %section, row = %id, "Row added");
            }
            FormAction::RemoveRow(id) => {
                if !form.remove_row(id) {
                    tracing::debug!(row = %id, "Delete for unknown row ignored");
                }
            }
            FormAction::Search => {}
        }
    });

    if action == FormAction::Search {
        submit_search(&state.forms, &sid, &state.search_client).await;
    }

    (jar, Redirect::to(&format!("{}/", state.public_base_url))).into_response()
}
