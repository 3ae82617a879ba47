use crate::api::SearchClient;

use super::session::FormSessions;

/// What happened to the result listing after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The listing was replaced with this many results.
    Rendered(usize),
    /// The request failed; the previous listing is untouched.
    Failed,
    /// The session vanished before or during the request.
    NoSession,
}

/// Serialize the session's rows, send them to the search endpoint and swap
/// in the results.
///
/// The session lock is released while the request is in flight, so
/// overlapping submissions are not serialized: whichever response resolves
/// last owns the listing.
pub async fn submit_search(sessions: &FormSessions, session_id: &str, client: &SearchClient) -> SubmitOutcome {
    let request = match sessions.with_form(session_id, |form| form.to_request()) {
        Some(r) => r,
        None => return SubmitOutcome::NoSession,
    };

    match client.search(&request).await {
        Ok(items) => {
            let count = items.len();
            match sessions.with_form(session_id, |form| form.replace_results(&items)) {
                Some(()) => {
                    tracing::info!(session = session_id, results = count, "Search results rendered");
                    SubmitOutcome::Rendered(count)
                }
                None => SubmitOutcome::NoSession,
            }
        }
        Err(e) => {
            tracing::error!(%e, session = session_id, "Search request failed");
            SubmitOutcome::Failed
        }
    }
}
