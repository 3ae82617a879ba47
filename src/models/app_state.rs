use crate::api::SearchClient;
use crate::form::FormSessions;
use crate::store::{LogJournal, LogStore};

#[derive(Clone)]
pub struct AppState {
    pub store: LogStore,
    pub journal: LogJournal,
    /// Search forms keyed by the `form_session` cookie.
    pub forms: FormSessions,
    /// Client the search page submits through; normally points back at this
    /// server.
    pub search_client: SearchClient,
    pub public_base_url: String,
    pub custom_css: Option<String>,
}

impl AppState {
    /// Build state around an opened journal, loading its documents into a
    /// fresh store.
    pub async fn from_journal(
        journal: LogJournal,
        search_client: SearchClient,
        public_base_url: String,
    ) -> Result<Self, crate::store::JournalError> {
        let store = LogStore::new();
        store.extend(journal.replay().await?);
        Ok(Self {
            store,
            journal,
            forms: FormSessions::new(),
            search_client,
            public_base_url,
            custom_css: None,
        })
    }
}
