pub mod app_state;
pub mod search_request;

pub use app_state::AppState;
pub use search_request::SearchRequest;
