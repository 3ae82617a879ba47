pub mod search_page_template;

pub use search_page_template::SearchPageTemplate;
