// Parsing utilities
pub mod parse_int;
pub mod url_encoding;

// JSON utilities
pub mod json_converter;

pub mod random_id;

pub use parse_int::parse_leading_int;
pub use url_encoding::parse_form_pairs;
pub use json_converter::{union_keys, value_to_cell};
pub use random_id::{random_row_id, random_session_id};
