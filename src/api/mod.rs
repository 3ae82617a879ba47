pub mod client;
pub mod error;

pub use client::{set_silent, SearchClient};
pub use error::ClientError;
