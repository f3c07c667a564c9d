pub mod api;
pub mod config;
pub mod extractor;
pub mod formats;
pub mod observability;
pub mod terabox;
