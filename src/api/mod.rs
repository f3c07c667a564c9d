mod docs;
mod error;
pub mod models;
mod server;
pub mod services;
pub mod state;
pub(crate) mod utils;

pub use docs::openapi_document;
pub use error::ApiError;
pub use server::{build_router, run};
