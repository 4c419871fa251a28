//! API clients for external services
//!
//! - OMDb: movie search and lookup by IMDb id

pub mod omdb;

pub use omdb::{ApiReply, OmdbClient, OmdbError};
