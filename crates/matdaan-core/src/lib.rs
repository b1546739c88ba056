//! Framework-adjacent code shared by Matdaan services: health handlers,
//! request-id middleware, serde helpers, and tracing setup.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
