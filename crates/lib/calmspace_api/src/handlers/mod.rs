//! Request handlers.

pub mod chat;
pub mod datasets;
pub mod health;
pub mod index;
pub mod resources;
pub mod sessions;
