// Candidate profiles: in-memory store plus the /profile handlers.

pub mod handlers;
pub mod store;

pub use store::{Profile, ProfileStore};
