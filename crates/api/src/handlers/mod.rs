pub mod auth;
pub mod edits;
pub mod events;
pub mod videos;
