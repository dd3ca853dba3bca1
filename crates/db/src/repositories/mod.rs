//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod edit_request_repo;
pub mod user_repo;
pub mod video_repo;

pub use edit_request_repo::EditRequestRepo;
pub use user_repo::UserRepo;
pub use video_repo::VideoRepo;
