//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod content_section_repo;
pub mod operator_repo;
pub mod session_repo;

pub use content_section_repo::ContentSectionRepo;
pub use operator_repo::OperatorRepo;
pub use session_repo::SessionRepo;
