//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row plus the DTOs used to create it.

pub mod content_section;
pub mod operator;
pub mod session;
