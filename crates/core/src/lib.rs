//! Domain model for the landing page and its back office.
//!
//! Everything in this crate is pure data and decision logic: which sections
//! exist, how stored payloads decode into typed settings with per-field
//! defaults, which sections render and in which order, and the hero reveal
//! countdown. Persistence lives in `lander-db`, HTTP in `lander-api`.

pub mod composer;
pub mod error;
pub mod hero;
pub mod integrations;
pub mod reveal;
pub mod section;
pub mod seo;
pub mod types;
pub mod visibility;

mod decode;
