//! Landing page content rows.

use serde::Serialize;
use sqlx::FromRow;
use lander_core::types::{DbId, Timestamp};

/// A row from the `landing_page_content` table.
///
/// `section_name` is unique; callers address rows by name, never by `id`.
/// `content` is free-form JSON, decoded at the boundary by
/// `lander_core::section::SectionContent`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ContentSection {
    pub id: DbId,
    pub section_name: String,
    pub content: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
