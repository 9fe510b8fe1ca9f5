//! Repository for the `landing_page_content` table.

use sqlx::PgPool;

use crate::models::content_section::ContentSection;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, section_name, content, created_at, updated_at";

/// Provides keyed access to landing page content rows.
pub struct ContentSectionRepo;

impl ContentSectionRepo {
    /// Find a section row by its unique name.
    pub async fn find_by_name(
        pool: &PgPool,
        section_name: &str,
    ) -> Result<Option<ContentSection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM landing_page_content WHERE section_name = $1");
        sqlx::query_as::<_, ContentSection>(&query)
            .bind(section_name)
            .fetch_optional(pool)
            .await
    }

    /// List every row ordered by `section_name`, byte-wise.
    pub async fn list(pool: &PgPool) -> Result<Vec<ContentSection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM landing_page_content ORDER BY section_name COLLATE \"C\" ASC"
        );
        sqlx::query_as::<_, ContentSection>(&query)
            .fetch_all(pool)
            .await
    }

    /// Insert the row for `section_name`, or replace its content in place.
    ///
    /// A single statement, so concurrent saves for the same name never
    /// produce a second row.
    pub async fn upsert(
        pool: &PgPool,
        section_name: &str,
        content: &serde_json::Value,
    ) -> Result<ContentSection, sqlx::Error> {
        let query = format!(
            "INSERT INTO landing_page_content (section_name, content)
             VALUES ($1, $2)
             ON CONFLICT (section_name) DO UPDATE SET
                content = EXCLUDED.content,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentSection>(&query)
            .bind(section_name)
            .bind(content)
            .fetch_one(pool)
            .await
    }
}
