//! `SQLite` implementation of [`RegionRepository`].

use std::fmt::Write as _;
use std::future::Future;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use refhub_app::ports::{RegionCriteria, RegionRepository};
use refhub_domain::error::RefHubError;
use refhub_domain::id::RegionId;
use refhub_domain::page::{Direction, Page, Pageable};
use refhub_domain::region::{Region, RegionTranslation};
use refhub_domain::time::Timestamp;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Region`].
struct Wrapper(Region);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Region> {
        value.map(|w| w.0)
    }
}

fn decode_err<E>(err: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::Decode(Box::new(err))
}

fn parse_timestamp(value: &str) -> Result<Timestamp, sqlx::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(decode_err)
}

/// Fixed-width RFC 3339 so that text ordering matches chronological ordering.
fn format_timestamp(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let translations: String = row.try_get("translations")?;
        let is_active: bool = row.try_get("is_active")?;
        let created: String = row.try_get("created")?;
        let modified: String = row.try_get("modified")?;

        let translations: Vec<RegionTranslation> =
            serde_json::from_str(&translations).map_err(decode_err)?;

        Ok(Self(Region {
            id: RegionId::from_str(&id).map_err(decode_err)?,
            name,
            translations,
            is_active,
            created: parse_timestamp(&created)?,
            modified: parse_timestamp(&modified)?,
        }))
    }
}

const INSERT: &str = "INSERT INTO regions (id, name, translations, is_active, created, modified, search_name, search_translations) VALUES (?, ?, ?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM regions WHERE id = ?";
const UPDATE: &str = "UPDATE regions SET name = ?, translations = ?, is_active = ?, created = ?, modified = ?, search_name = ?, search_translations = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM regions WHERE id = ?";

/// `?1` is the lowercase `LIKE` pattern (NULL matches everything),
/// `?2` restricts translations to one language (NULL means any).
///
/// Matching runs against the `search_*` columns, which hold names already
/// lowercased in Rust. `SQLite`'s own `lower()` only folds ASCII.
const MATCHES: &str = "(?1 IS NULL \
    OR search_name LIKE ?1 ESCAPE '\\' \
    OR EXISTS (SELECT 1 FROM json_each(regions.search_translations) AS t \
        WHERE (?2 IS NULL OR json_extract(t.value, '$.iso3_language') = ?2) \
        AND json_extract(t.value, '$.name') LIKE ?1 ESCAPE '\\'))";

/// Serialized columns shared by insert and update.
struct Columns {
    translations: String,
    search_name: String,
    search_translations: String,
}

impl Columns {
    fn of(region: &Region) -> Result<Self, StorageError> {
        let folded: Vec<RegionTranslation> = region
            .translations
            .iter()
            .map(|t| RegionTranslation {
                name: t.name.to_lowercase(),
                ..t.clone()
            })
            .collect();

        Ok(Self {
            translations: serde_json::to_string(&region.translations)?,
            search_name: region.name.to_lowercase(),
            search_translations: serde_json::to_string(&folded)?,
        })
    }
}

/// Build a `%filter%` pattern with `LIKE` wildcards escaped.
fn like_pattern(filter: &str) -> String {
    let mut pattern = String::with_capacity(filter.len() + 2);
    pattern.push('%');
    for c in filter.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn sort_column(property: &str) -> Option<&'static str> {
    match property {
        "name" => Some("name"),
        "created" => Some("created"),
        "modified" => Some("modified"),
        "isActive" => Some("is_active"),
        _ => None,
    }
}

fn order_by(pageable: &Pageable) -> String {
    let mut clause = String::from(" ORDER BY ");
    let mut any = false;
    for order in pageable.sort() {
        let Some(column) = sort_column(&order.property) else {
            continue;
        };
        let direction = match order.direction {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        };
        let _ = write!(clause, "{column} {direction}, ");
        any = true;
    }
    if !any {
        clause.push_str("name ASC, ");
    }
    clause.push_str("id ASC");
    clause
}

/// `SQLite`-backed region repository.
pub struct SqliteRegionRepository {
    pool: SqlitePool,
}

impl SqliteRegionRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl RegionRepository for SqliteRegionRepository {
    fn create(&self, region: Region) -> impl Future<Output = Result<Region, RefHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let columns = Columns::of(&region)?;
            sqlx::query(INSERT)
                .bind(region.id.to_string())
                .bind(&region.name)
                .bind(columns.translations)
                .bind(region.is_active)
                .bind(format_timestamp(region.created))
                .bind(format_timestamp(region.modified))
                .bind(columns.search_name)
                .bind(columns.search_translations)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(region)
        }
    }

    fn get_by_id(
        &self,
        id: RegionId,
    ) -> impl Future<Output = Result<Option<Region>, RefHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn update(&self, region: Region) -> impl Future<Output = Result<Region, RefHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let columns = Columns::of(&region)?;
            sqlx::query(UPDATE)
                .bind(&region.name)
                .bind(columns.translations)
                .bind(region.is_active)
                .bind(format_timestamp(region.created))
                .bind(format_timestamp(region.modified))
                .bind(columns.search_name)
                .bind(columns.search_translations)
                .bind(region.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(region)
        }
    }

    fn delete(&self, id: RegionId) -> impl Future<Output = Result<(), RefHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }

    fn find_matching(
        &self,
        criteria: RegionCriteria,
        pageable: Pageable,
    ) -> impl Future<Output = Result<Page<Region>, RefHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let pattern = criteria.filter.as_deref().map(like_pattern);
            let language = criteria.iso3_language.map(String::from);

            let sql = format!(
                "SELECT * FROM regions WHERE {MATCHES}{} LIMIT ?3 OFFSET ?4",
                order_by(&pageable)
            );
            let limit = i64::from(pageable.size());
            let offset = i64::try_from(pageable.offset()).unwrap_or(i64::MAX);

            let rows: Vec<Wrapper> = sqlx::query_as(&sql)
                .bind(pattern.as_deref())
                .bind(language.as_deref())
                .bind(limit)
                .bind(offset)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            let total = count(&pool, pattern.as_deref(), language.as_deref()).await?;

            Ok(Page::new(
                rows.into_iter().map(|w| w.0).collect(),
                &pageable,
                total,
            ))
        }
    }

    fn count_matching(
        &self,
        criteria: RegionCriteria,
    ) -> impl Future<Output = Result<u64, RefHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let pattern = criteria.filter.as_deref().map(like_pattern);
            let language = criteria.iso3_language.map(String::from);
            count(&pool, pattern.as_deref(), language.as_deref()).await
        }
    }
}

async fn count(
    pool: &SqlitePool,
    pattern: Option<&str>,
    language: Option<&str>,
) -> Result<u64, RefHubError> {
    let sql = format!("SELECT COUNT(*) FROM regions WHERE {MATCHES}");
    let (total,): (i64,) = sqlx::query_as(&sql)
        .bind(pattern)
        .bind(language)
        .fetch_one(pool)
        .await
        .map_err(StorageError::from)?;

    Ok(u64::try_from(total).unwrap_or_default())
}
