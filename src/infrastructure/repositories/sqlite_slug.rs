// src/infrastructure/repositories/sqlite_slug.rs
use super::map_sqlx;
use crate::domain::errors::DomainResult;
use crate::domain::record::{QueryScope, RecordId, SlugRepository, Sluggable};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;

/// Table mapping for a record type stored in SQLite.
pub trait SqlRecord: Sluggable + for<'r> FromRow<'r, SqliteRow> + Send + Unpin {
    const TABLE: &'static str;
    /// Comma separated column list used for `SELECT`s.
    const COLUMNS: &'static str;
    const KEY_COLUMN: &'static str = "id";
    /// Only consulted when `SOFT_DELETES` is set.
    const DELETED_AT_COLUMN: &'static str = "deleted_at";
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Escape `LIKE` wildcards so `prefix` only matches literally.
fn like_prefix(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// `SELECT` over a record table that slug predicates compose into.
pub struct SqliteScope {
    builder: QueryBuilder<'static, Sqlite>,
    key_column: &'static str,
    has_where: bool,
}

impl SqliteScope {
    /// Select all columns of `R`, skipping soft-deleted rows.
    pub fn select<R: SqlRecord>() -> Self {
        let mut scope = Self {
            builder: QueryBuilder::new(format!("SELECT {} FROM {}", R::COLUMNS, R::TABLE)),
            key_column: R::KEY_COLUMN,
            has_where: false,
        };
        if R::SOFT_DELETES {
            scope.push_condition();
            scope
                .builder
                .push(format!("{} IS NULL", quote_ident(R::DELETED_AT_COLUMN)));
        }
        scope
    }

    fn push_condition(&mut self) {
        if self.has_where {
            self.builder.push(" AND ");
        } else {
            self.builder.push(" WHERE ");
            self.has_where = true;
        }
    }

    #[must_use]
    pub fn limit(mut self, limit: i64) -> Self {
        self.builder.push(" LIMIT ");
        self.builder.push_bind(limit);
        self
    }

    pub fn sql(&self) -> &str {
        self.builder.sql()
    }

    pub fn into_builder(self) -> QueryBuilder<'static, Sqlite> {
        self.builder
    }
}

impl QueryScope for SqliteScope {
    fn where_key(mut self, key: RecordId) -> Self {
        self.push_condition();
        self.builder.push(quote_ident(self.key_column));
        self.builder.push(" = ");
        self.builder.push_bind(i64::from(key));
        self
    }

    fn where_field(mut self, field: &str, value: &str) -> Self {
        self.push_condition();
        self.builder.push(quote_ident(field));
        self.builder.push(" = ");
        self.builder.push_bind(value.to_owned());
        self
    }
}

#[derive(Clone)]
pub struct SqliteSlugRepository<R> {
    pool: Arc<SqlitePool>,
    _record: PhantomData<fn() -> R>,
}

impl<R> SqliteSlugRepository<R> {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            pool,
            _record: PhantomData,
        }
    }
}

#[async_trait]
impl<R: SqlRecord> SlugRepository<R> for SqliteSlugRepository<R> {
    async fn existing_slugs(
        &self,
        field: &str,
        prefix: &str,
        include_trashed: bool,
    ) -> DomainResult<BTreeMap<RecordId, String>> {
        let column = quote_ident(field);
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {}, {column} FROM {} WHERE {column} LIKE ",
            quote_ident(R::KEY_COLUMN),
            R::TABLE,
        ));
        builder.push_bind(like_prefix(prefix));
        builder.push(" ESCAPE '\\'");
        if R::SOFT_DELETES && !include_trashed {
            builder.push(format!(" AND {} IS NULL", quote_ident(R::DELETED_AT_COLUMN)));
        }

        let rows = builder
            .build_query_as::<(i64, String)>()
            .fetch_all(&*self.pool)
            .await
            .map_err(map_sqlx)?;

        // LIKE ignores ASCII case in SQLite; the prefix match is case sensitive.
        // Stored keys are taken as-is; SQLite accepts zero and negative rowids.
        Ok(rows
            .into_iter()
            .filter(|(_, slug)| slug.starts_with(prefix))
            .map(|(id, slug)| (RecordId(id), slug))
            .collect())
    }

    async fn find_by_key(&self, key: RecordId) -> DomainResult<Option<R>> {
        let mut builder = SqliteScope::select::<R>().where_key(key).into_builder();
        builder
            .build_query_as::<R>()
            .fetch_optional(&*self.pool)
            .await
            .map_err(map_sqlx)
    }

    async fn find_by_field(&self, field: &str, value: &str) -> DomainResult<Vec<R>> {
        let mut builder = SqliteScope::select::<R>()
            .where_field(field, value)
            .into_builder();
        builder
            .build_query_as::<R>()
            .fetch_all(&*self.pool)
            .await
            .map_err(map_sqlx)
    }

    async fn first_by_field(&self, field: &str, value: &str) -> DomainResult<Option<R>> {
        let mut builder = SqliteScope::select::<R>()
            .where_field(field, value)
            .limit(1)
            .into_builder();
        builder
            .build_query_as::<R>()
            .fetch_optional(&*self.pool)
            .await
            .map_err(map_sqlx)
    }
}
