//! Catalog introspection and schema statements.
//!
//! These operations run against a connection the caller already holds.
//! Any sqlx executor for SQLite works: `&SqlitePool`, `&mut SqliteConnection`
//! or `&mut *transaction`. The executor is consumed by the call and never
//! stored.
//!
//! Existence checks swallow query failures and report "not found", so a
//! caller cannot tell a missing object from a failed lookup. Statement
//! execution failures are returned.

use sqlx::{Executor, Row, Sqlite};
use tracing::{debug, warn};

use crate::dialect::SqliteDialect;
use crate::error::Result;
use crate::options::CatalogMatching;

const HAS_TABLE_SQL: &str = "SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name = ?";

const HAS_INDEX_PATTERN_SQL: &str =
    "SELECT count(*) FROM sqlite_master WHERE tbl_name = ? AND sql LIKE '%INDEX ' || ? || ' ON%'";

const HAS_INDEX_STRUCTURED_SQL: &str =
    "SELECT count(*) FROM sqlite_master WHERE type = 'index' AND tbl_name = ? AND name = ?";

const HAS_COLUMN_PATTERN_SQL: &str = "SELECT count(*) FROM sqlite_master WHERE tbl_name = ? \
     AND (sql LIKE '%\"' || ? || '\" %' OR sql LIKE '%' || ? || ' %')";

const HAS_COLUMN_STRUCTURED_SQL: &str =
    "SELECT count(*) FROM pragma_table_info(?) WHERE name = ?";

const DATABASE_LIST_SQL: &str = "PRAGMA database_list";

/// Maps a count query outcome to an existence answer.
fn found(check: &str, result: std::result::Result<i64, sqlx::Error>) -> bool {
    match result {
        Ok(count) => count > 0,
        Err(err) => {
            warn!(check, error = %err, "Introspection query failed, reporting not found");
            false
        }
    }
}

impl SqliteDialect {
    /// Returns whether a table with this exact name exists.
    pub async fn has_table<'c, E>(&self, executor: E, table: &str) -> bool
    where
        E: Executor<'c, Database = Sqlite>,
    {
        debug!(table, "Checking table existence");
        let result = sqlx::query_scalar::<_, i64>(HAS_TABLE_SQL)
            .bind(table)
            .fetch_one(executor)
            .await;
        found("has_table", result)
    }

    /// Returns whether an index exists on the table.
    ///
    /// With [`CatalogMatching::Pattern`] this looks for `INDEX <index> ON`
    /// in the table's stored CREATE statements, so an index created with a
    /// quoted name is not found.
    pub async fn has_index<'c, E>(&self, executor: E, table: &str, index: &str) -> bool
    where
        E: Executor<'c, Database = Sqlite>,
    {
        let sql = match self.options().catalog_matching {
            CatalogMatching::Pattern => HAS_INDEX_PATTERN_SQL,
            CatalogMatching::Structured => HAS_INDEX_STRUCTURED_SQL,
        };
        debug!(table, index, "Checking index existence");
        let result = sqlx::query_scalar::<_, i64>(sql)
            .bind(table)
            .bind(index)
            .fetch_one(executor)
            .await;
        found("has_index", result)
    }

    /// Returns whether a column exists on the table.
    ///
    /// With [`CatalogMatching::Pattern`] this looks for `"<column>" ` or
    /// `<column> ` anywhere in the stored CREATE statements, which also
    /// matches the table name itself and keywords followed by a space.
    pub async fn has_column<'c, E>(&self, executor: E, table: &str, column: &str) -> bool
    where
        E: Executor<'c, Database = Sqlite>,
    {
        debug!(table, column, "Checking column existence");
        let result = match self.options().catalog_matching {
            CatalogMatching::Pattern => {
                sqlx::query_scalar::<_, i64>(HAS_COLUMN_PATTERN_SQL)
                    .bind(table)
                    .bind(column)
                    .bind(column)
                    .fetch_one(executor)
                    .await
            }
            CatalogMatching::Structured => {
                sqlx::query_scalar::<_, i64>(HAS_COLUMN_STRUCTURED_SQL)
                    .bind(table)
                    .bind(column)
                    .fetch_one(executor)
                    .await
            }
        };
        found("has_column", result)
    }

    /// Returns the name of the first attached database, usually `main`.
    ///
    /// Returns an empty string if the lookup fails.
    pub async fn current_database<'c, E>(&self, executor: E) -> String
    where
        E: Executor<'c, Database = Sqlite>,
    {
        debug!("Reading database list");
        let name = match sqlx::query(DATABASE_LIST_SQL).fetch_one(executor).await {
            Ok(row) => row.try_get::<Option<String>, _>(1),
            Err(err) => Err(err),
        };
        match name {
            Ok(name) => name.unwrap_or_default(),
            Err(err) => {
                warn!(error = %err, "Database list lookup failed");
                String::new()
            }
        }
    }

    /// Drops an index.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::Database`](crate::error::DialectError::Database)
    /// if the statement fails, e.g. when the index does not exist.
    pub async fn remove_index<'c, E>(&self, executor: E, table: &str, index: &str) -> Result<()>
    where
        E: Executor<'c, Database = Sqlite>,
    {
        let sql = self.remove_index_sql(index);
        debug!(table, sql = %sql, "Executing SQL");
        sqlx::query(&sql).execute(executor).await?;
        Ok(())
    }

    /// Changes a column's type with `ALTER TABLE ... ALTER COLUMN ... TYPE`.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::Database`](crate::error::DialectError::Database)
    /// if the statement fails. SQLite has no ALTER COLUMN, so it always
    /// does on a real SQLite connection.
    pub async fn modify_column<'c, E>(
        &self,
        executor: E,
        table: &str,
        column: &str,
        sql_type: &str,
    ) -> Result<()>
    where
        E: Executor<'c, Database = Sqlite>,
    {
        let sql = self.modify_column_sql(table, column, sql_type);
        debug!(sql = %sql, "Executing SQL");
        sqlx::query(&sql).execute(executor).await?;
        Ok(())
    }
}
