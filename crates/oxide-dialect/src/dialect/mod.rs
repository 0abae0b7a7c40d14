//! Database dialect implementations.
//!
//! A dialect translates the ORM's abstract schema and query requests into
//! one engine's SQL text. The ORM holds a `&dyn Dialect` (or a concrete
//! dialect) handed to it by the caller and treats every engine the same way.

mod sqlite;

use std::sync::LazyLock;

use regex::Regex;

pub use sqlite::SqliteDialect;

use crate::bound::RowBound;
use crate::error::Result;
use crate::field::FieldDescriptor;

static KEY_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^a-zA-Z0-9]+").expect("Invalid key name regex"));

/// Trait for database-specific SQL translation.
pub trait Dialect: Send + Sync {
    /// Returns the dialect name.
    fn name(&self) -> &'static str;

    /// Returns the bind placeholder for the parameter at `index`.
    fn bind_var(&self, index: usize) -> &'static str;

    /// Quotes an identifier (table name, column name, etc.).
    ///
    /// Embedded quote characters are not escaped.
    fn quote(&self, key: &str) -> String {
        format!("\"{key}\"")
    }

    /// Returns the SQL column type for a field, or an error if the field's
    /// kind has no mapping.
    ///
    /// May record the auto-increment marker on `field`.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::UnsupportedType`](crate::error::DialectError::UnsupportedType)
    /// for kinds the dialect cannot store.
    fn try_data_type_of(&self, field: &mut FieldDescriptor) -> Result<String>;

    /// Returns the SQL column type for a field.
    ///
    /// # Panics
    ///
    /// Panics if the field's kind has no mapping. That is a schema
    /// definition error with no SQL to emit; use
    /// [`try_data_type_of`](Self::try_data_type_of) to validate first.
    fn data_type_of(&self, field: &mut FieldDescriptor) -> String {
        match self.try_data_type_of(field) {
            Ok(sql_type) => sql_type,
            Err(err) => panic!("{err}"),
        }
    }

    /// Returns whether a foreign key exists on the table.
    fn has_foreign_key(&self, _table: &str, _foreign_key: &str) -> bool {
        false
    }

    /// Builds the LIMIT/OFFSET suffix of a SELECT.
    ///
    /// Negative values are dropped; absent values contribute nothing.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::InvalidBound`](crate::error::DialectError::InvalidBound)
    /// if either value is not an integer.
    fn limit_and_offset_sql(
        &self,
        limit: Option<RowBound>,
        offset: Option<RowBound>,
    ) -> Result<String> {
        let mut sql = String::new();
        if let Some(limit) = limit {
            let limit = limit.resolve()?;
            if limit >= 0 {
                sql.push_str(&format!(" LIMIT {limit}"));
            }
        }
        if let Some(offset) = offset {
            let offset = offset.resolve()?;
            if offset >= 0 {
                sql.push_str(&format!(" OFFSET {offset}"));
            }
        }
        Ok(sql)
    }

    /// Returns the FROM clause needed to SELECT without a table.
    fn select_from_dummy_table(&self) -> &'static str {
        ""
    }

    /// Returns text inserted between INSERT columns and VALUES to output
    /// the new primary key.
    fn last_insert_id_output_interstitial(
        &self,
        _table: &str,
        _column: &str,
        _columns: &[String],
    ) -> String {
        String::new()
    }

    /// Returns the suffix appended to an INSERT to return the new primary key.
    fn last_insert_id_returning_suffix(&self, _table: &str, _column: &str) -> String {
        String::new()
    }

    /// Returns the syntax for inserting a row made only of defaults.
    fn default_value_str(&self) -> &'static str {
        "DEFAULT VALUES"
    }

    /// Builds a constraint or index name from its kind, table and fields.
    ///
    /// Every run of non-alphanumeric characters collapses to one `_`.
    fn build_key_name(&self, kind: &str, table: &str, fields: &[&str]) -> String {
        let key_name = format!("{kind}_{table}_{}", fields.join("_"));
        KEY_NAME_REGEX.replace_all(&key_name, "_").into_owned()
    }

    /// Returns the index and column names in the form the engine stores.
    fn normalize_index_and_column(&self, index: &str, column: &str) -> (String, String) {
        (index.to_string(), column.to_string())
    }
}
