//! SQLite dialect.
//!
//! SQLite uses type affinity rather than strict column types, so the
//! declared types below mostly document intent. The one that matters is
//! `integer primary key autoincrement`, which makes the column an alias
//! for the rowid.

use tracing::debug;

use crate::error::{DialectError, Result};
use crate::field::{FieldDescriptor, FieldKind};
use crate::options::DialectOptions;

use super::Dialect;

const AUTO_INCREMENT_TYPE: &str = "integer primary key autoincrement";

/// SQLite dialect.
#[derive(Debug, Clone, Default)]
pub struct SqliteDialect {
    options: DialectOptions,
}

impl SqliteDialect {
    /// Creates a new SQLite dialect with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a SQLite dialect with the given options.
    #[must_use]
    pub const fn with_options(options: DialectOptions) -> Self {
        Self { options }
    }

    /// Returns the dialect options.
    #[must_use]
    pub const fn options(&self) -> &DialectOptions {
        &self.options
    }

    /// Generates SQL for dropping an index. The name is used as given.
    #[must_use]
    pub fn remove_index_sql(&self, index: &str) -> String {
        format!("DROP INDEX {index}")
    }

    /// Generates SQL for changing a column's type.
    ///
    /// SQLite's ALTER TABLE has no ALTER COLUMN form, so the engine rejects
    /// this statement.
    #[must_use]
    pub fn modify_column_sql(&self, table: &str, column: &str, sql_type: &str) -> String {
        format!("ALTER TABLE {table} ALTER COLUMN {column} TYPE {sql_type}")
    }

    fn auto_increment_or(&self, field: &mut FieldDescriptor, fallback: &str) -> String {
        if field.can_auto_increment() {
            field.mark_auto_increment();
            debug!(field = %field.name, "Marked field as auto-increment");
            AUTO_INCREMENT_TYPE.to_string()
        } else {
            fallback.to_string()
        }
    }

    fn infer_type(&self, field: &mut FieldDescriptor) -> Result<String> {
        let sql_type = match field.kind {
            FieldKind::Bool => "bool".to_string(),
            FieldKind::Int => self.auto_increment_or(field, "integer"),
            FieldKind::BigInt => self.auto_increment_or(field, "bigint"),
            FieldKind::Float => "real".to_string(),
            FieldKind::String { size } => {
                if size > 0 && size < self.options.string_size_limit {
                    format!("varchar({size})")
                } else {
                    "text".to_string()
                }
            }
            FieldKind::Time => "datetime".to_string(),
            FieldKind::Bytes => "blob".to_string(),
            FieldKind::Unsupported(ref type_name) => {
                return Err(DialectError::UnsupportedType {
                    field: field.name.clone(),
                    type_name: type_name.clone(),
                });
            }
        };
        Ok(sql_type)
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn bind_var(&self, _index: usize) -> &'static str {
        self.options.placeholder.as_str()
    }

    fn try_data_type_of(&self, field: &mut FieldDescriptor) -> Result<String> {
        let sql_type = match field.sql_type {
            Some(ref explicit) if !explicit.is_empty() => explicit.clone(),
            _ => self.infer_type(field)?,
        };

        let additional = field.additional_type();
        if additional.is_empty() {
            Ok(sql_type)
        } else {
            Ok(format!("{sql_type} {additional}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::bound::RowBound;
    use crate::field::{AUTO_INCREMENT, DEFAULT_STRING_SIZE};
    use crate::options::Placeholder;

    fn dialect() -> SqliteDialect {
        SqliteDialect::new()
    }

    fn type_of(mut field: FieldDescriptor) -> String {
        dialect().data_type_of(&mut field)
    }

    #[test]
    fn test_name_and_quote() {
        let d = dialect();
        assert_eq!(d.name(), "sqlite");
        assert_eq!(d.quote("users"), "\"users\"");
        assert_eq!(d.quote("odd\"name"), "\"odd\"name\"");
    }

    #[test]
    fn test_bind_var_is_constant() {
        let d = dialect();
        assert_eq!(d.bind_var(1), "$$$");
        assert_eq!(d.bind_var(7), "$$$");

        let d = SqliteDialect::with_options(
            DialectOptions::new().placeholder(Placeholder::QuestionMark),
        );
        assert_eq!(d.bind_var(1), "?");
        assert_eq!(d.bind_var(2), "?");
    }

    #[test]
    fn test_type_mapping() {
        assert_eq!(type_of(FieldDescriptor::of::<bool>("active")), "bool");
        assert_eq!(type_of(FieldDescriptor::of::<i32>("age")), "integer");
        assert_eq!(type_of(FieldDescriptor::of::<u8>("flags")), "integer");
        assert_eq!(type_of(FieldDescriptor::of::<i64>("views")), "bigint");
        assert_eq!(type_of(FieldDescriptor::of::<f64>("score")), "real");
        assert_eq!(
            type_of(FieldDescriptor::of::<String>("name")),
            format!("varchar({DEFAULT_STRING_SIZE})")
        );
        assert_eq!(
            type_of(FieldDescriptor::of::<NaiveDateTime>("created_at")),
            "datetime"
        );
        assert_eq!(type_of(FieldDescriptor::of::<Vec<u8>>("avatar")), "blob");
        assert_eq!(
            type_of(FieldDescriptor::of::<Option<i32>>("parent_id")),
            "integer"
        );
    }

    #[test]
    fn test_string_sizes() {
        let string = |size| type_of(FieldDescriptor::new("s", FieldKind::string(size)));
        assert_eq!(string(200), "varchar(200)");
        assert_eq!(string(1), "varchar(1)");
        assert_eq!(string(65531), "varchar(65531)");
        assert_eq!(string(0), "text");
        assert_eq!(string(65532), "text");
        assert_eq!(string(100_000), "text");
    }

    #[test]
    fn test_string_size_limit_option() {
        let d = SqliteDialect::with_options(DialectOptions::new().string_size_limit(256));
        let mut field = FieldDescriptor::of::<String>("bio").size(255);
        assert_eq!(d.data_type_of(&mut field), "varchar(255)");
        let mut field = FieldDescriptor::of::<String>("bio").size(256);
        assert_eq!(d.data_type_of(&mut field), "text");
    }

    #[test]
    fn test_primary_key_auto_increment() {
        let mut field = FieldDescriptor::of::<i32>("id").primary_key();
        assert_eq!(
            dialect().data_type_of(&mut field),
            "integer primary key autoincrement"
        );
        assert!(field.is_auto_increment());

        let mut field = FieldDescriptor::of::<u64>("id").primary_key();
        assert_eq!(
            dialect().data_type_of(&mut field),
            "integer primary key autoincrement"
        );
        assert_eq!(field.tag_setting(AUTO_INCREMENT), Some(AUTO_INCREMENT));
    }

    #[test]
    fn test_auto_increment_opt_out() {
        let mut field = FieldDescriptor::of::<i64>("id")
            .primary_key()
            .auto_increment(false);
        assert_eq!(dialect().data_type_of(&mut field), "bigint");
        assert!(!field.is_auto_increment());
        assert_eq!(field.tag_setting(AUTO_INCREMENT), Some("false"));
    }

    #[test]
    fn test_auto_increment_without_primary_key() {
        let mut field = FieldDescriptor::of::<i32>("seq").auto_increment(true);
        assert_eq!(
            dialect().data_type_of(&mut field),
            "integer primary key autoincrement"
        );
    }

    #[test]
    fn test_auto_increment_idempotent() {
        let d = dialect();
        let mut field = FieldDescriptor::of::<i64>("id").primary_key();
        let first = d.data_type_of(&mut field);
        let snapshot = field.clone();
        let second = d.data_type_of(&mut field);
        assert_eq!(first, second);
        assert_eq!(field, snapshot);
    }

    #[test]
    fn test_non_integer_kinds_leave_tags_alone() {
        let mut field = FieldDescriptor::of::<String>("id").primary_key();
        assert_eq!(dialect().data_type_of(&mut field), "varchar(255)");
        assert!(field.tag_settings().is_empty());
    }

    #[test]
    fn test_explicit_type_override() {
        let mut field = FieldDescriptor::of::<i64>("id")
            .primary_key()
            .sql_type("INTEGER PRIMARY KEY");
        assert_eq!(dialect().data_type_of(&mut field), "INTEGER PRIMARY KEY");
        assert!(!field.is_auto_increment());

        let mut field = FieldDescriptor::new("payload", FieldKind::Unsupported("Json".into()))
            .sql_type("json");
        assert_eq!(dialect().data_type_of(&mut field), "json");

        let mut field = FieldDescriptor::of::<bool>("flag").sql_type("");
        assert_eq!(dialect().data_type_of(&mut field), "bool");
    }

    #[test]
    fn test_additional_type_appended() {
        let field = FieldDescriptor::of::<String>("email")
            .size(120)
            .not_null()
            .unique();
        assert_eq!(type_of(field), "varchar(120) NOT NULL UNIQUE");

        let field = FieldDescriptor::of::<bool>("active").default_value("1");
        assert_eq!(type_of(field), "bool DEFAULT 1");

        let field = FieldDescriptor::of::<i32>("n")
            .sql_type("smallint")
            .modifier("CHECK (n > 0)");
        assert_eq!(type_of(field), "smallint CHECK (n > 0)");
    }

    #[test]
    fn test_deterministic() {
        let make = || {
            FieldDescriptor::of::<String>("title")
                .size(64)
                .not_null()
        };
        assert_eq!(type_of(make()), type_of(make()));
    }

    #[test]
    fn test_unsupported_type_error() {
        let mut field = FieldDescriptor::new("location", FieldKind::Unsupported("Point".into()));
        let err = dialect().try_data_type_of(&mut field).unwrap_err();
        assert!(matches!(
            err,
            DialectError::UnsupportedType { ref field, ref type_name }
                if field == "location" && type_name == "Point"
        ));
    }

    #[test]
    #[should_panic(expected = "invalid sql type Point")]
    fn test_unsupported_type_panics() {
        let field = FieldDescriptor::new("location", FieldKind::Unsupported("Point".into()));
        type_of(field);
    }

    #[test]
    fn test_limit_and_offset() {
        let d = dialect();
        let sql = |limit: Option<RowBound>, offset: Option<RowBound>| {
            d.limit_and_offset_sql(limit, offset).unwrap()
        };

        assert_eq!(sql(Some(10_i64.into()), Some(0_i64.into())), " LIMIT 10 OFFSET 0");
        assert_eq!(sql(None, Some(5_i64.into())), " OFFSET 5");
        assert_eq!(sql(Some(10_i64.into()), None), " LIMIT 10");
        assert_eq!(sql(None, None), "");
        assert_eq!(sql(Some((-1_i64).into()), None), "");
        assert_eq!(sql(Some((-1_i64).into()), Some(3_i64.into())), " OFFSET 3");
        assert_eq!(sql(Some("20".into()), Some("-5".into())), " LIMIT 20");
        assert_eq!(sql(Some("0x10".into()), None), " LIMIT 16");
    }

    #[test]
    fn test_limit_and_offset_parse_error() {
        let d = dialect();
        let err = d
            .limit_and_offset_sql(Some("abc".into()), None)
            .unwrap_err();
        assert!(matches!(err, DialectError::InvalidBound { ref value } if value == "abc"));

        let err = d
            .limit_and_offset_sql(Some(10_i64.into()), Some("ten".into()))
            .unwrap_err();
        assert!(matches!(err, DialectError::InvalidBound { ref value } if value == "ten"));
    }

    #[test]
    fn test_build_key_name() {
        let d = dialect();
        assert_eq!(
            d.build_key_name("idx", "user accounts", &["first name", "email"]),
            "idx_user_accounts_first_name_email"
        );
        assert_eq!(
            d.build_key_name("uix", "users", &["email"]),
            "uix_users_email"
        );
        assert_eq!(
            d.build_key_name("fk", "orders--2024", &["user.id"]),
            "fk_orders_2024_user_id"
        );
        assert_eq!(d.build_key_name("idx", "users", &[]), "idx_users_");
    }

    #[test]
    fn test_fixed_fragments() {
        let d = dialect();
        assert_eq!(d.default_value_str(), "DEFAULT VALUES");
        assert_eq!(d.select_from_dummy_table(), "");
        assert_eq!(
            d.last_insert_id_output_interstitial("users", "id", &["name".to_string()]),
            ""
        );
        assert_eq!(d.last_insert_id_returning_suffix("users", "id"), "");
        assert!(!d.has_foreign_key("orders", "fk_orders_users"));
        assert_eq!(
            d.normalize_index_and_column("idx_users_email", "email"),
            ("idx_users_email".to_string(), "email".to_string())
        );
    }

    #[test]
    fn test_ddl_sql() {
        let d = dialect();
        assert_eq!(d.remove_index_sql("idx_users_email"), "DROP INDEX idx_users_email");
        assert_eq!(
            d.modify_column_sql("users", "age", "bigint"),
            "ALTER TABLE users ALTER COLUMN age TYPE bigint"
        );
    }

    #[test]
    fn test_as_trait_object() {
        let d: Box<dyn Dialect> = Box::new(dialect());
        let mut field = FieldDescriptor::of::<f32>("ratio");
        assert_eq!(d.name(), "sqlite");
        assert_eq!(d.data_type_of(&mut field), "real");
    }
}
