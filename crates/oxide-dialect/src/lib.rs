//! SQLite dialect translation for ORMs.
//!
//! `oxide-dialect` turns an ORM's abstract schema and query requests into
//! SQLite SQL:
//! - Column types inferred from [`FieldDescriptor`](field::FieldDescriptor)s
//! - LIMIT/OFFSET clauses, identifier quoting and key name synthesis
//! - Table, index and column existence checks against `sqlite_master`
//! - Index removal and column modification statements
//!
//! The dialect owns no connection. Operations that touch the database take
//! a borrowed sqlx executor for the duration of the call, and the caller
//! constructs the dialect and passes it where it is needed; there is no
//! global registry.
//!
//! # Example
//!
//! ```rust
//! use oxide_dialect::prelude::*;
//!
//! let dialect = SqliteDialect::new();
//!
//! let mut id = FieldDescriptor::of::<i64>("id").primary_key();
//! assert_eq!(dialect.data_type_of(&mut id), "integer primary key autoincrement");
//!
//! let mut email = FieldDescriptor::of::<String>("email").size(120).not_null();
//! assert_eq!(dialect.data_type_of(&mut email), "varchar(120) NOT NULL");
//!
//! let page = dialect
//!     .limit_and_offset_sql(Some(RowBound::from(10_i64)), Some(RowBound::from("20")))
//!     .unwrap();
//! assert_eq!(page, " LIMIT 10 OFFSET 20");
//! ```
//!
//! # Introspection
//!
//! ```rust,ignore
//! use oxide_dialect::prelude::*;
//! use sqlx::sqlite::SqlitePoolOptions;
//!
//! let pool = SqlitePoolOptions::new().connect("sqlite:app.db").await?;
//! let dialect = SqliteDialect::new();
//!
//! if !dialect.has_table(&pool, "users").await {
//!     // create it
//! }
//! let index = dialect.build_key_name("idx", "users", &["email"]);
//! if dialect.has_index(&pool, "users", &index).await {
//!     dialect.remove_index(&pool, "users", &index).await?;
//! }
//! ```

pub mod bound;
pub mod dialect;
pub mod error;
pub mod field;
pub mod introspect;
pub mod options;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::bound::RowBound;
    pub use crate::dialect::{Dialect, SqliteDialect};
    pub use crate::error::{DialectError, Result};
    pub use crate::field::{FieldDescriptor, FieldKind, HasFieldKind, TagSettings};
    pub use crate::options::{CatalogMatching, DialectOptions, Placeholder};
}
