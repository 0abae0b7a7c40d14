//! Dialect configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Exclusive upper bound on string sizes rendered as `varchar(n)`.
pub const DEFAULT_STRING_SIZE_LIMIT: usize = 65532;

/// Token returned for bind placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placeholder {
    /// The constant `$$$` token, whatever the index.
    #[default]
    Sentinel,
    /// SQLite's anonymous `?` parameter.
    QuestionMark,
}

impl Placeholder {
    /// Returns the placeholder text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sentinel => "$$$",
            Self::QuestionMark => "?",
        }
    }
}

/// How index and column existence is looked up in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogMatching {
    /// Substring match against the stored CREATE statements.
    ///
    /// Matches `INDEX <name> ON` for indexes and `"<name>" ` or `<name> `
    /// for columns, so it can report names that only appear as part of
    /// other identifiers, and misses quoted index names.
    #[default]
    Pattern,
    /// Exact-name lookups in `sqlite_master` and `pragma_table_info`.
    Structured,
}

/// Options for [`SqliteDialect`](crate::dialect::SqliteDialect).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialectOptions {
    /// Bind placeholder token.
    pub placeholder: Placeholder,
    /// Catalog lookup strategy for `has_index` and `has_column`.
    pub catalog_matching: CatalogMatching,
    /// String fields at or above this size are typed `text`.
    pub string_size_limit: usize,
}

impl Default for DialectOptions {
    fn default() -> Self {
        Self {
            placeholder: Placeholder::default(),
            catalog_matching: CatalogMatching::default(),
            string_size_limit: DEFAULT_STRING_SIZE_LIMIT,
        }
    }
}

impl DialectOptions {
    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from a JSON document. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::Config`](crate::error::DialectError::Config)
    /// if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the placeholder token.
    #[must_use]
    pub fn placeholder(mut self, placeholder: Placeholder) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Sets the catalog lookup strategy.
    #[must_use]
    pub fn catalog_matching(mut self, matching: CatalogMatching) -> Self {
        self.catalog_matching = matching;
        self
    }

    /// Sets the `varchar` size limit.
    #[must_use]
    pub fn string_size_limit(mut self, limit: usize) -> Self {
        self.string_size_limit = limit;
        self
    }
}
