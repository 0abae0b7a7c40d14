//! Field descriptors.
//!
//! A [`FieldDescriptor`] is the abstract description of one schema column
//! that the dialect maps to a SQLite column type. The ORM owns it; the
//! dialect reads it and may record the auto-increment marker on it.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Size given to string fields that do not declare one.
pub const DEFAULT_STRING_SIZE: usize = 255;

/// Tag setting that marks (or opts out of) auto-increment.
pub const AUTO_INCREMENT: &str = "AUTO_INCREMENT";

/// Semantic kind of a field's value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Boolean.
    Bool,
    /// Integers up to 32 bits, plus the pointer-sized integers.
    Int,
    /// 64-bit integers.
    BigInt,
    /// Single or double precision floating point.
    Float,
    /// Character data. A size of 0 means no size was declared.
    String {
        /// Declared maximum length.
        size: usize,
    },
    /// Date/time value.
    Time,
    /// Byte sequence.
    Bytes,
    /// A type with no column mapping, carrying its type name.
    Unsupported(String),
}

impl FieldKind {
    /// Shorthand for a string kind of the given size.
    #[must_use]
    pub const fn string(size: usize) -> Self {
        Self::String { size }
    }

    /// Returns the name used when reporting this kind in errors.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::BigInt => "int64",
            Self::Float => "float",
            Self::String { .. } => "string",
            Self::Time => "time",
            Self::Bytes => "bytes",
            Self::Unsupported(name) => name,
        }
    }
}

/// Free-form tag settings attached to a field.
///
/// Keys are case-insensitive and stored upper-case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSettings(BTreeMap<String, String>);

impl TagSettings {
    /// Creates an empty set of tag settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(&key.to_uppercase()).map(String::as_str)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_uppercase(), value.into());
    }

    /// Removes the setting stored under `key`.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(&key.to_uppercase())
    }

    /// Returns whether a setting is stored under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(&key.to_uppercase())
    }

    /// Iterates over all settings in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of settings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether there are no settings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Abstract description of one schema column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field (column) name.
    pub name: String,
    /// Semantic kind of the value.
    pub kind: FieldKind,
    /// Whether this field is the primary key.
    pub primary_key: bool,
    /// Explicit SQL type; when set, inference is skipped.
    pub sql_type: Option<String>,
    /// Raw type modifier text appended after the type.
    pub modifier: Option<String>,
    tag_settings: TagSettings,
}

impl FieldDescriptor {
    /// Creates a descriptor of the given kind.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            primary_key: false,
            sql_type: None,
            modifier: None,
            tag_settings: TagSettings::new(),
        }
    }

    /// Creates a descriptor whose kind is derived from the Rust type `T`.
    #[must_use]
    pub fn of<T: HasFieldKind + ?Sized>(name: impl Into<String>) -> Self {
        Self::new(name, T::field_kind())
    }

    /// Marks the field as the primary key.
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Sets an explicit SQL type, bypassing inference.
    #[must_use]
    pub fn sql_type(mut self, sql_type: impl Into<String>) -> Self {
        self.sql_type = Some(sql_type.into());
        self
    }

    /// Sets the declared size. Only string fields use it.
    #[must_use]
    pub fn size(mut self, size: usize) -> Self {
        if let FieldKind::String { size: ref mut current } = self.kind {
            *current = size;
        }
        self
    }

    /// Opts the field into or out of auto-increment.
    #[must_use]
    pub fn auto_increment(mut self, enabled: bool) -> Self {
        self.tag_settings
            .set(AUTO_INCREMENT, if enabled { "true" } else { "false" });
        self
    }

    /// Adds a NOT NULL constraint to the type text.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.tag_settings.set("NOT NULL", "NOT NULL");
        self
    }

    /// Adds a UNIQUE constraint to the type text.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.tag_settings.set("UNIQUE", "UNIQUE");
        self
    }

    /// Adds a DEFAULT clause to the type text.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.tag_settings.set("DEFAULT", value);
        self
    }

    /// Adds a COMMENT clause to the type text.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.tag_settings.set("COMMENT", comment);
        self
    }

    /// Appends raw modifier text after the type.
    #[must_use]
    pub fn modifier(mut self, text: impl Into<String>) -> Self {
        self.modifier = Some(text.into());
        self
    }

    /// Adds an arbitrary tag setting.
    #[must_use]
    pub fn tag(mut self, key: &str, value: impl Into<String>) -> Self {
        self.tag_settings.set(key, value);
        self
    }

    /// Returns the tag setting stored under `key`.
    #[must_use]
    pub fn tag_setting(&self, key: &str) -> Option<&str> {
        self.tag_settings.get(key)
    }

    /// Stores a tag setting on the descriptor.
    pub fn set_tag_setting(&mut self, key: &str, value: impl Into<String>) {
        self.tag_settings.set(key, value);
    }

    /// Returns all tag settings.
    #[must_use]
    pub fn tag_settings(&self) -> &TagSettings {
        &self.tag_settings
    }

    /// Returns whether the field may receive an engine-generated key.
    ///
    /// An explicit `AUTO_INCREMENT` setting wins unless its value is
    /// `false`; without one, only primary keys are eligible.
    #[must_use]
    pub fn can_auto_increment(&self) -> bool {
        self.tag_settings
            .get(AUTO_INCREMENT)
            .map_or(self.primary_key, |value| {
                !value.eq_ignore_ascii_case("false")
            })
    }

    /// Returns whether the auto-increment marker has been recorded.
    #[must_use]
    pub fn is_auto_increment(&self) -> bool {
        self.tag_settings.get(AUTO_INCREMENT) == Some(AUTO_INCREMENT)
    }

    /// Records the auto-increment marker.
    pub fn mark_auto_increment(&mut self) {
        self.tag_settings.set(AUTO_INCREMENT, AUTO_INCREMENT);
    }

    /// Returns the text appended after the inferred type.
    ///
    /// Built from the NOT NULL, UNIQUE, DEFAULT and COMMENT settings
    /// followed by the raw modifier, space-separated.
    #[must_use]
    pub fn additional_type(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(not_null) = self.tag_settings.get("NOT NULL") {
            parts.push(not_null.to_string());
        }
        if let Some(unique) = self.tag_settings.get("UNIQUE") {
            parts.push(unique.to_string());
        }
        if let Some(default) = self.tag_settings.get("DEFAULT") {
            parts.push(format!("DEFAULT {default}"));
        }
        if let Some(comment) = self.tag_settings.get("COMMENT") {
            parts.push(format!("COMMENT {comment}"));
        }
        if let Some(ref modifier) = self.modifier {
            parts.push(modifier.clone());
        }

        parts
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Maps a Rust type to the [`FieldKind`] of a column storing it.
///
/// Implement this for domain types to give them a column mapping;
/// types without an implementation cannot be described with
/// [`FieldDescriptor::of`].
pub trait HasFieldKind {
    /// Returns the kind for values of this type.
    fn field_kind() -> FieldKind;
}

macro_rules! impl_field_kind {
    ($kind:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl HasFieldKind for $ty {
                fn field_kind() -> FieldKind {
                    $kind
                }
            }
        )+
    };
}

impl_field_kind!(FieldKind::Bool => bool);
impl_field_kind!(FieldKind::Int => i8, i16, i32, u8, u16, u32, isize, usize);
impl_field_kind!(FieldKind::BigInt => i64, u64);
impl_field_kind!(FieldKind::Float => f32, f64);
impl_field_kind!(FieldKind::string(DEFAULT_STRING_SIZE) => String, str);
impl_field_kind!(FieldKind::Time => NaiveDateTime, NaiveDate);
impl_field_kind!(FieldKind::Bytes => Vec<u8>, [u8]);

impl<Tz: TimeZone> HasFieldKind for DateTime<Tz> {
    fn field_kind() -> FieldKind {
        FieldKind::Time
    }
}

impl<const N: usize> HasFieldKind for [u8; N] {
    fn field_kind() -> FieldKind {
        FieldKind::Bytes
    }
}

impl<T: HasFieldKind + ?Sized> HasFieldKind for &T {
    fn field_kind() -> FieldKind {
        T::field_kind()
    }
}

impl<T: HasFieldKind + ?Sized> HasFieldKind for Box<T> {
    fn field_kind() -> FieldKind {
        T::field_kind()
    }
}

impl<T: HasFieldKind> HasFieldKind for Option<T> {
    fn field_kind() -> FieldKind {
        T::field_kind()
    }
}
