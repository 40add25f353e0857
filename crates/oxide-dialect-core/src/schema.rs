//! Schema descriptions consumed by the DDL and INSERT generators.
//!
//! The abstract type model lives outside this crate; a [`TypeDescriptor`] is
//! only the ordered list of fields the generators need, and a
//! [`SchemaResolver`] looks up the type a foreign key points at.

use serde::{Deserialize, Serialize};

use crate::identifier::uncamelify;

/// Semantic value types of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    String,
    Integer,
    Long,
    Short,
    BigInteger,
    Decimal,
    Double,
    Boolean,
    Date,
    Time,
    Datetime,
    Duration,
    Uuid,
    Uri,
    Binary,
    Enum,
    /// A reference to another complex type, stored as `<name>_id`.
    Reference,
}

impl SemanticType {
    /// Returns true for integral and decimal types.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Integer | Self::Long | Self::Short | Self::BigInteger | Self::Decimal | Self::Double
        )
    }

    /// Returns true for date, time and datetime.
    #[must_use]
    pub const fn is_temporal(self) -> bool {
        matches!(self, Self::Date | Self::Time | Self::Datetime)
    }

    /// Returns true for types stored as character data.
    #[must_use]
    pub const fn is_textual(self) -> bool {
        matches!(self, Self::String | Self::Uri | Self::Enum | Self::Duration)
    }
}

/// Sub-kind of a date/time value, selecting its literal format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemporalKind {
    Date,
    Time,
    Datetime,
}

/// Target of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKey {
    /// Name of the referenced type.
    pub target_type: String,
    /// Referenced field of that type.
    pub target_field: String,
}

/// One field of a complex type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Field name as written in the type (camelCase allowed).
    pub name: String,
    /// Semantic value type.
    #[serde(rename = "type")]
    pub semantic_type: SemanticType,
    /// Declared maximum length for textual fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Whether the field may be absent (minimum occurrence of zero).
    #[serde(default)]
    pub nullable: bool,
    /// Whether the column carries a uniqueness constraint.
    #[serde(default)]
    pub unique: bool,
    /// Whether the value is drawn from a sequence.
    #[serde(default)]
    pub generated: bool,
    /// Date/time format hint; defaults to the semantic type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<TemporalKind>,
    /// Foreign key target, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<ForeignKey>,
}

impl FieldDescriptor {
    /// Creates a mandatory field of the given type.
    #[must_use]
    pub fn new(name: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self {
            name: name.into(),
            semantic_type,
            max_length: None,
            nullable: false,
            unique: false,
            generated: false,
            format: None,
            foreign_key: None,
        }
    }

    /// Marks the field as optional.
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Adds a uniqueness constraint.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Draws the value from a sequence.
    #[must_use]
    pub const fn generated(mut self) -> Self {
        self.generated = true;
        self
    }

    /// Sets the declared maximum length.
    #[must_use]
    pub const fn max_length(mut self, length: usize) -> Self {
        self.max_length = Some(length);
        self
    }

    /// Sets the date/time format hint.
    #[must_use]
    pub const fn format(mut self, kind: TemporalKind) -> Self {
        self.format = Some(kind);
        self
    }

    /// Adds a foreign key to a field of another type.
    #[must_use]
    pub fn references(mut self, target_type: impl Into<String>, target_field: impl Into<String>) -> Self {
        self.foreign_key = Some(ForeignKey {
            target_type: target_type.into(),
            target_field: target_field.into(),
        });
        self
    }

    /// Returns true if this field is the primary key.
    #[must_use]
    pub fn is_primary_key(&self) -> bool {
        self.name == "id"
    }

    /// Returns the `snake_case` column name; references get an `_id` suffix.
    #[must_use]
    pub fn column_name(&self) -> String {
        let column = uncamelify(&self.name);
        if self.semantic_type == SemanticType::Reference {
            format!("{column}_id")
        } else {
            column
        }
    }

    /// Resolves the date/time sub-kind, defaulting to datetime.
    #[must_use]
    pub fn temporal_kind(&self) -> Option<TemporalKind> {
        if let Some(kind) = self.format {
            return Some(kind);
        }
        match self.semantic_type {
            SemanticType::Date => Some(TemporalKind::Date),
            SemanticType::Time => Some(TemporalKind::Time),
            SemanticType::Datetime => Some(TemporalKind::Datetime),
            _ => None,
        }
    }
}

/// A named complex type with ordered fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Type name.
    pub name: String,
    /// Explicit table name; overrides the derived one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    /// Fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    /// Creates a type without an explicit collection name.
    #[must_use]
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            collection: None,
            fields,
        }
    }

    /// Sets an explicit table name.
    #[must_use]
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Returns the table name: the collection name, else the `snake_case` type name.
    #[must_use]
    pub fn table_name(&self) -> String {
        self.collection
            .clone()
            .unwrap_or_else(|| uncamelify(&self.name))
    }

    /// Finds a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Looks up the type a foreign key references.
pub trait SchemaResolver {
    /// Returns the named type, if known.
    fn resolve(&self, type_name: &str) -> Option<&TypeDescriptor>;
}

/// A set of types loaded from a JSON document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// All known types.
    pub types: Vec<TypeDescriptor>,
}

impl SchemaDocument {
    /// Creates a document from a list of types.
    #[must_use]
    pub const fn new(types: Vec<TypeDescriptor>) -> Self {
        Self { types }
    }
}

impl SchemaResolver for SchemaDocument {
    fn resolve(&self, type_name: &str) -> Option<&TypeDescriptor> {
        self.types.iter().find(|t| t.name == type_name)
    }
}
