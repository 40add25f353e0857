//! # oxide-dialect-core
//!
//! Translates portable, named-parameter SQL into the dialect of a target
//! database and generates literal DDL/DML from type descriptors.
//!
//! This crate provides:
//! - A rewrite pipeline normalizing boolean literals, turning
//!   `insert ... on conflict ... do update` into `merge` where the vendor has
//!   no native upsert, and quoting reserved identifiers
//! - Pagination emulation for vendors without `limit`/`offset`
//! - `create table` and literal `insert` generation from field descriptors
//! - Bind plans telling the binding layer which value goes in which parameter
//!
//! ## Rewriting an upsert
//!
//! ```rust
//! use oxide_dialect_core::{Dialect, Vendor};
//!
//! let oracle = Dialect::new(Vendor::Oracle).unwrap();
//! let sql = oracle
//!     .rewrite("insert into t (id, name) values (:id, :name) on conflict (id) do update set name = excluded.name")
//!     .unwrap();
//!
//! assert!(sql.starts_with("merge into t tt"));
//! assert!(sql.contains("when matched then update set name = excluded.name"));
//! ```
//!
//! ## Generating DDL
//!
//! ```rust
//! use oxide_dialect_core::{Dialect, FieldDescriptor, SchemaDocument, SemanticType, TypeDescriptor, Vendor};
//!
//! let ty = TypeDescriptor::new(
//!     "Note",
//!     vec![
//!         FieldDescriptor::new("id", SemanticType::Uuid),
//!         FieldDescriptor::new("body", SemanticType::String).nullable(),
//!     ],
//! );
//! let oracle = Dialect::new(Vendor::Oracle).unwrap();
//! let ddl = oracle.build_create_table(&ty, &SchemaDocument::default(), true).unwrap();
//!
//! assert_eq!(ddl, "create table note (id varchar2(36) primary key, body varchar2(4000));");
//! ```

pub mod binding;
pub mod ddl;
pub mod dialect;
pub mod error;
pub mod identifier;
pub mod insert;
pub mod lexer;
pub mod literal;
pub mod rewrite;
pub mod schema;
pub mod value;

pub use binding::{ArrayType, BindHint, Binding, array_type, bind_plan, write_large_object};
pub use ddl::build_create_table;
pub use dialect::{Dialect, DialectProfile, Vendor};
pub use error::{DialectError, Result};
pub use identifier::{restrict, rewrite_reserved_identifiers, uncamelify};
pub use insert::{build_insert_literal, build_insert_literal_at};
pub use lexer::{Token, TokenKind, split_preserving_string_literals, tokenize};
pub use literal::{default_for_missing, literal_for, sql_type_for};
pub use rewrite::{UpsertStatement, apply_limit, emit_merge, rewrite, rewrite_upsert};
pub use schema::{
    FieldDescriptor, ForeignKey, SchemaDocument, SchemaResolver, SemanticType, TemporalKind,
    TypeDescriptor,
};
pub use value::{FieldValue, IntoFieldValue};
