//! In-memory table transformations.
//!
//! The processing layer operates on [`crate::types::Table`] values produced by ingestion.
//! Each operation is user-triggered, independent, and idempotent; they may be applied in
//! either order or skipped entirely.
//!
//! - [`remove_duplicates()`]: drop exact-duplicate rows, first occurrence wins
//! - [`fill_missing()`]: replace missing numeric cells with the per-column mean
//! - [`project()`]: narrow the table to a chosen subset/order of columns
//!
//! ## Example: dedupe → mean-fill → project
//!
//! ```rust
//! use data_sweeper::processing::{fill_missing, project, remove_duplicates};
//! use data_sweeper::types::{DataType, Field, Schema, Table, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("name", DataType::Utf8),
//!     Field::new("score", DataType::Float64),
//! ]);
//! let mut table = Table::new(
//!     schema,
//!     vec![
//!         vec![Value::Utf8("a".to_string()), Value::Float64(10.0)],
//!         vec![Value::Utf8("a".to_string()), Value::Float64(10.0)],
//!         vec![Value::Utf8("b".to_string()), Value::Null],
//!     ],
//! );
//!
//! assert_eq!(remove_duplicates(&mut table), 1);
//! assert_eq!(fill_missing(&mut table), 1);
//! assert_eq!(table.rows[1][1], Value::Float64(10.0));
//!
//! project(&mut table, &["score"]);
//! assert_eq!(table.schema.field_names().collect::<Vec<_>>(), vec!["score"]);
//! assert_eq!(table.row_count(), 2);
//! ```

pub mod dedupe;
pub mod fill;
pub mod project;

pub use dedupe::remove_duplicates;
pub use fill::fill_missing;
pub use project::project;
