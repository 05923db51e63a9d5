//! Dynamically typed values and the tables that hold them.
//!
//! - [`Variant`]: small tagged value with a null state and arithmetic.
//! - [`VariantTable`]: hash-keyed values with lazy sorting and base-table fallback.
//! - [`TableKeyPair`]: `(table, variable)` address used by resolvers.

mod error;
mod key;
mod operator;
mod quote;
mod table;
mod value;

pub use error::TableError;
pub use key::{TABLE_SEPARATOR, TableKeyPair};
pub use operator::{CompareOperator, ModifyOperator};
pub use quote::find_unquoted;
pub use table::{LINEAR_SCAN_MAX, NamedVariant, SharedTable, VariantTable, lookup_shared};
pub use value::{Variant, VariantKind};
pub use varitab_strhash::StringHash32;
