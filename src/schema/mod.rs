//! Serde models of the two upstream Libris documents.
//!
//! Every field is optional and every field that Libris sometimes emits as a
//! list is a [OneOrMany](crate::types::one_or_many::OneOrMany), so
//! deserialization only fails on values of an unexpected kind.

pub mod edition;
pub mod graph;
