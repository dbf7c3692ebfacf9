//! Example trees for query-by-example.
//!
//! An example is an explicit tree of [`ExampleNode`]s. Each node carries a
//! type tag, a match flag, and named members that are either scalar values,
//! nested nodes, or values the compiler ignores. Trees are built in code with
//! the builder methods on `ExampleNode`, or read from YAML/JSON documents
//! with [`document::from_json_value`].
//!
//! # Modules
//!
//! - `node`: example node, member and scalar types, match marking
//! - `document`: conversion from YAML/JSON documents
//! - `error`: conversion errors

pub mod document;
pub mod error;
pub mod node;

pub use error::ExampleError;
pub use node::{mark_as_match, matched, ExampleNode, Member, Scalar, ToExample, TypeTag};
