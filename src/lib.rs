//! QueryQuill - query-by-example path expressions for chat-ops automation.
//!
//! Describe the graph shape you are looking for as an example tree, mark the
//! nodes you want back, and compile it into a path expression the graph
//! query engine understands. Also carries the generic success/error response
//! handlers used when sending commands.

pub mod config;
pub mod example;
pub mod file;
pub mod handlers;
pub mod query;

pub use example::{mark_as_match, matched, ExampleNode, Member, Scalar};
pub use query::{by_example, for_root, PathExpression};
