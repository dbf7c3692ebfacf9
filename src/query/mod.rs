//! Query-by-example path expressions.
//!
//! This module turns example trees into path expressions for the graph
//! query engine, and parses those expressions back into a typed form.
//!
//! # Syntax
//!
//! - `/Tag()` - Root step
//! - `/member::Tag()` - Step through a named member
//! - `[@name='value']` - Property equality predicate
//! - `[/member::Tag()...]` - Sub-path that must exist
//!
//! # Examples
//!
//! ```
//! use queryquill::example::{matched, ExampleNode};
//! use queryquill::query::{for_root, Parser};
//!
//! let project = ExampleNode::new("Project")
//!     .with_node("fileset", matched(ExampleNode::new("File").with_scalar("extension", "ts")));
//!
//! let query = for_root(&project);
//! assert_eq!(query.to_string(), "/Project()/fileset::File()[@extension='ts']");
//! assert_eq!(Parser::parse(&query.to_string()).unwrap(), query);
//! ```

pub mod ast;
pub mod compiler;
pub mod error;
pub mod parser;

pub use ast::{PathExpression, Predicate, Step};
pub use compiler::{by_example, for_root, is_navigable};
pub use error::QueryError;
pub use parser::Parser;
