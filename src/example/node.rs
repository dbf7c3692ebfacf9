//! Example node representation for query-by-example.
//!
//! An `ExampleNode` describes the *shape* of a graph node to search for: its
//! type tag, optional scalar properties that act as equality predicates, and
//! nested example nodes reached through named members. Nodes whose position
//! should be returned by the query are flagged with [`mark_as_match`] or
//! [`ExampleNode::matched`].
//!
//! # Example
//!
//! ```
//! use queryquill::example::node::{matched, ExampleNode};
//!
//! let project = ExampleNode::new("Project")
//!     .with_node("fileset", matched(ExampleNode::new("File").with_scalar("extension", "ts")));
//!
//! assert_eq!(project.tag().primary(), "Project");
//! assert!(project.member("fileset").unwrap().is_node());
//! ```

use indexmap::IndexMap;
use std::fmt;

/// The label (or ordered labels) identifying the kind of a node.
///
/// Only the first label takes part in compilation; the rest are carried for
/// callers that describe nodes with several tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeTag {
    primary: String,
    others: Vec<String>,
}

impl TypeTag {
    /// Creates a tag with a single label.
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            others: Vec::new(),
        }
    }

    /// Creates a tag from an ordered list of labels.
    ///
    /// Returns `None` when the list is empty or its first label is.
    pub fn from_labels<I, S>(labels: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut iter = labels.into_iter().map(Into::into);
        let primary = iter.next().filter(|label| !label.is_empty())?;
        Some(Self {
            primary,
            others: iter.collect(),
        })
    }

    /// The significant (first) label.
    pub fn primary(&self) -> &str {
        &self.primary
    }

    /// All labels in order, starting with the primary one.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary.as_str()).chain(self.others.iter().map(String::as_str))
    }
}

impl From<&str> for TypeTag {
    fn from(label: &str) -> Self {
        TypeTag::new(label)
    }
}

impl From<String> for TypeTag {
    fn from(label: String) -> Self {
        TypeTag::new(label)
    }
}

/// A primitive value used as an equality predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl Scalar {
    /// Scalars are always primitive; kept so member checks read uniformly.
    pub fn is_primitive(&self) -> bool {
        true
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => write!(f, "{}", s),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Float(fl) => write!(f, "{}", format_float(*fl)),
            Scalar::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// Formats a float the way the query engine prints numbers: `1` for `1.0`,
/// exponent notation from `1e+21` up and below `1e-6`, `Infinity` and `NaN`.
fn format_float(fl: f64) -> String {
    if fl.is_nan() {
        return "NaN".to_string();
    }
    if fl.is_infinite() {
        return if fl > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if fl == 0.0 {
        return "0".to_string();
    }
    let magnitude = fl.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{:e}", fl);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        };
    }
    format!("{}", fl)
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::Integer(i)
    }
}

impl From<i32> for Scalar {
    fn from(i: i32) -> Self {
        Scalar::Integer(i64::from(i))
    }
}

impl From<f64> for Scalar {
    fn from(fl: f64) -> Self {
        Scalar::Float(fl)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Boolean(b)
    }
}

/// The value bound to a named member of an example node.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    /// A primitive value, compiled to `[@name='value']`
    Scalar(Scalar),
    /// A nested example node, compiled to a step or a path predicate
    Node(ExampleNode),
    /// Anything the compiler skips: null, arrays, unrecognized objects
    Ignored,
}

impl Member {
    pub fn is_scalar(&self) -> bool {
        matches!(self, Member::Scalar(_))
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Member::Node(_))
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Member::Ignored)
    }

    pub fn as_node(&self) -> Option<&ExampleNode> {
        match self {
            Member::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Member::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }
}

impl From<ExampleNode> for Member {
    fn from(node: ExampleNode) -> Self {
        Member::Node(node)
    }
}

impl From<Scalar> for Member {
    fn from(scalar: Scalar) -> Self {
        Member::Scalar(scalar)
    }
}

/// An example of the graph node shape to query for.
///
/// Members keep their insertion order, which is the order their predicates
/// and steps appear in the compiled expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ExampleNode {
    tag: TypeTag,
    name: Option<String>,
    members: IndexMap<String, Member>,
    is_match: bool,
}

impl ExampleNode {
    /// Creates an unmatched node with no members.
    pub fn new(tag: impl Into<TypeTag>) -> Self {
        Self {
            tag: tag.into(),
            name: None,
            members: IndexMap::new(),
            is_match: false,
        }
    }

    pub fn tag(&self) -> &TypeTag {
        &self.tag
    }

    /// The node name, if one was given. Never part of the compiled output.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Builder form of [`ExampleNode::set_name`].
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.set_name(name);
        self
    }

    /// Whether this node was explicitly flagged as a match.
    pub fn is_match(&self) -> bool {
        self.is_match
    }

    /// Flags this node as a match, consuming and returning it.
    pub fn matched(mut self) -> Self {
        self.is_match = true;
        self
    }

    /// Binds a member, replacing any previous value under the same name.
    ///
    /// A replaced member keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, member: impl Into<Member>) {
        self.members.insert(name.into(), member.into());
    }

    /// Builder form of [`ExampleNode::insert`] for scalar members.
    pub fn with_scalar(mut self, name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.insert(name, Member::Scalar(value.into()));
        self
    }

    /// Builder form of [`ExampleNode::insert`] for nested nodes.
    pub fn with_node(mut self, name: impl Into<String>, node: ExampleNode) -> Self {
        self.insert(name, Member::Node(node));
        self
    }

    /// Builder form of [`ExampleNode::insert`] for values the compiler skips.
    pub fn with_ignored(mut self, name: impl Into<String>) -> Self {
        self.insert(name, Member::Ignored);
        self
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.get(name)
    }

    pub fn member_mut(&mut self, name: &str) -> Option<&mut Member> {
        self.members.get_mut(name)
    }

    /// Members in insertion order.
    pub fn members(&self) -> impl Iterator<Item = (&str, &Member)> {
        self.members.iter().map(|(name, member)| (name.as_str(), member))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Flags a node as a match and hands the same node back for chaining.
///
/// Calling it more than once has no further effect.
pub fn mark_as_match(node: &mut ExampleNode) -> &mut ExampleNode {
    node.is_match = true;
    node
}

/// By-value form of [`mark_as_match`], convenient when nesting builders.
pub fn matched(node: ExampleNode) -> ExampleNode {
    node.matched()
}

/// Conversion of caller-defined graph types into an example.
///
/// Implement this for domain types that stand for graph nodes; the compiler
/// only ever sees the resulting `ExampleNode`.
pub trait ToExample {
    fn to_example(&self) -> ExampleNode;
}

impl ToExample for ExampleNode {
    fn to_example(&self) -> ExampleNode {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_is_unmatched_and_empty() {
        let node = ExampleNode::new("File");
        assert!(!node.is_match());
        assert!(node.is_empty());
        assert_eq!(node.tag().primary(), "File");
        assert_eq!(node.name(), None);
    }

    #[test]
    fn test_mark_as_match_returns_same_node() {
        let mut node = ExampleNode::new("File");
        let before: *const ExampleNode = &node;
        let after: *const ExampleNode = mark_as_match(&mut node);
        assert!(std::ptr::eq(before, after));
        assert!(node.is_match());
    }

    #[test]
    fn test_mark_as_match_is_idempotent() {
        let mut node = ExampleNode::new("File").with_scalar("path", "a.txt");
        mark_as_match(mark_as_match(&mut node));
        assert!(node.is_match());
        assert_eq!(node, ExampleNode::new("File").with_scalar("path", "a.txt").matched());
    }

    #[test]
    fn test_members_keep_insertion_order() {
        let node = ExampleNode::new("File")
            .with_scalar("zeta", 1)
            .with_scalar("alpha", 2)
            .with_ignored("middle");
        let names: Vec<&str> = node.members().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeta", "alpha", "middle"]);
    }

    #[test]
    fn test_replacing_member_keeps_position() {
        let mut node = ExampleNode::new("File")
            .with_scalar("a", 1)
            .with_scalar("b", 2);
        node.insert("a", Member::Ignored);
        let names: Vec<&str> = node.members().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(node.member("a").unwrap().is_ignored());
    }

    #[test]
    fn test_type_tag_from_labels() {
        let tag = TypeTag::from_labels(vec!["File", "Blob"]).unwrap();
        assert_eq!(tag.primary(), "File");
        assert_eq!(tag.labels().collect::<Vec<_>>(), vec!["File", "Blob"]);
        assert!(TypeTag::from_labels(Vec::<String>::new()).is_none());
        assert!(TypeTag::from_labels(vec!["", "File"]).is_none());
    }

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar::from("foo.txt").to_string(), "foo.txt");
        assert_eq!(Scalar::from(42).to_string(), "42");
        assert_eq!(Scalar::from(1.0).to_string(), "1");
        assert_eq!(Scalar::from(2.5).to_string(), "2.5");
        assert_eq!(Scalar::from(true).to_string(), "true");
    }

    #[test]
    fn test_float_display_edge_cases() {
        assert_eq!(Scalar::from(-0.0).to_string(), "0");
        assert_eq!(Scalar::from(1e20).to_string(), "100000000000000000000");
        assert_eq!(Scalar::from(1e21).to_string(), "1e+21");
        assert_eq!(Scalar::from(-2.5e30).to_string(), "-2.5e+30");
        assert_eq!(Scalar::from(1.5e-7).to_string(), "1.5e-7");
        assert_eq!(Scalar::from(0.000001).to_string(), "0.000001");
        assert_eq!(Scalar::from(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Scalar::from(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Scalar::from(f64::NAN).to_string(), "NaN");
    }

    #[test]
    fn test_member_checks() {
        assert!(Member::from(Scalar::from("x")).is_scalar());
        assert!(Member::from(ExampleNode::new("A")).is_node());
        assert!(Member::Ignored.is_ignored());
        assert!(Member::Ignored.as_node().is_none());
    }
}
