//! Syntax tree types for path expressions.
//!
//! `Display` renders the exact text the graph query engine reads, e.g.
//! `/Project()/fileset::File()[@extension='ts']`.

use serde::Serialize;
use std::fmt;

/// A clause in brackets constraining the step it follows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// Equality on a property (`[@name='value']`)
    Property { name: String, value: String },
    /// A sub-path that must exist (`[/member::Tag()...]`)
    Path(Vec<Step>),
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Property { name, value } => write!(f, "[@{}='{}']", name, value),
            Predicate::Path(steps) => {
                write!(f, "[")?;
                for step in steps {
                    write!(f, "{}", step)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// One navigation step: an optional axis (the member navigated through),
/// the node test (type tag) and its predicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Member name; `None` only for the first step of a path
    pub axis: Option<String>,
    /// Type tag the reached node must carry
    pub test: String,
    pub predicates: Vec<Predicate>,
}

impl Step {
    /// Creates the first step of a path, with no axis.
    pub fn root(test: impl Into<String>) -> Self {
        Self {
            axis: None,
            test: test.into(),
            predicates: Vec::new(),
        }
    }

    /// Creates a step through the named member.
    pub fn child(axis: impl Into<String>, test: impl Into<String>) -> Self {
        Self {
            axis: Some(axis.into()),
            test: test.into(),
            predicates: Vec::new(),
        }
    }

    /// Adds a predicate, consuming and returning the step.
    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.axis {
            Some(axis) => write!(f, "/{}::{}()", axis, self.test)?,
            None => write!(f, "{}()", self.test)?,
        }
        for predicate in &self.predicates {
            write!(f, "{}", predicate)?;
        }
        Ok(())
    }
}

/// A complete absolute path expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathExpression {
    steps: Vec<Step>,
}

impl PathExpression {
    /// Creates an expression from its steps. The first step is the root.
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The step navigated for, i.e. the node the query returns.
    pub fn leaf(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// All property predicates on the top-level steps, in order.
    pub fn property_predicates(&self) -> Vec<(&str, &str)> {
        self.steps
            .iter()
            .flat_map(|step| step.predicates.iter())
            .filter_map(|predicate| match predicate {
                Predicate::Property { name, value } => Some((name.as_str(), value.as_str())),
                Predicate::Path(_) => None,
            })
            .collect()
    }

    /// Whether any top-level step carries `[@name='value']`.
    pub fn has_property(&self, name: &str, value: &str) -> bool {
        self.property_predicates()
            .iter()
            .any(|(n, v)| *n == name && *v == value)
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}

impl fmt::Display for PathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/")?;
        for step in &self.steps {
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_root_only() {
        let expr = PathExpression::new(vec![Step::root("File")]);
        assert_eq!(expr.to_string(), "/File()");
    }

    #[test]
    fn test_display_steps_and_predicates() {
        let expr = PathExpression::new(vec![
            Step::root("Project")
                .with_predicate(Predicate::Path(vec![Step::child("repo", "Repo")])),
            Step::child("fileset", "File").with_predicate(Predicate::Property {
                name: "extension".to_string(),
                value: "ts".to_string(),
            }),
        ]);
        assert_eq!(
            expr.to_string(),
            "/Project()[/repo::Repo()]/fileset::File()[@extension='ts']"
        );
    }

    #[test]
    fn test_property_predicates_and_leaf() {
        let expr = PathExpression::new(vec![
            Step::root("A").with_predicate(Predicate::Property {
                name: "x".to_string(),
                value: "1".to_string(),
            }),
            Step::child("b", "B"),
        ]);
        assert_eq!(expr.property_predicates(), vec![("x", "1")]);
        assert!(expr.has_property("x", "1"));
        assert!(!expr.has_property("x", "2"));
        assert_eq!(expr.leaf().map(|s| s.test.as_str()), Some("B"));
    }
}
