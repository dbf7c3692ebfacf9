//! Query-by-example compilation.
//!
//! Walks an example tree depth-first and produces the path expression that
//! navigates a similarly shaped graph. Nested nodes flagged as matches (or
//! holding a matched descendant) become navigation steps; everything else
//! collapses into bracketed predicates on the step it hangs off.

use super::ast::{PathExpression, Predicate, Step};
use crate::example::node::{ExampleNode, Member};
use tracing::{debug, trace};

/// Member names that are node plumbing rather than navigable structure.
pub const RESERVED_MEMBERS: [&str; 5] = [
    "nodeTags",
    "nodeName",
    "address",
    "constructor",
    "navigatedFrom",
];

/// Prefix of builder members (`withName`, ...).
pub const BUILDER_PREFIX: &str = "with";

/// Prefix of internal bookkeeping members (`_match`, ...).
pub const INTERNAL_PREFIX: &str = "_";

/// The path into a subgraph, and whether it must stay a navigation step.
struct Branch {
    steps: Vec<Step>,
    is_match: bool,
}

/// Creates a query for the example, treating the root as the node to return.
///
/// All unmatched branches become predicates of the steps they hang off.
pub fn for_root(example: &ExampleNode) -> PathExpression {
    compile(example, true)
}

/// Creates a query for the example, navigating to nodes flagged as matches.
///
/// The root is only a match when flagged itself or through a descendant;
/// the resulting expression text is the same in both cases.
pub fn by_example(example: &ExampleNode) -> PathExpression {
    compile(example, false)
}

/// Whether a member takes part in the compiled expression.
pub fn is_navigable(name: &str) -> bool {
    !RESERVED_MEMBERS.contains(&name)
        && !name.starts_with(BUILDER_PREFIX)
        && !name.starts_with(INTERNAL_PREFIX)
}

fn compile(example: &ExampleNode, root_is_match: bool) -> PathExpression {
    let branch = compile_branch(example, root_is_match);
    let expression = PathExpression::new(branch.steps);
    debug!(
        root = example.tag().primary(),
        matched = branch.is_match,
        "compiled query by example: {}",
        expression
    );
    expression
}

fn compile_branch(node: &ExampleNode, force_match: bool) -> Branch {
    let mut steps = vec![Step::root(node.tag().primary())];
    let mut is_match = force_match || node.is_match();

    for (name, member) in node.members() {
        if !is_navigable(name) {
            trace!(member = name, "skipping reserved member");
            continue;
        }
        match member {
            Member::Node(child) => {
                let branch = compile_branch(child, false);
                let mut child_steps = branch.steps;
                if let Some(first) = child_steps.first_mut() {
                    first.axis = Some(name.to_string());
                }
                if branch.is_match {
                    is_match = true;
                    steps.extend(child_steps);
                } else {
                    push_predicate(&mut steps, Predicate::Path(child_steps));
                }
            }
            Member::Scalar(value) => push_predicate(
                &mut steps,
                Predicate::Property {
                    name: name.to_string(),
                    value: value.to_string(),
                },
            ),
            Member::Ignored => trace!(member = name, "ignoring unfamiliar member"),
        }
    }

    Branch { steps, is_match }
}

/// Predicates bind to whichever step currently ends the path.
fn push_predicate(steps: &mut [Step], predicate: Predicate) {
    if let Some(last) = steps.last_mut() {
        last.predicates.push(predicate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::example::node::{mark_as_match, matched, TypeTag};

    #[test]
    fn test_empty_node_is_tag_only() {
        let example = ExampleNode::new("File");
        assert_eq!(by_example(&example).to_string(), "/File()");
        assert_eq!(for_root(&example).to_string(), "/File()");
    }

    #[test]
    fn test_scalar_member_becomes_predicate() {
        let example = ExampleNode::new("File").with_scalar("path", "foo.txt");
        assert_eq!(for_root(&example).to_string(), "/File()[@path='foo.txt']");
    }

    #[test]
    fn test_only_first_tag_is_used() {
        let tag = TypeTag::from_labels(vec!["File", "Blob"]).unwrap();
        let example = ExampleNode::new(tag);
        assert_eq!(for_root(&example).to_string(), "/File()");
    }

    #[test]
    fn test_matched_child_is_a_step() {
        let example = ExampleNode::new("A").with_node("child", matched(ExampleNode::new("B")));
        let query = for_root(&example).to_string();
        assert_eq!(query, "/A()/child::B()");
        assert!(!query.contains("[/child::B()]"));
    }

    #[test]
    fn test_unmatched_child_is_a_predicate() {
        let example = ExampleNode::new("A").with_node("child", ExampleNode::new("B"));
        assert_eq!(for_root(&example).to_string(), "/A()[/child::B()]");
    }

    #[test]
    fn test_project_fileset_scenario() {
        let mut file = ExampleNode::new("File").with_scalar("extension", "ts");
        mark_as_match(&mut file);
        let example = ExampleNode::new("Project").with_node("fileset", file);
        assert_eq!(
            for_root(&example).to_string(),
            "/Project()/fileset::File()[@extension='ts']"
        );
    }

    #[test]
    fn test_match_propagates_through_unflagged_parent() {
        let example = ExampleNode::new("Org").with_node(
            "project",
            ExampleNode::new("Project")
                .with_scalar("name", "rug")
                .with_node("file", matched(ExampleNode::new("File"))),
        );
        assert_eq!(
            by_example(&example).to_string(),
            "/Org()/project::Project()[@name='rug']/file::File()"
        );
    }

    #[test]
    fn test_predicates_after_matched_step_attach_to_it() {
        let example = ExampleNode::new("A")
            .with_scalar("x", "1")
            .with_node("child", matched(ExampleNode::new("B").with_scalar("y", "2")))
            .with_scalar("z", "3");
        let query = for_root(&example);
        assert_eq!(query.to_string(), "/A()[@x='1']/child::B()[@y='2'][@z='3']");
        assert_eq!(query.steps()[1].predicates.len(), 2);
    }

    #[test]
    fn test_nested_predicate_keeps_its_own_predicates() {
        let example = ExampleNode::new("Repo").with_node(
            "owner",
            ExampleNode::new("User")
                .with_scalar("login", "bob")
                .with_node("org", ExampleNode::new("Org").with_scalar("name", "atomist")),
        );
        assert_eq!(
            for_root(&example).to_string(),
            "/Repo()[/owner::User()[@login='bob'][/org::Org()[@name='atomist']]]"
        );
    }

    #[test]
    fn test_reserved_and_prefixed_members_are_skipped() {
        let mut example = ExampleNode::new("File");
        for name in RESERVED_MEMBERS {
            example.insert(name, crate::example::Scalar::from("x"));
        }
        example.insert("_internal", crate::example::Scalar::from("x"));
        example.insert("withPath", ExampleNode::new("Path").matched());
        example.insert("without", crate::example::Scalar::from("x"));
        assert_eq!(for_root(&example).to_string(), "/File()");
    }

    #[test]
    fn test_ignored_members_produce_nothing() {
        let example = ExampleNode::new("File")
            .with_ignored("lines")
            .with_scalar("name", "a");
        assert_eq!(for_root(&example).to_string(), "/File()[@name='a']");
    }

    #[test]
    fn test_scalar_kinds() {
        let example = ExampleNode::new("File")
            .with_scalar("size", 12)
            .with_scalar("ratio", 0.5)
            .with_scalar("binary", false);
        assert_eq!(
            for_root(&example).to_string(),
            "/File()[@size='12'][@ratio='0.5'][@binary='false']"
        );
    }

    #[test]
    fn test_falsy_scalars_still_produce_predicates() {
        let example = ExampleNode::new("File")
            .with_scalar("binary", false)
            .with_scalar("size", 0)
            .with_scalar("name", "");
        assert_eq!(
            for_root(&example).to_string(),
            "/File()[@binary='false'][@size='0'][@name='']"
        );
    }

    #[test]
    fn test_is_navigable() {
        assert!(is_navigable("path"));
        assert!(!is_navigable("nodeName"));
        assert!(!is_navigable("_match"));
        assert!(!is_navigable("withContent"));
    }
}
