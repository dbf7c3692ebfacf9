//! Path expression parser.
//!
//! Reads the text produced by the compiler back into a [`PathExpression`].
//! Whitespace is significant: names run up to the next delimiter, and
//! property values are taken verbatim up to a `']` that is followed by
//! another predicate, a step, a closing bracket or the end of input.

use super::ast::{PathExpression, Predicate, Step};
use super::error::QueryError;

/// Parser for path expression strings.
pub struct Parser {
    input: Vec<char>,
    position: usize,
}

impl Parser {
    /// Creates a new parser for the given expression.
    pub fn new(query: &str) -> Self {
        Self {
            input: query.chars().collect(),
            position: 0,
        }
    }

    /// Parses the expression string into a PathExpression.
    pub fn parse(query: &str) -> Result<PathExpression, QueryError> {
        let mut parser = Parser::new(query);
        parser.parse_expression()
    }

    fn parse_expression(&mut self) -> Result<PathExpression, QueryError> {
        self.expect('/')?;
        let mut steps = vec![self.parse_step_body(None)?];
        while !self.is_eof() {
            steps.push(self.parse_axis_step()?);
        }
        Ok(PathExpression::new(steps))
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Returns the next character and advances position.
    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }

    fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Expects a specific character and advances, or returns an error.
    fn expect(&mut self, expected: char) -> Result<(), QueryError> {
        let pos = self.position;
        match self.next() {
            Some(ch) if ch == expected => Ok(()),
            Some(ch) => Err(QueryError::UnexpectedToken {
                position: pos,
                found: ch.to_string(),
                expected: format!("'{}'", expected),
            }),
            None => Err(QueryError::UnexpectedEnd {
                expected: format!("'{}'", expected),
            }),
        }
    }

    /// Parses a member name, property name or type tag.
    ///
    /// Names run up to the next delimiter, so they may contain dots, spaces
    /// or any other character the compiler passes through. Only type tags
    /// must be non-empty.
    fn parse_identifier(&mut self, what: &str, allow_empty: bool) -> Result<String, QueryError> {
        let start = self.position;
        let mut name = String::new();
        while let Some(ch) = self.peek() {
            if is_delimiter(ch) {
                break;
            }
            name.push(ch);
            self.next();
        }
        if name.is_empty() && !allow_empty {
            Err(QueryError::InvalidSyntax {
                message: format!("Expected {} at position {}", what, start),
            })
        } else {
            Ok(name)
        }
    }

    /// Parses `/member::Tag()` and its predicates.
    fn parse_axis_step(&mut self) -> Result<Step, QueryError> {
        self.expect('/')?;
        let axis = self.parse_identifier("member name", true)?;
        self.expect(':')?;
        self.expect(':')?;
        self.parse_step_body(Some(axis))
    }

    /// Parses `Tag()` followed by any number of predicates.
    fn parse_step_body(&mut self, axis: Option<String>) -> Result<Step, QueryError> {
        let test = self.parse_identifier("type tag", false)?;
        self.expect('(')?;
        self.expect(')')?;

        let mut predicates = Vec::new();
        while self.peek() == Some('[') {
            predicates.push(self.parse_predicate()?);
        }

        Ok(Step {
            axis,
            test,
            predicates,
        })
    }

    /// Parses `[@name='value']` or `[/member::Tag()...]`.
    fn parse_predicate(&mut self) -> Result<Predicate, QueryError> {
        self.expect('[')?;
        match self.peek() {
            Some('@') => {
                self.next();
                let name = self.parse_identifier("property name", true)?;
                self.expect('=')?;
                self.expect('\'')?;
                let value = self.parse_quoted_value()?;
                Ok(Predicate::Property { name, value })
            }
            Some('/') => {
                let mut steps = Vec::new();
                while self.peek() == Some('/') {
                    steps.push(self.parse_axis_step()?);
                }
                self.expect(']')?;
                Ok(Predicate::Path(steps))
            }
            Some(ch) => Err(QueryError::UnexpectedToken {
                position: self.position,
                found: ch.to_string(),
                expected: "'@' or '/'".to_string(),
            }),
            None => Err(QueryError::UnexpectedEnd {
                expected: "predicate".to_string(),
            }),
        }
    }

    /// Reads a value up to and including the closing `']`.
    ///
    /// `']` only closes the value when another predicate, a step, an
    /// enclosing bracket or the end of input follows it.
    fn parse_quoted_value(&mut self) -> Result<String, QueryError> {
        let mut value = String::new();
        loop {
            match self.next() {
                Some('\'') if self.closes_value() => {
                    self.next();
                    return Ok(value);
                }
                Some(ch) => value.push(ch),
                None => {
                    return Err(QueryError::UnexpectedEnd {
                        expected: "closing \"']\"".to_string(),
                    })
                }
            }
        }
    }

    /// Whether the input at the cursor is `]` ending a quoted value.
    fn closes_value(&self) -> bool {
        if self.peek() != Some(']') {
            return false;
        }
        matches!(
            self.input.get(self.position + 1),
            None | Some('[') | Some('/') | Some(']')
        )
    }
}

/// Characters that end a name.
fn is_delimiter(ch: char) -> bool {
    matches!(ch, '=' | ':' | '(' | '[' | ']' | '/' | '\'')
}
