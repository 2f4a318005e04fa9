//! Route-path compiler.
//!
//! Turns a path template such as `/files/{owner}/doc-{id:\d+}/**` into the
//! ordered [`Segment`] sequence the index and matchers consume.
//!
//! | Component        | Segment                                    |
//! |------------------|--------------------------------------------|
//! | `users`          | static                                     |
//! | `{id}`           | variable                                   |
//! | `{id:\d+}`       | variable constrained by `^(?:\d+)$`        |
//! | `{path:**}`      | variable capturing the rest of the URL     |
//! | `user-{id}`      | partial variable                           |
//! | `v{path:**}`     | partial variable capturing the rest        |
//! | `*` / `*name`    | single wildcard (anonymous / named)        |
//! | `**` / `**name`  | multi wildcard (anonymous / named)         |

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use super::types::{Segment, ANONYMOUS_MULTI, ANONYMOUS_SINGLE};

static VARIABLE_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("variable name regex should be valid")
});

/// Route definition error
///
/// Returned by [`compile_path`] and [`super::Route::compile`] when a path
/// template cannot be turned into a segment pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// A `{` without its closing `}` or a stray `}`
    UnbalancedBrace { component: String },
    /// `{}` or `{:regex}`
    EmptyVariableName { component: String },
    /// Name is not usable as a capture group name
    InvalidVariableName { name: String },
    /// Constraint does not compile as a regular expression
    InvalidConstraint {
        name: String,
        pattern: String,
        reason: String,
    },
    /// The same variable name appears twice in one path
    DuplicateVariable { name: String },
    /// A terminal `{name:**}` capture followed by more components
    CatchAllNotLast { component: String },
    /// Route declared without any HTTP method
    NoMethods { path: String },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::UnbalancedBrace { component } => {
                write!(f, "Route error: unbalanced brace in path component '{}'", component)
            }
            RouteError::EmptyVariableName { component } => {
                write!(f, "Route error: empty variable name in path component '{}'", component)
            }
            RouteError::InvalidVariableName { name } => {
                write!(
                    f,
                    "Route error: invalid variable name '{}'. \
                    Names must start with a letter or underscore and contain only [A-Za-z0-9_]",
                    name
                )
            }
            RouteError::InvalidConstraint {
                name,
                pattern,
                reason,
            } => {
                write!(
                    f,
                    "Route error: constraint '{}' for variable '{}' is not a valid regex: {}",
                    pattern, name, reason
                )
            }
            RouteError::DuplicateVariable { name } => {
                write!(f, "Route error: variable '{}' is declared more than once", name)
            }
            RouteError::CatchAllNotLast { component } => {
                write!(
                    f,
                    "Route error: catch-all component '{}' must be the last path component",
                    component
                )
            }
            RouteError::NoMethods { path } => {
                write!(f, "Route error: route '{}' declares no HTTP methods", path)
            }
        }
    }
}

impl std::error::Error for RouteError {}

enum Piece<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

/// Compile a path template into its segment pattern.
///
/// Empty components are dropped, so `/`, `` and `//` all compile to the
/// empty pattern of the root route.
pub fn compile_path(path: &str) -> Result<Vec<Segment>, RouteError> {
    let components: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let mut pattern = Vec::with_capacity(components.len());
    let mut seen: HashSet<Arc<str>> = HashSet::new();

    for (i, component) in components.iter().enumerate() {
        let segment = compile_component(component)?;

        let terminal = matches!(
            segment,
            Segment::Variable { multi: true, .. } | Segment::PartialVariable { multi: true, .. }
        );
        if terminal && i + 1 != components.len() {
            return Err(RouteError::CatchAllNotLast {
                component: (*component).to_string(),
            });
        }

        for name in segment_names(&segment) {
            if name.as_ref() == ANONYMOUS_SINGLE || name.as_ref() == ANONYMOUS_MULTI {
                continue;
            }
            if !seen.insert(Arc::clone(&name)) {
                return Err(RouteError::DuplicateVariable {
                    name: name.to_string(),
                });
            }
        }
        pattern.push(segment);
    }

    Ok(pattern)
}

fn segment_names(segment: &Segment) -> Vec<Arc<str>> {
    match segment {
        Segment::Static { .. } => Vec::new(),
        Segment::Variable { name, .. }
        | Segment::SingleWildcard { name, .. }
        | Segment::MultiWildcard { name, .. } => vec![Arc::clone(name)],
        Segment::PartialVariable { names, .. } => names.clone(),
    }
}

fn compile_component(component: &str) -> Result<Segment, RouteError> {
    if component == ANONYMOUS_SINGLE {
        return Ok(Segment::single_wildcard(ANONYMOUS_SINGLE));
    }
    if component == ANONYMOUS_MULTI {
        return Ok(Segment::multi_wildcard(ANONYMOUS_MULTI));
    }
    if let Some(name) = component.strip_prefix("**") {
        validate_name(name)?;
        return Ok(Segment::multi_wildcard(name));
    }
    if let Some(name) = component.strip_prefix('*') {
        validate_name(name)?;
        return Ok(Segment::single_wildcard(name));
    }

    let pieces = split_placeholders(component)?;
    match pieces.as_slice() {
        [] => Ok(Segment::literal(component)),
        [Piece::Literal(text)] => Ok(Segment::literal(text)),
        [Piece::Placeholder(inner)] => compile_placeholder(component, inner),
        _ => compile_partial(component, &pieces),
    }
}

fn compile_placeholder(component: &str, inner: &str) -> Result<Segment, RouteError> {
    let (name, constraint) = parse_placeholder(component, inner)?;
    match constraint {
        None => Ok(Segment::variable(name)),
        Some("**") => Ok(Segment::catch_all_variable(name)),
        Some("*") => Ok(Segment::single_wildcard(name)),
        Some(pattern) => Segment::constrained(name, pattern),
    }
}

fn compile_partial(component: &str, pieces: &[Piece<'_>]) -> Result<Segment, RouteError> {
    let mut expr = String::with_capacity(component.len() + 16);
    let mut names = Vec::new();
    let mut multi = false;

    expr.push('^');
    for piece in pieces {
        match piece {
            Piece::Literal(text) => expr.push_str(&regex::escape(text)),
            Piece::Placeholder(inner) => {
                let (name, constraint) = parse_placeholder(component, inner)?;
                let body = match constraint {
                    None | Some("*") => "[^/]+",
                    Some("**") => {
                        multi = true;
                        ".+"
                    }
                    Some(pattern) => {
                        // Validate on its own so errors name the variable
                        Regex::new(pattern).map_err(|e| RouteError::InvalidConstraint {
                            name: name.to_string(),
                            pattern: pattern.to_string(),
                            reason: e.to_string(),
                        })?;
                        pattern
                    }
                };
                expr.push_str("(?P<");
                expr.push_str(name);
                expr.push('>');
                expr.push_str(body);
                expr.push(')');
                names.push(Arc::from(name));
            }
        }
    }
    expr.push('$');

    let regex = Regex::new(&expr).map_err(|e| RouteError::InvalidConstraint {
        name: names
            .last()
            .map(|n: &Arc<str>| n.to_string())
            .unwrap_or_default(),
        pattern: expr.clone(),
        reason: e.to_string(),
    })?;

    Ok(Segment::partial(component, regex, names, multi))
}

/// Compile a variable constraint anchored to the whole value.
pub(crate) fn anchor_constraint(name: &str, pattern: &str) -> Result<Regex, RouteError> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|e| RouteError::InvalidConstraint {
        name: name.to_string(),
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

fn parse_placeholder<'a>(
    component: &str,
    inner: &'a str,
) -> Result<(&'a str, Option<&'a str>), RouteError> {
    let (name, constraint) = match inner.split_once(':') {
        Some((name, constraint)) => (name.trim(), Some(constraint)),
        None => (inner.trim(), None),
    };
    if name.is_empty() {
        return Err(RouteError::EmptyVariableName {
            component: component.to_string(),
        });
    }
    validate_name(name)?;
    Ok((name, constraint))
}

fn validate_name(name: &str) -> Result<(), RouteError> {
    if VARIABLE_NAME_REGEX.is_match(name) {
        Ok(())
    } else {
        Err(RouteError::InvalidVariableName {
            name: name.to_string(),
        })
    }
}

/// Split a component into literal runs and `{...}` bodies. Braces nest so
/// constraints like `{code:[a-z]{3}}` stay in one placeholder.
fn split_placeholders(component: &str) -> Result<Vec<Piece<'_>>, RouteError> {
    let unbalanced = || RouteError::UnbalancedBrace {
        component: component.to_string(),
    };
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (i, c) in component.char_indices() {
        match (c, depth) {
            ('{', 0) => {
                if i > start {
                    pieces.push(Piece::Literal(&component[start..i]));
                }
                start = i + 1;
                depth = 1;
            }
            ('{', _) => depth += 1,
            ('}', 0) => return Err(unbalanced()),
            ('}', 1) => {
                pieces.push(Piece::Placeholder(&component[start..i]));
                start = i + 1;
                depth = 0;
            }
            ('}', _) => depth -= 1,
            _ => {}
        }
    }
    if depth != 0 {
        return Err(unbalanced());
    }
    if start < component.len() {
        pieces.push(Piece::Literal(&component[start..]));
    }
    Ok(pieces)
}
