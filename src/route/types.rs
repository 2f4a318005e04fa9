use http::Method;
use regex::Regex;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

use super::compile::{anchor_constraint, compile_path, RouteError};

/// Marker stored in place of a variable name for anonymous single wildcards.
pub const ANONYMOUS_SINGLE: &str = "*";
/// Marker stored in place of a variable name for anonymous multi wildcards.
pub const ANONYMOUS_MULTI: &str = "**";

/// The closed set of segment types a compiled route can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Static,
    Variable,
    PartialVariable,
    SingleWildcard,
    MultiWildcard,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SegmentKind::Static => "static",
            SegmentKind::Variable => "variable",
            SegmentKind::PartialVariable => "partial_variable",
            SegmentKind::SingleWildcard => "single_wildcard",
            SegmentKind::MultiWildcard => "multi_wildcard",
        };
        write!(f, "{}", s)
    }
}

/// One path component's matching rule.
///
/// Every variant keeps the `original` component text for diagnostics. Names
/// and literals are `Arc<str>` so cloning a route (or capturing a variable
/// name into a match) never copies string data.
#[derive(Debug, Clone)]
pub enum Segment {
    /// Exact literal component (e.g. `users`)
    Static { original: Arc<str> },
    /// Whole-component capture (e.g. `{id}` or `{id:\d+}`)
    ///
    /// When `multi` is set the segment captures every remaining URL
    /// component joined with `/` and terminates matching.
    Variable {
        original: Arc<str>,
        name: Arc<str>,
        pattern: Option<Regex>,
        multi: bool,
    },
    /// Literal text mixed with one or more captures (e.g. `user-{id}`)
    PartialVariable {
        original: Arc<str>,
        regex: Regex,
        names: Vec<Arc<str>>,
        multi: bool,
    },
    /// Exactly one component, named or anonymous (`*`)
    SingleWildcard { original: Arc<str>, name: Arc<str> },
    /// Zero or more components, named or anonymous (`**`)
    MultiWildcard { original: Arc<str>, name: Arc<str> },
}

impl Segment {
    pub fn literal(text: &str) -> Self {
        Segment::Static {
            original: Arc::from(text),
        }
    }

    pub fn variable(name: &str) -> Self {
        Segment::Variable {
            original: Arc::from(format!("{{{name}}}")),
            name: Arc::from(name),
            pattern: None,
            multi: false,
        }
    }

    /// Variable constrained by `pattern`, which is compiled anchored so the
    /// whole component has to satisfy it.
    pub fn constrained(name: &str, pattern: &str) -> Result<Self, RouteError> {
        Ok(Segment::Variable {
            original: Arc::from(format!("{{{name}:{pattern}}}")),
            name: Arc::from(name),
            pattern: Some(anchor_constraint(name, pattern)?),
            multi: false,
        })
    }

    /// Variable that swallows the rest of the URL (e.g. `{path:**}`).
    pub fn catch_all_variable(name: &str) -> Self {
        Segment::Variable {
            original: Arc::from(format!("{{{name}:**}}")),
            name: Arc::from(name),
            pattern: None,
            multi: true,
        }
    }

    pub fn partial(original: &str, regex: Regex, names: Vec<Arc<str>>, multi: bool) -> Self {
        Segment::PartialVariable {
            original: Arc::from(original),
            regex,
            names,
            multi,
        }
    }

    pub fn single_wildcard(name: &str) -> Self {
        let original = if name == ANONYMOUS_SINGLE {
            Arc::from(ANONYMOUS_SINGLE)
        } else {
            Arc::from(format!("*{name}"))
        };
        Segment::SingleWildcard {
            original,
            name: Arc::from(name),
        }
    }

    pub fn multi_wildcard(name: &str) -> Self {
        let original = if name == ANONYMOUS_MULTI {
            Arc::from(ANONYMOUS_MULTI)
        } else {
            Arc::from(format!("**{name}"))
        };
        Segment::MultiWildcard {
            original,
            name: Arc::from(name),
        }
    }

    #[must_use]
    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::Static { .. } => SegmentKind::Static,
            Segment::Variable { .. } => SegmentKind::Variable,
            Segment::PartialVariable { .. } => SegmentKind::PartialVariable,
            Segment::SingleWildcard { .. } => SegmentKind::SingleWildcard,
            Segment::MultiWildcard { .. } => SegmentKind::MultiWildcard,
        }
    }

    #[must_use]
    pub fn original(&self) -> &str {
        match self {
            Segment::Static { original }
            | Segment::Variable { original, .. }
            | Segment::PartialVariable { original, .. }
            | Segment::SingleWildcard { original, .. }
            | Segment::MultiWildcard { original, .. } => original,
        }
    }

    /// The literal text of a static segment.
    #[must_use]
    pub fn literal_text(&self) -> Option<&str> {
        match self {
            Segment::Static { original } => Some(original),
            _ => None,
        }
    }

    /// Name a captured value is stored under (`*`/`**` for anonymous wildcards).
    #[must_use]
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            Segment::Variable { name, .. }
            | Segment::SingleWildcard { name, .. }
            | Segment::MultiWildcard { name, .. } => Some(name),
            _ => None,
        }
    }

    /// True if this segment can absorb a variable number of URL components.
    #[must_use]
    pub fn is_variable_length(&self) -> bool {
        match self {
            Segment::MultiWildcard { .. } => true,
            Segment::Variable { multi, .. } | Segment::PartialVariable { multi, .. } => *multi,
            _ => false,
        }
    }
}

/// Opaque identifier of the handler a route dispatches to.
///
/// Typically `controller::action`; the engine only carries it through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerRef(Arc<str>);

impl HandlerRef {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HandlerRef {
    fn from(s: &str) -> Self {
        HandlerRef(Arc::from(s))
    }
}

impl From<String> for HandlerRef {
    fn from(s: String) -> Self {
        HandlerRef(Arc::from(s))
    }
}

impl fmt::Display for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Logical identity of a route: handler, declared methods and path
/// template. Used for O(1) intersection and deduplication while filtering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    pub handler: HandlerRef,
    pub methods: SmallVec<[Method; 2]>,
    pub path: Arc<str>,
}

/// One registered endpoint.
#[derive(Debug, Clone)]
pub struct Route {
    /// Canonical path template (e.g. `/user/{id}`)
    pub path: Arc<str>,
    /// HTTP methods this route accepts (non-empty)
    pub methods: SmallVec<[Method; 2]>,
    /// Compiled pattern, one segment per path component
    pub pattern: Vec<Segment>,
    /// Higher value wins when several routes match the same request
    pub priority: i32,
    /// Target handler, owned by the dispatch layer
    pub handler: HandlerRef,
}

impl Route {
    /// Assemble a route from a pattern produced by an external compiler.
    ///
    /// Nothing is validated here; the producer owns pattern correctness.
    pub fn new<M, H>(path: &str, methods: M, pattern: Vec<Segment>, handler: H) -> Self
    where
        M: IntoIterator<Item = Method>,
        H: Into<HandlerRef>,
    {
        Self {
            path: Arc::from(path),
            methods: methods.into_iter().collect(),
            pattern,
            priority: 0,
            handler: handler.into(),
        }
    }

    /// Compile `path` with the bundled route compiler.
    ///
    /// # Example
    ///
    /// ```rust
    /// use http::Method;
    /// use route_index::route::Route;
    ///
    /// let route = Route::compile("/user/{id}", [Method::GET], "users::show").unwrap();
    /// assert_eq!(route.pattern.len(), 2);
    /// ```
    pub fn compile<M, H>(path: &str, methods: M, handler: H) -> Result<Self, RouteError>
    where
        M: IntoIterator<Item = Method>,
        H: Into<HandlerRef>,
    {
        let methods: SmallVec<[Method; 2]> = methods.into_iter().collect();
        if methods.is_empty() {
            return Err(RouteError::NoMethods {
                path: path.to_string(),
            });
        }
        let pattern = compile_path(path)?;
        Ok(Self {
            path: Arc::from(path),
            methods,
            pattern,
            priority: 0,
            handler: handler.into(),
        })
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn key(&self) -> RouteKey {
        RouteKey {
            handler: self.handler.clone(),
            methods: self.methods.clone(),
            path: Arc::clone(&self.path),
        }
    }

    #[must_use]
    pub fn accepts(&self, method: &Method) -> bool {
        self.methods.iter().any(|m| m == method)
    }

    #[must_use]
    pub fn is_fully_static(&self) -> bool {
        self.pattern.iter().all(|s| s.kind() == SegmentKind::Static)
    }

    #[must_use]
    pub fn has_variable_length_segment(&self) -> bool {
        self.pattern.iter().any(Segment::is_variable_length)
    }
}
