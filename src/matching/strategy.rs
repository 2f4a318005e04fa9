//! Per-segment matching strategies.
//!
//! One strategy per [`Segment`] variant, selected by an exhaustive match in
//! [`match_segment`]. Each strategy consumes the URL component(s) it matches
//! from the [`MatchingContext`], records captures, and reports a
//! [`MatchResult`]. The driver advances the route position.

use regex::Regex;
use std::sync::Arc;
use tracing::debug;

use super::context::MatchingContext;
use crate::route::Segment;

/// Outcome of matching one route segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// Terminal failure for this candidate
    NoMatch,
    /// Segment matched; continue with the next one
    ContinueMatching,
    /// Segment consumed the rest of the URL; terminal success
    CompleteMatch,
}

/// Match one route segment against the context's current position.
pub fn match_segment(segment: &Segment, ctx: &mut MatchingContext<'_>) -> MatchResult {
    match segment {
        Segment::Static { original } => match_static(original, ctx),
        Segment::Variable {
            name,
            pattern,
            multi,
            ..
        } => match_variable(name, pattern.as_ref(), *multi, ctx),
        Segment::PartialVariable {
            original,
            regex,
            names,
            multi,
        } => match_partial(original, regex, names, *multi, ctx),
        Segment::SingleWildcard { name, .. } => match_single_wildcard(name, ctx),
        Segment::MultiWildcard { name, .. } => match_multi_wildcard(name, ctx),
    }
}

fn match_static(literal: &str, ctx: &mut MatchingContext<'_>) -> MatchResult {
    match ctx.current() {
        Some(component) if component == literal => {
            ctx.consume(1);
            MatchResult::ContinueMatching
        }
        _ => MatchResult::NoMatch,
    }
}

fn match_variable(
    name: &Arc<str>,
    pattern: Option<&Regex>,
    multi: bool,
    ctx: &mut MatchingContext<'_>,
) -> MatchResult {
    if multi {
        let rest = ctx.remaining_url();
        let value = rest.join("/");
        ctx.consume(rest.len());
        ctx.capture(name, value);
        return MatchResult::CompleteMatch;
    }

    let Some(component) = ctx.current() else {
        return MatchResult::NoMatch;
    };
    if let Some(re) = pattern {
        if !fully_matches(re, component) {
            return MatchResult::NoMatch;
        }
    }
    ctx.capture(name, component.to_string());
    ctx.consume(1);
    MatchResult::ContinueMatching
}

fn match_partial(
    original: &str,
    regex: &Regex,
    names: &[Arc<str>],
    multi: bool,
    ctx: &mut MatchingContext<'_>,
) -> MatchResult {
    let rest = ctx.remaining_url();
    let (value, consumed) = if multi {
        (rest.join("/"), rest.len())
    } else {
        match ctx.current() {
            Some(component) => (component.to_string(), 1),
            None => return MatchResult::NoMatch,
        }
    };
    if consumed == 0 {
        return MatchResult::NoMatch;
    }

    let Some(caps) = regex.captures(&value) else {
        return MatchResult::NoMatch;
    };
    let spans_value = caps
        .get(0)
        .is_some_and(|m| m.start() == 0 && m.end() == value.len());
    if !spans_value {
        debug!(
            segment = %original,
            value = %value,
            "Partial segment regex matched only part of the component"
        );
        return MatchResult::NoMatch;
    }

    for name in names {
        if let Some(m) = caps.name(name) {
            ctx.capture(name, m.as_str().to_string());
        }
    }
    ctx.consume(consumed);

    if multi {
        MatchResult::CompleteMatch
    } else {
        MatchResult::ContinueMatching
    }
}

fn match_single_wildcard(name: &Arc<str>, ctx: &mut MatchingContext<'_>) -> MatchResult {
    let Some(component) = ctx.current() else {
        return MatchResult::NoMatch;
    };
    ctx.capture(name, component.to_string());
    ctx.consume(1);
    MatchResult::ContinueMatching
}

fn match_multi_wildcard(name: &Arc<str>, ctx: &mut MatchingContext<'_>) -> MatchResult {
    let rest = ctx.remaining_url();
    let reserved = ctx.remaining_route_after_current();
    if rest.len() < reserved {
        return MatchResult::NoMatch;
    }

    let take = rest.len() - reserved;
    let value = rest[..take].join("/");
    ctx.consume(take);
    // `**` lands in the anonymous array, named wildcards in the variables
    ctx.capture(name, value);
    MatchResult::ContinueMatching
}

/// Whole-value regex check that also holds for unanchored constraints.
fn fully_matches(re: &Regex, value: &str) -> bool {
    re.find(value)
        .is_some_and(|m| m.start() == 0 && m.end() == value.len())
}
