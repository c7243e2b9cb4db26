//! Type-resolution merger.
//!
//! A [`TypeResolution`] reconciles several declaration headers that describe
//! the same thing (for example `type Mutation` and
//! `type Mutation @aws_cognito_user_pools`) into a single declaration.
//!
//! # Example
//!
//! ```
//! use schemax_compiler::resolution::TypeResolution;
//!
//! let rule = TypeResolution::pattern(r"^type Mutation(\s|$)").unwrap().keep_shortest();
//! assert!(rule.matches("type Mutation @aws_auth"));
//! assert!(!rule.matches("type MutationResult"));
//! ```

use std::fmt;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use schemax_foundation::{Error, ErrorKind, Result};

use crate::registry::{Registry, merge_bodies};

/// How a rule recognises the headers it applies to.
#[derive(Clone, Debug)]
pub enum HeaderMatcher {
    /// Equality with the trimmed header.
    Exact(String),
    /// Pattern test against the trimmed header.
    Pattern(Regex),
}

impl HeaderMatcher {
    /// Tests a header.
    #[must_use]
    pub fn matches(&self, header: &str) -> bool {
        let header = header.trim();
        match self {
            Self::Exact(def) => def.trim() == header,
            Self::Pattern(pattern) => pattern.is_match(header),
        }
    }
}

/// How the surviving ("master") header is chosen among matched headers.
pub enum HeaderPolicy {
    /// The longest header; the first one wins ties.
    KeepLongest,
    /// The shortest header; the first one wins ties.
    KeepShortest,
    /// A fixed replacement header.
    Rename(String),
    /// A caller-supplied fold over the matched headers.
    Reduce(Reducer),
}

impl HeaderPolicy {
    /// Picks the master header for `headers`, given in encounter order.
    #[must_use]
    pub fn select(&self, headers: &[&str]) -> String {
        match self {
            Self::KeepLongest => pick_by_length(headers, |candidate, best| candidate > best),
            Self::KeepShortest => pick_by_length(headers, |candidate, best| candidate < best),
            Self::Rename(to) => to.clone(),
            Self::Reduce(reducer) => reducer.fold(headers),
        }
    }
}

impl fmt::Debug for HeaderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeepLongest => f.write_str("KeepLongest"),
            Self::KeepShortest => f.write_str("KeepShortest"),
            Self::Rename(to) => f.debug_tuple("Rename").field(to).finish(),
            Self::Reduce(_) => f.write_str("Reduce(..)"),
        }
    }
}

fn pick_by_length(headers: &[&str], better: impl Fn(usize, usize) -> bool) -> String {
    let mut best: Option<&str> = None;
    for &header in headers {
        let replace = best.is_none_or(|b| better(header.chars().count(), b.chars().count()));
        if replace {
            best = Some(header);
        }
    }
    best.unwrap_or_default().to_string()
}

type FoldFn = dyn Fn(&[&str]) -> String + Send + Sync;

/// A fold over matched headers with explicit per-application state.
///
/// Each step receives the current master header, the next matched header and
/// the state, and returns the new master. State starts at `S::default()` every
/// time the rule is applied; the master starts as the first matched header.
pub struct Reducer {
    fold: Box<FoldFn>,
}

impl Reducer {
    /// Wraps a step function.
    pub fn new<S, F>(step: F) -> Self
    where
        S: Default + 'static,
        F: Fn(&str, &str, &mut S) -> String + Send + Sync + 'static,
    {
        Self {
            fold: Box::new(move |headers: &[&str]| {
                let mut state = S::default();
                let mut master = headers.first().map(|h| (*h).to_string()).unwrap_or_default();
                for next in headers {
                    master = step(&master, next, &mut state);
                }
                master
            }),
        }
    }

    /// Runs the fold over `headers`.
    #[must_use]
    pub fn fold(&self, headers: &[&str]) -> String {
        (self.fold)(headers)
    }
}

/// A caller-declared rule merging several headers into one declaration.
#[derive(Debug)]
pub struct TypeResolution {
    /// Which headers the rule applies to.
    pub matcher: HeaderMatcher,
    /// How the surviving header is chosen.
    pub policy: HeaderPolicy,
}

impl TypeResolution {
    /// A rule matching one exact header, keeping the longest by default.
    #[must_use]
    pub fn exact(def: impl Into<String>) -> Self {
        Self {
            matcher: HeaderMatcher::Exact(def.into()),
            policy: HeaderPolicy::KeepLongest,
        }
    }

    /// A rule matching headers against a regular expression.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidPattern`] if the pattern does not compile.
    pub fn pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| {
            Error::new(ErrorKind::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
        })?;
        Ok(Self::matching(regex))
    }

    /// A rule matching headers against a compiled regular expression.
    #[must_use]
    pub fn matching(regex: Regex) -> Self {
        Self {
            matcher: HeaderMatcher::Pattern(regex),
            policy: HeaderPolicy::KeepLongest,
        }
    }

    /// Keeps the longest matched header.
    #[must_use]
    pub fn keep_longest(mut self) -> Self {
        self.policy = HeaderPolicy::KeepLongest;
        self
    }

    /// Keeps the shortest matched header.
    #[must_use]
    pub fn keep_shortest(mut self) -> Self {
        self.policy = HeaderPolicy::KeepShortest;
        self
    }

    /// Replaces the matched headers with `to`.
    #[must_use]
    pub fn rename_to(mut self, to: impl Into<String>) -> Self {
        self.policy = HeaderPolicy::Rename(to.into());
        self
    }

    /// Folds the matched headers with `step`. See [`Reducer`].
    #[must_use]
    pub fn reduce_with<S, F>(mut self, step: F) -> Self
    where
        S: Default + 'static,
        F: Fn(&str, &str, &mut S) -> String + Send + Sync + 'static,
    {
        self.policy = HeaderPolicy::Reduce(Reducer::new(step));
        self
    }

    /// Tests a header against this rule.
    #[must_use]
    pub fn matches(&self, header: &str) -> bool {
        self.matcher.matches(header)
    }
}

/// Serialized form of a rule, as found in a JSON schema document.
///
/// When several policy flags are set, `keepShortest` beats `to`, which beats
/// `keepLongest`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionSpec {
    /// Exact header, or a regular expression when `pattern` is set.
    pub def: String,
    /// Treat `def` as a regular expression.
    #[serde(default)]
    pub pattern: bool,
    /// Replacement header.
    #[serde(default)]
    pub to: Option<String>,
    /// Keep the longest header (the default).
    #[serde(default)]
    pub keep_longest: bool,
    /// Keep the shortest header.
    #[serde(default)]
    pub keep_shortest: bool,
}

impl TryFrom<ResolutionSpec> for TypeResolution {
    type Error = Error;

    fn try_from(spec: ResolutionSpec) -> Result<Self> {
        let rule = if spec.pattern {
            Self::pattern(&spec.def)?
        } else {
            Self::exact(spec.def)
        };
        Ok(match (spec.keep_shortest, spec.to) {
            (true, _) => rule.keep_shortest(),
            (false, Some(to)) => rule.rename_to(to),
            (false, None) => rule.keep_longest(),
        })
    }
}

/// Applies `rules` to a registry.
///
/// Every header belongs to the first rule it matches. The headers of one rule
/// collapse into a single entry at the position of the first of them, with the
/// master header chosen by the rule's policy and the bodies merged left to
/// right.
///
/// # Errors
///
/// Returns [`ErrorKind::IncompatibleMerge`] if merged bodies cannot be combined.
pub fn resolve(registry: Registry, rules: &[TypeResolution]) -> Result<Registry> {
    if rules.is_empty() {
        return Ok(registry);
    }

    let (headers, mut bodies): (Vec<String>, Vec<Option<Value>>) = registry.into_entries().unzip();
    let assignments: Vec<Option<usize>> = headers
        .iter()
        .map(|header| rules.iter().position(|rule| rule.matches(header)))
        .collect();

    let mut groups: Vec<Vec<usize>> = vec![Vec::new(); rules.len()];
    for (index, assignment) in assignments.iter().enumerate() {
        if let Some(rule) = assignment {
            groups[*rule].push(index);
        }
    }

    let mut merged: Vec<Option<(String, Option<Value>)>> = (0..rules.len()).map(|_| None).collect();
    for (rule, members) in groups.iter().enumerate() {
        if members.is_empty() {
            continue;
        }
        let matched: Vec<&str> = members.iter().map(|&i| headers[i].as_str()).collect();
        let master = rules[rule].policy.select(&matched);
        debug!(rule, matched = ?matched, master = %master, "applying type resolution");

        let mut body: Option<Value> = None;
        for &index in members {
            if let Some(next) = bodies[index].take() {
                body = Some(match body {
                    None => next,
                    Some(acc) => merge_bodies(&master, acc, next)?,
                });
            }
        }
        merged[rule] = Some((master, body));
    }

    let mut resolved = Registry::new();
    for (index, header) in headers.into_iter().enumerate() {
        match assignments[index] {
            None => resolved.register(header, bodies[index].take())?,
            Some(rule) if groups[rule].first() == Some(&index) => {
                if let Some((master, body)) = merged[rule].take() {
                    resolved.register(master, body)?;
                }
            }
            Some(_) => {}
        }
    }

    Ok(resolved)
}
