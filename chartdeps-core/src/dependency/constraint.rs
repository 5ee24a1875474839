// chartdeps-core/src/dependency/constraint.rs
//! Chart version constraints.
//!
//! Charts use a range dialect that differs from Cargo's in a few places:
//! AND-clauses may be separated by spaces (`>=1.0.0 <2.0.0`), alternatives by
//! `||`, `a - b` is an inclusive range, `x`/`X`/`*` are wildcards, a leading
//! `v` is allowed, `!=` excludes a version and a bare full version means
//! exactly that version. Each alternative is rewritten into
//! `semver::VersionReq` syntax, with `!=` kept as separate exclusions.

use std::fmt;

use semver::{Version, VersionReq};
use thiserror::Error;

const OPERATOR_CHARS: &[char] = &['=', '<', '>', '~', '^', '!'];

#[derive(Error, Debug)]
pub enum ConstraintError {
    #[error("empty alternative in constraint '{0}'")]
    EmptyAlternative(String),

    #[error("invalid constraint '{constraint}': {source}")]
    Invalid {
        constraint: String,
        #[source]
        source: semver::Error,
    },
}

/// One `||` branch: every comparator in `req` must hold and no `!=`
/// exclusion may match.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Alternative {
    req: VersionReq,
    excluded: Vec<VersionReq>,
}

impl Alternative {
    fn matches(&self, version: &Version) -> bool {
        self.req.matches(version) && !self.excluded.iter().any(|ex| ex.matches(version))
    }
}

/// A parsed constraint: satisfied when any alternative matches. No
/// alternatives means any version, pre-releases included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConstraint {
    raw: String,
    alternatives: Vec<Alternative>,
}

impl VersionConstraint {
    /// An empty or blank constraint matches every version.
    pub fn parse(input: &str) -> Result<Self, ConstraintError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Self {
                raw: input.to_string(),
                alternatives: Vec::new(),
            });
        }

        let invalid = |source: semver::Error| ConstraintError::Invalid {
            constraint: input.to_string(),
            source,
        };
        let mut alternatives = Vec::new();
        for alternative in trimmed.split("||") {
            let alternative = alternative.trim();
            if alternative.is_empty() {
                return Err(ConstraintError::EmptyAlternative(input.to_string()));
            }
            let (required, excluded) = translate_alternative(alternative);
            let req = if required.is_empty() {
                VersionReq::STAR
            } else {
                VersionReq::parse(&required.join(", ")).map_err(invalid)?
            };
            let excluded = excluded
                .iter()
                .map(|ex| VersionReq::parse(ex).map_err(invalid))
                .collect::<Result<Vec<_>, _>>()?;
            alternatives.push(Alternative { req, excluded });
        }
        Ok(Self {
            raw: input.to_string(),
            alternatives,
        })
    }

    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives.is_empty() || self.alternatives.iter().any(|alt| alt.matches(version))
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Splits one alternative into required comparators and `!=` exclusions,
/// both in `VersionReq` syntax.
fn translate_alternative(alternative: &str) -> (Vec<String>, Vec<String>) {
    if let Some((low, high)) = alternative.split_once(" - ") {
        return (
            vec![comparator(">=", low.trim()), comparator("<=", high.trim())],
            Vec::new(),
        );
    }

    let mut required = Vec::new();
    let mut excluded = Vec::new();
    let mut pending_op: Option<&str> = None;
    for token in alternative
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        if token.chars().all(|c| OPERATOR_CHARS.contains(&c)) {
            // `>= 1.0.0`: the operator is its own token.
            pending_op = Some(normalize_operator(token));
            continue;
        }
        let (op, version) = match pending_op.take() {
            Some(op) => (op, token),
            None => split_operator(token),
        };
        if op == "!=" {
            excluded.push(comparator("=", version));
        } else {
            required.push(comparator(op, version));
        }
    }
    if let Some(op) = pending_op {
        // Dangling operator; let VersionReq reject it.
        required.push(op.to_string());
    }
    (required, excluded)
}

fn normalize_operator(op: &str) -> &str {
    match op {
        "=>" => ">=",
        "=<" => "<=",
        other => other,
    }
}

fn split_operator(token: &str) -> (&str, &str) {
    let split_at = token
        .find(|c: char| !OPERATOR_CHARS.contains(&c))
        .unwrap_or(token.len());
    let (op, version) = token.split_at(split_at);
    (normalize_operator(op), version)
}

fn comparator(op: &str, version: &str) -> String {
    let version = version
        .strip_prefix('v')
        .or_else(|| version.strip_prefix('V'))
        .unwrap_or(version);

    let core = version.split(['-', '+']).next().unwrap_or(version);
    let mut parts = Vec::new();
    let mut wildcard = false;
    for part in core.split('.') {
        if matches!(part, "x" | "X" | "*") {
            wildcard = true;
            break;
        }
        parts.push(part);
    }

    if wildcard {
        return match (op, parts.is_empty()) {
            (_, true) => "*".to_string(),
            ("" | "=", false) => format!("{}.*", parts.join(".")),
            (_, false) => format!("{op}{}", parts.join(".")),
        };
    }

    match op {
        // A bare full version pins exactly; a bare partial one behaves like `~`.
        "" if parts.len() >= 3 => format!("={version}"),
        "" => format!("~{version}"),
        _ => format!("{op}{version}"),
    }
}
