//! Sheet-name resolution: exact, normalized-unique, ambiguous, fuzzy.

use serde::Serialize;
use strsim::jaro_winkler;

/// Minimum similarity for a name to appear among fuzzy suggestions.
const SUGGESTION_CUTOFF: f64 = 0.6;

/// How many fuzzy suggestions to offer.
const MAX_SUGGESTIONS: usize = 3;

/// How a requested sheet name was (or was not) resolved.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionKind {
    /// Exact string match.
    Exact,
    /// Unique match after trimming and case-folding.
    Normalized,
    /// Several sheet names collide under normalization.
    Ambiguous,
    /// No exact or normalized match.
    NotFound,
}

/// Outcome of resolving a requested sheet name against the available names.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SheetResolution {
    pub requested: String,
    pub kind: ResolutionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<String>,
    /// All colliding names when the request was ambiguous.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<String>,
    /// Closest available names when nothing matched.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl SheetResolution {
    /// True when the request resolved without any normalization or guessing.
    pub fn is_exact(&self) -> bool {
        self.kind == ResolutionKind::Exact
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Resolve `requested` against `available` sheet names.
///
/// The selection policy, in order: exact match; unique normalized (trim +
/// case-fold) match; ambiguous when several available names share the
/// requested normalized key (all colliding names returned as candidates);
/// otherwise unresolved, with up to three fuzzy suggestions for caller
/// guidance.
pub fn resolve_sheet_name(available: &[String], requested: &str) -> SheetResolution {
    if available.iter().any(|name| name == requested) {
        return SheetResolution {
            requested: requested.to_string(),
            kind: ResolutionKind::Exact,
            resolved: Some(requested.to_string()),
            candidates: Vec::new(),
            suggestions: Vec::new(),
        };
    }

    let requested_key = normalize(requested);
    let colliding: Vec<&String> = available
        .iter()
        .filter(|name| normalize(name) == requested_key)
        .collect();

    match colliding.len() {
        1 => SheetResolution {
            requested: requested.to_string(),
            kind: ResolutionKind::Normalized,
            resolved: Some(colliding[0].clone()),
            candidates: Vec::new(),
            suggestions: Vec::new(),
        },
        n if n > 1 => SheetResolution {
            requested: requested.to_string(),
            kind: ResolutionKind::Ambiguous,
            resolved: None,
            candidates: colliding.into_iter().cloned().collect(),
            suggestions: Vec::new(),
        },
        _ => SheetResolution {
            requested: requested.to_string(),
            kind: ResolutionKind::NotFound,
            resolved: None,
            candidates: Vec::new(),
            suggestions: suggest(available, &requested_key),
        },
    }
}

fn suggest(available: &[String], requested_key: &str) -> Vec<String> {
    let mut scored: Vec<(f64, &String)> = available
        .iter()
        .map(|name| (jaro_winkler(&normalize(name), requested_key), name))
        .filter(|(score, _)| *score >= SUGGESTION_CUTOFF)
        .collect();
    // Stable sort keeps tab order for equally-similar names.
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, name)| name.clone())
        .collect()
}
