//! Scored overload resolution.
//!
//! Each argument is scored against its parameter: an exact type match
//! scores 2, an implicit widening (conversion op or reference upcast)
//! scores 1, a parameter of the universal top type scores 0, and
//! anything else disqualifies the candidate. The candidate with the
//! highest total wins; a tie between distinct candidates is reported as
//! ambiguous rather than guessed at.

use crate::catalog::{Catalog, TOP_TYPE};
use crate::types::{ExternSignature, ImplicitConversion};

/// Per-argument score for an exact type match.
const SCORE_EXACT: u32 = 2;
/// Per-argument score for an implicit widening.
const SCORE_WIDEN: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No overload of the name exists at all.
    UnknownMember { owner: String, member: String },
    /// Overloads exist but none accepts these argument types. Carries
    /// the display strings of every candidate for the diagnostic.
    NoMatch { candidates: Vec<String> },
    /// Two or more candidates tied for the best score.
    Ambiguous { candidates: Vec<String> },
}

/// A winning overload plus the conversions each argument needs.
/// `conversions[i]` is `None` when argument `i` is passed as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOverload {
    pub sig: ExternSignature,
    pub conversions: Vec<Option<ImplicitConversion>>,
    pub score: u32,
}

/// Score one argument type against one parameter type.
pub fn score_argument<C: Catalog + ?Sized>(
    catalog: &C,
    arg: &str,
    param: &str,
) -> Option<(u32, Option<ImplicitConversion>)> {
    if arg == param {
        return Some((SCORE_EXACT, None));
    }
    if let Some(conv) = catalog.implicit_conversion(arg, param) {
        return Some((SCORE_WIDEN, Some(conv)));
    }
    if param == TOP_TYPE {
        // Boxing or a trivial upcast; weakest acceptable match.
        return Some((0, None));
    }
    if catalog.derives_from(arg, param) {
        return Some((SCORE_WIDEN, None));
    }
    None
}

/// Would a value of type `from` be accepted where `to` is expected,
/// without an explicit cast?
pub fn assignable<C: Catalog + ?Sized>(catalog: &C, from: &str, to: &str) -> bool {
    score_argument(catalog, from, to).is_some()
}

/// Pick the best candidate for the argument types, or explain why none
/// can be picked.
pub fn resolve_overload<C: Catalog + ?Sized>(
    catalog: &C,
    candidates: &[ExternSignature],
    args: &[&str],
) -> Result<ResolvedOverload, ResolveError> {
    let perfect = SCORE_EXACT * args.len() as u32;
    let mut best: Option<ResolvedOverload> = None;
    let mut tied: Vec<String> = Vec::new();

    for sig in candidates {
        if sig.arity() != args.len() {
            continue;
        }
        let mut total = 0u32;
        let mut conversions = Vec::with_capacity(args.len());
        let mut viable = true;
        for (arg, param) in args.iter().zip(&sig.params) {
            match score_argument(catalog, arg, param) {
                Some((score, conv)) => {
                    total += score;
                    conversions.push(conv);
                }
                None => {
                    viable = false;
                    break;
                }
            }
        }
        if !viable {
            continue;
        }

        let resolved = ResolvedOverload {
            sig: sig.clone(),
            conversions,
            score: total,
        };
        if total == perfect {
            // Nothing can beat an all-exact match.
            return Ok(resolved);
        }
        match &best {
            Some(current) if total < current.score => {}
            Some(current) if total == current.score => {
                if tied.is_empty() {
                    tied.push(current.sig.display());
                }
                tied.push(resolved.sig.display());
            }
            _ => {
                best = Some(resolved);
                tied.clear();
            }
        }
    }

    if !tied.is_empty() {
        return Err(ResolveError::Ambiguous { candidates: tied });
    }
    best.ok_or_else(|| ResolveError::NoMatch {
        candidates: candidates.iter().map(ExternSignature::display).collect(),
    })
}

#[cfg(test)]
mod tests;
