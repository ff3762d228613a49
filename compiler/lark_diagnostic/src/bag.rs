//! The diagnostic accumulator for one compilation run.
//!
//! A bag is the only mutable collection in the pipeline. It is created
//! fresh per compilation, accumulates and never removes entries, and must
//! not be shared across concurrent runs.

use crate::{Diagnostic, Severity};

/// Collects every diagnostic produced by one compilation run.
#[derive(Debug, Default)]
pub struct DiagnosticBag {
    diags: Vec<Diagnostic>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        DiagnosticBag { diags: Vec::new() }
    }

    /// Record a diagnostic.
    pub fn push(&mut self, diag: Diagnostic) {
        self.diags.push(diag);
    }

    pub fn is_empty(&self) -> bool {
        self.diags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diags.len()
    }

    /// True if any error-severity diagnostic has been recorded.
    pub fn has_errors(&self) -> bool {
        self.diags.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diags.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diags
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diags.iter()
    }

    /// Consume the bag, returning diagnostics sorted by primary span then
    /// by code. Entries without a span sort first, preserving insertion
    /// order among themselves (the sort is stable).
    pub fn into_sorted(mut self) -> Vec<Diagnostic> {
        self.diags
            .sort_by_key(|d| (d.primary_span().map(|s| (s.file, s.start)), d.code.as_str()));
        self.diags
    }
}

impl Extend<Diagnostic> for DiagnosticBag {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        self.diags.extend(iter);
    }
}

#[cfg(test)]
mod tests;
