//! The Lark compiler driver.
//!
//! Wires the pipeline crates into one `compile` call: lex, parse,
//! analyze, and, only when no error was recorded, lower and emit.
//! Diagnostics always come back sorted; assembly only on success.
//! Independent files compile in parallel over one shared catalog.

use std::sync::Once;

use lark_catalog::Catalog;
use lark_diagnostic::{Diagnostic, DiagnosticBag};
use lark_ir::FileId;
use rayon::prelude::*;

pub mod reporting;

#[cfg(test)]
mod tests;

/// The result of compiling one source file.
#[derive(Debug)]
pub struct CompileOutput {
    /// Emitted assembly text; `None` when any error was reported.
    pub assembly: Option<String>,
    /// Every diagnostic from the run, sorted by location then code.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileOutput {
    pub fn succeeded(&self) -> bool {
        self.assembly.is_some()
    }
}

/// Compile one source file against a catalog.
///
/// Never panics on malformed input: every failure mode comes back as a
/// diagnostic. Warnings do not block emission.
pub fn compile(source: &str, file: FileId, catalog: &dyn Catalog) -> CompileOutput {
    let mut bag = DiagnosticBag::new();
    let tokens = lark_lexer::lex(source, file, &mut bag);
    let module = lark_parse::parse(&tokens, file, &mut bag);
    let analysis = lark_analyze::analyze(&module, catalog, &mut bag);

    // Any error stops the pipeline here; partially typed IR is never
    // lowered or emitted.
    if bag.has_errors() {
        tracing::debug!(errors = bag.error_count(), "stopping before lowering");
        return CompileOutput {
            assembly: None,
            diagnostics: bag.into_sorted(),
        };
    }

    let ir = lark_lower::lower(&module, &analysis);
    let assembly = lark_emit::emit(&ir);
    CompileOutput {
        assembly: Some(assembly),
        diagnostics: bag.into_sorted(),
    }
}

/// Compile many independent sources in parallel.
///
/// The catalog is built once and shared read-only; all mutable state is
/// per-file. Output order matches input order, and each source keeps
/// the file id given by its position.
pub fn compile_files(sources: &[&str], catalog: &(dyn Catalog + Sync)) -> Vec<CompileOutput> {
    sources
        .par_iter()
        .enumerate()
        .map(|(i, source)| compile(source, FileId(i as u32), catalog))
        .collect()
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing output for the CLI.
///
/// Safe to call multiple times; does nothing unless `RUST_LOG` is set,
/// e.g. `RUST_LOG=lark_analyze=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
