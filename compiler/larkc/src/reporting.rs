//! Terminal rendering of diagnostics.
//!
//! The core emits structured records only; turning them into annotated
//! source excerpts is the driver's job. The format follows the familiar
//! rustc shape: a severity header, a `-->` location line, the offending
//! source line with carets, then notes and help lines.

use lark_diagnostic::{Diagnostic, Label};

/// Render one diagnostic against its source text.
pub fn render(diag: &Diagnostic, file_name: &str, source: &str) -> String {
    let mut out = format!("{}[{}]: {}\n", diag.severity, diag.code, diag.message);

    for label in &diag.labels {
        render_label(&mut out, label, file_name, source);
    }
    for note in &diag.notes {
        out.push_str(&format!("  = note: {note}\n"));
    }
    for suggestion in &diag.suggestions {
        out.push_str(&format!("  = help: {suggestion}\n"));
    }
    out
}

/// Render a whole run's diagnostics, blank-line separated.
pub fn render_all(diags: &[Diagnostic], file_name: &str, source: &str) -> String {
    let mut out = String::new();
    for (i, diag) in diags.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&render(diag, file_name, source));
    }
    out
}

fn render_label(out: &mut String, label: &Label, file_name: &str, source: &str) {
    let line_no = label.span.start.line;
    let col = label.span.start.col;
    let gutter = line_no.to_string().len().max(2);

    let arrow = if label.is_primary { "-->" } else { "---" };
    out.push_str(&format!(
        "{:gutter$}{arrow} {file_name}:{line_no}:{col}\n",
        ""
    ));

    let Some(text) = source.lines().nth(line_no as usize - 1) else {
        return;
    };
    out.push_str(&format!("{:gutter$} |\n", ""));
    out.push_str(&format!("{line_no:gutter$} | {text}\n"));

    let width = if label.span.end.line == line_no {
        (label.span.end.col.saturating_sub(col)).max(1) as usize
    } else {
        (text.chars().count() as u32).saturating_sub(col - 1).max(1) as usize
    };
    let marker = if label.is_primary { "^" } else { "-" };
    out.push_str(&format!(
        "{:gutter$} | {:pad$}{} {}\n",
        "",
        "",
        marker.repeat(width),
        label.message,
        pad = col as usize - 1,
    ));
}

#[cfg(test)]
mod tests;
