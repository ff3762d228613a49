//! Call-cycle detection.
//!
//! The target VM has no call stack: a function's return address lives
//! in a single dedicated heap slot, so re-entering a function before it
//! returns would overwrite that slot. Any cycle in the user-function
//! call graph is therefore rejected outright, with the full chain in
//! the diagnostic.

use lark_diagnostic::{Diagnostic, DiagnosticBag, ErrorCode};
use lark_ir::Span;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::analysis::Analysis;
use crate::symbols::SymbolId;

#[derive(Copy, Clone, PartialEq, Eq)]
enum State {
    Unvisited,
    OnStack,
    Done,
}

pub(crate) fn check_cycles(analysis: &Analysis, bag: &mut DiagnosticBag) {
    let mut graph: FxHashMap<SymbolId, Vec<(SymbolId, Span)>> = FxHashMap::default();
    for edge in &analysis.call_edges {
        graph.entry(edge.caller).or_default().push((edge.callee, edge.span));
    }

    let mut states: FxHashMap<SymbolId, State> = FxHashMap::default();
    let mut reported: FxHashSet<SymbolId> = FxHashSet::default();

    let mut roots: Vec<SymbolId> = graph.keys().copied().collect();
    roots.sort();
    for root in roots {
        if states.get(&root).copied().unwrap_or(State::Unvisited) == State::Unvisited {
            let mut path = Vec::new();
            visit(root, &graph, &mut states, &mut path, &mut reported, analysis, bag);
        }
    }
}

fn visit(
    node: SymbolId,
    graph: &FxHashMap<SymbolId, Vec<(SymbolId, Span)>>,
    states: &mut FxHashMap<SymbolId, State>,
    path: &mut Vec<SymbolId>,
    reported: &mut FxHashSet<SymbolId>,
    analysis: &Analysis,
    bag: &mut DiagnosticBag,
) {
    states.insert(node, State::OnStack);
    path.push(node);

    for &(callee, span) in graph.get(&node).map(Vec::as_slice).unwrap_or_default() {
        match states.get(&callee).copied().unwrap_or(State::Unvisited) {
            State::Unvisited => visit(callee, graph, states, path, reported, analysis, bag),
            State::OnStack => {
                report_cycle(callee, span, path, reported, analysis, bag);
            }
            State::Done => {}
        }
    }

    path.pop();
    states.insert(node, State::Done);
}

fn report_cycle(
    entry: SymbolId,
    span: Span,
    path: &[SymbolId],
    reported: &mut FxHashSet<SymbolId>,
    analysis: &Analysis,
    bag: &mut DiagnosticBag,
) {
    let Some(start) = path.iter().position(|&id| id == entry) else {
        return;
    };
    let cycle = &path[start..];
    if cycle.iter().any(|id| reported.contains(id)) {
        return;
    }
    reported.extend(cycle.iter().copied());

    let mut chain = String::new();
    for &id in cycle {
        chain.push_str(&format!("`{}` calls ", analysis.symbols.get(id).name));
    }
    chain.push_str(&format!("`{}`", analysis.symbols.get(entry).name));

    bag.push(
        Diagnostic::error(ErrorCode::E4001)
            .with_message(format!("recursive call cycle: {chain}"))
            .with_label(span, "this call closes the cycle")
            .with_note(
                "the target has no call stack; each function holds one return address",
            ),
    );
}
