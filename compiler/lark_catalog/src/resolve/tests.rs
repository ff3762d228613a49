use pretty_assertions::assert_eq;

use crate::builtin::BuiltinCatalog;
use crate::catalog::Catalog;
use crate::id::extern_id;
use crate::types::{ExternKind, ExternSignature};

use super::{assignable, resolve_overload, ResolveError};

fn cat() -> BuiltinCatalog {
    BuiltinCatalog::new()
}

fn sig(owner: &str, member: &str, params: &[&str], ret: &str) -> ExternSignature {
    ExternSignature {
        id: extern_id(owner, member, params, ret),
        owner: owner.to_owned(),
        member: member.to_owned(),
        params: params.iter().map(|p| (*p).to_owned()).collect(),
        param_names: Vec::new(),
        ret: ret.to_owned(),
        instance: false,
        kind: ExternKind::Method,
    }
}

#[test]
fn exact_overload_beats_widening() {
    let catalog = cat();
    // Mathf.Abs has int and float overloads.
    let resolved = catalog
        .resolve_method("UnityEngineMathf", "Abs", &["SystemInt32"], true)
        .unwrap();
    assert_eq!(resolved.sig.params, vec!["SystemInt32"]);
    assert_eq!(resolved.conversions, vec![None]);

    let resolved = catalog
        .resolve_method("UnityEngineMathf", "Abs", &["SystemSingle"], true)
        .unwrap();
    assert_eq!(resolved.sig.params, vec!["SystemSingle"]);
}

#[test]
fn widening_picks_the_float_overload_for_mixed_args() {
    let catalog = cat();
    let resolved = catalog
        .resolve_binary_operator("op_Addition", "SystemInt32", "SystemSingle")
        .unwrap();
    assert_eq!(resolved.sig.owner, "SystemSingle");
    // The int side needs a conversion op, the float side does not.
    assert!(resolved.conversions[0].is_some());
    assert!(resolved.conversions[1].is_none());
}

#[test]
fn wrong_arity_reports_every_candidate() {
    let catalog = cat();
    let err = catalog
        .resolve_method(
            "UnityEngineMathf",
            "Abs",
            &["SystemInt32", "SystemInt32"],
            true,
        )
        .unwrap_err();
    let ResolveError::NoMatch { candidates } = err else {
        panic!("expected NoMatch, got {err:?}");
    };
    assert_eq!(candidates.len(), 2);
}

#[test]
fn unknown_member_is_distinct_from_no_match() {
    let catalog = cat();
    let err = catalog
        .resolve_method("UnityEngineMathf", "Absx", &["SystemInt32"], true)
        .unwrap_err();
    assert!(matches!(err, ResolveError::UnknownMember { .. }));
}

#[test]
fn tie_between_candidates_is_ambiguous() {
    let catalog = cat();
    // Both overloads need one widening from int; neither wins.
    let candidates = vec![
        sig("T", "f", &["SystemSingle"], "SystemVoid"),
        sig("T", "f", &["SystemDouble"], "SystemVoid"),
    ];
    let err = resolve_overload(&catalog, &candidates, &["SystemInt32"]).unwrap_err();
    let ResolveError::Ambiguous { candidates } = err else {
        panic!("expected Ambiguous, got {err:?}");
    };
    assert_eq!(candidates.len(), 2);
}

#[test]
fn perfect_match_short_circuits_past_a_tie() {
    let catalog = cat();
    let candidates = vec![
        sig("T", "f", &["SystemSingle"], "SystemVoid"),
        sig("T", "f", &["SystemDouble"], "SystemVoid"),
        sig("T", "f", &["SystemInt32"], "SystemVoid"),
    ];
    let resolved = resolve_overload(&catalog, &candidates, &["SystemInt32"]).unwrap();
    assert_eq!(resolved.sig.params, vec!["SystemInt32"]);
}

#[test]
fn top_type_parameter_is_the_weakest_match() {
    let catalog = cat();
    let candidates = vec![
        sig("T", "f", &["SystemObject"], "SystemVoid"),
        sig("T", "f", &["SystemSingle"], "SystemVoid"),
    ];
    // Widening to float (1) outranks boxing to object (0).
    let resolved = resolve_overload(&catalog, &candidates, &["SystemInt32"]).unwrap();
    assert_eq!(resolved.sig.params, vec!["SystemSingle"]);
}

#[test]
fn reference_upcast_scores_as_widening() {
    let catalog = cat();
    let candidates = vec![sig(
        "T",
        "f",
        &["UnityEngineComponent"],
        "SystemVoid",
    )];
    let resolved = resolve_overload(&catalog, &candidates, &["UnityEngineTransform"]).unwrap();
    // Upcast is free at runtime; no conversion op recorded.
    assert_eq!(resolved.conversions, vec![None]);
}

#[test]
fn assignability_covers_widening_and_upcasts() {
    let catalog = cat();
    assert!(assignable(&catalog, "SystemInt32", "SystemInt32"));
    assert!(assignable(&catalog, "SystemInt32", "SystemSingle"));
    assert!(assignable(&catalog, "SystemSingle", "SystemDouble"));
    assert!(assignable(&catalog, "UnityEngineTransform", "SystemObject"));
    assert!(assignable(&catalog, "UnityEngineKeyCode", "SystemInt32"));
    // Narrowing never happens silently.
    assert!(!assignable(&catalog, "SystemSingle", "SystemInt32"));
    assert!(!assignable(&catalog, "SystemObject", "UnityEngineTransform"));
}

#[test]
fn debug_log_boxes_any_argument() {
    let catalog = cat();
    for arg in ["SystemInt32", "SystemString", "UnityEngineVector3"] {
        let resolved = catalog
            .resolve_method("UnityEngineDebug", "Log", &[arg], true)
            .unwrap();
        assert_eq!(
            resolved.sig.id,
            "UnityEngineDebug.__Log__SystemObject__SystemVoid"
        );
    }
}

#[test]
fn instance_members_resolve_through_the_base_chain() {
    let catalog = cat();
    // gameObject is declared on EngineBehaviour itself; transform on a
    // derived type must also find inherited members.
    let prop = catalog
        .find_property("EngineBehaviour", "gameObject")
        .unwrap();
    assert_eq!(prop.ty, "UnityEngineGameObject");
    assert!(prop.is_read_only());
}
