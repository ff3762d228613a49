use pretty_assertions::assert_eq;

use lark_catalog::{BuiltinCatalog, CatalogFile, FileCatalog};
use lark_diagnostic::{DiagnosticBag, ErrorCode};
use lark_ir::{FileId, SyncMode, Ty};

use crate::analysis::{AccessTarget, Analysis};
use crate::analyze;
use crate::symbols::SymbolKind;

fn analyze_src(source: &str) -> (Analysis, DiagnosticBag) {
    let mut bag = DiagnosticBag::new();
    let tokens = lark_lexer::lex(source, FileId(0), &mut bag);
    let module = lark_parse::parse(&tokens, FileId(0), &mut bag);
    assert!(!bag.has_errors(), "source failed to parse");
    let catalog = BuiltinCatalog::new();
    let analysis = analyze(&module, &catalog, &mut bag);
    (analysis, bag)
}

/// Like [`analyze_src`], but against a project catalog loaded from a
/// JSON document instead of the built-in table.
fn analyze_doc(source: &str, doc: &str) -> (Analysis, DiagnosticBag) {
    let mut bag = DiagnosticBag::new();
    let tokens = lark_lexer::lex(source, FileId(0), &mut bag);
    let module = lark_parse::parse(&tokens, FileId(0), &mut bag);
    assert!(!bag.has_errors(), "source failed to parse");
    let catalog = FileCatalog::from_document(CatalogFile::from_json(doc).unwrap()).unwrap();
    let analysis = analyze(&module, &catalog, &mut bag);
    (analysis, bag)
}

fn codes(bag: &DiagnosticBag) -> Vec<ErrorCode> {
    bag.iter().map(|d| d.code).collect()
}

#[test]
fn module_variables_carry_export_and_sync() {
    let (analysis, bag) = analyze_src(
        "pub let speed: float = 5.0\n\
         sync linear let hp: float = 100.0\n\
         let name: string = \"lark\"",
    );
    assert!(!bag.has_errors());
    let speed = analysis
        .symbols
        .iter()
        .find(|s| s.name == "speed")
        .unwrap();
    assert!(speed.export);
    assert_eq!(speed.ty, Ty::Float);
    let hp = analysis.symbols.iter().find(|s| s.name == "hp").unwrap();
    assert_eq!(hp.sync, SyncMode::Linear);
}

#[test]
fn module_initializer_must_be_literal() {
    let (_, bag) = analyze_src("let x: float = 1.0 + 2.0");
    assert!(codes(&bag).contains(&ErrorCode::E2012));
}

#[test]
fn negated_literal_is_a_valid_module_initializer() {
    let (_, bag) = analyze_src("let x: float = -1.5\nlet y: int = -3");
    assert!(!bag.has_errors());
}

#[test]
fn local_type_is_inferred_from_initializer() {
    let (analysis, bag) = analyze_src("on Start { let n = 1 + 2\nlet s = \"hi\" }");
    assert!(!bag.has_errors());
    let n = analysis.symbols.iter().find(|s| s.name == "n").unwrap();
    assert_eq!(n.ty, Ty::Int);
    let s = analysis.symbols.iter().find(|s| s.name == "s").unwrap();
    assert_eq!(s.ty, Ty::Str);
}

#[test]
fn uninferable_local_is_rejected() {
    let (_, bag) = analyze_src("on Start { let x }");
    assert!(codes(&bag).contains(&ErrorCode::E2009));
}

#[test]
fn unknown_identifier_gets_a_suggestion() {
    let (_, bag) = analyze_src("let speed: float = 1.0\non Start { sped = 2.0 }");
    let d = bag
        .iter()
        .find(|d| d.code == ErrorCode::E3001)
        .expect("expected E3001");
    assert!(d.suggestions.iter().any(|s| s.contains("speed")));
}

#[test]
fn user_call_coerces_int_argument_to_float() {
    let (analysis, bag) = analyze_src(
        "fn half(x: float) -> float { return x / 2.0 }\n\
         on Start { let y = half(4) }",
    );
    assert!(!bag.has_errors());
    // The literal `4` gets an int-to-float conversion.
    assert!(!analysis.coercions.is_empty());
    let y = analysis.symbols.iter().find(|s| s.name == "y").unwrap();
    assert_eq!(y.ty, Ty::Float);
}

#[test]
fn wrong_arity_on_user_function() {
    let (_, bag) = analyze_src(
        "fn add(a: int, b: int) -> int { return a + b }\n\
         on Start { let x = add(1) }",
    );
    assert!(codes(&bag).contains(&ErrorCode::E2011));
}

#[test]
fn mutual_recursion_is_rejected_with_the_chain() {
    let (_, bag) = analyze_src(
        "fn ping(n: int) -> int { return pong(n) }\n\
         fn pong(n: int) -> int { return ping(n) }",
    );
    let d = bag
        .iter()
        .find(|d| d.code == ErrorCode::E4001)
        .expect("expected E4001");
    assert!(d.message.contains("ping"));
    assert!(d.message.contains("pong"));
}

#[test]
fn self_recursion_is_rejected() {
    let (_, bag) = analyze_src("fn f(n: int) -> int { return f(n) }");
    assert!(codes(&bag).contains(&ErrorCode::E4001));
}

#[test]
fn non_recursive_call_chain_is_fine() {
    let (_, bag) = analyze_src(
        "fn a() { b() }\n\
         fn b() { c() }\n\
         fn c() { }",
    );
    assert!(!bag.has_errors());
}

#[test]
fn generics_are_rejected() {
    let (_, bag) = analyze_src("fn id<T>(x: int) -> int { return x }");
    assert!(codes(&bag).contains(&ErrorCode::E4002));
}

#[test]
fn unknown_event_suggests_a_real_one() {
    let (_, bag) = analyze_src("on Updat { }");
    let d = bag
        .iter()
        .find(|d| d.code == ErrorCode::E4003)
        .expect("expected E4003");
    assert!(d.suggestions.iter().any(|s| s.contains("Update")));
}

#[test]
fn handler_param_takes_the_event_type() {
    let (analysis, bag) = analyze_src(
        "on PlayerJoined(player: Player) { log(player.displayName) }",
    );
    assert!(!bag.has_errors());
    let p = analysis
        .symbols
        .iter()
        .find(|s| s.name == "player")
        .unwrap();
    assert_eq!(p.kind, SymbolKind::Param);
    assert_eq!(p.ty, Ty::Platform("EnginePlayer".to_owned()));
}

#[test]
fn break_outside_loop() {
    let (_, bag) = analyze_src("on Start { break }");
    assert!(codes(&bag).contains(&ErrorCode::E2005));
}

#[test]
fn condition_must_be_bool() {
    let (_, bag) = analyze_src("on Start { if 1 { } }");
    assert!(codes(&bag).contains(&ErrorCode::E2003));
}

#[test]
fn sync_write_without_request_warns() {
    let (_, bag) = analyze_src(
        "sync linear let hp: float = 100.0\n\
         on Interact { hp = hp - 10.0 }",
    );
    assert!(!bag.has_errors());
    assert_eq!(bag.warning_count(), 1);
    assert!(codes(&bag).contains(&ErrorCode::E6001));
}

#[test]
fn sync_write_with_request_is_silent() {
    let (_, bag) = analyze_src(
        "sync linear let hp: float = 100.0\n\
         on Interact { hp = hp - 10.0\nrequest_sync() }",
    );
    assert!(!bag.has_errors());
    assert_eq!(bag.warning_count(), 0);
}

#[test]
fn sync_mode_requires_numeric_type() {
    let (_, bag) = analyze_src("sync smooth let name: string = \"x\"");
    assert!(codes(&bag).contains(&ErrorCode::E6002));
}

#[test]
fn duplicate_module_names_collide() {
    let (_, bag) = analyze_src("let x: int = 1\nlet x: int = 2");
    assert!(codes(&bag).contains(&ErrorCode::E3002));
}

#[test]
fn sibling_scopes_reuse_a_name_without_clash() {
    let (analysis, bag) = analyze_src("on Start { for i in 0..2 { }\nfor i in 0..3 { } }");
    assert!(!bag.has_errors());
    let ids: Vec<_> = analysis
        .symbols
        .iter()
        .filter(|s| s.name == "i")
        .map(|s| s.id)
        .collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
}

#[test]
fn static_read_only_property_rejects_assignment() {
    let (_, bag) = analyze_src("on Start { Time.deltaTime = 1.0 }");
    assert!(codes(&bag).contains(&ErrorCode::E5005));
}

#[test]
fn compound_member_assignment_resolves_the_operator() {
    let (analysis, bag) = analyze_src(
        "on Start { transform.position += Vector3(0.0, 1.0, 0.0) }",
    );
    assert!(!bag.has_errors());
    let store = analysis.stores.values().next().expect("one store");
    let op = store.op.as_ref().expect("compound operator");
    assert_eq!(
        op.id,
        "UnityEngineVector3.__op_Addition__UnityEngineVector3_UnityEngineVector3__UnityEngineVector3"
    );
}

#[test]
fn send_resolves_declared_events_only() {
    let (analysis, bag) = analyze_src("event Reset { }\non Start { send Reset }");
    assert!(!bag.has_errors());
    assert_eq!(analysis.sends.len(), 1);

    let (_, bag) = analyze_src("event Reset { }\non Start { send Rset }");
    let d = bag
        .iter()
        .find(|d| d.code == ErrorCode::E3003)
        .expect("expected E3003");
    assert!(d.suggestions.iter().any(|s| s.contains("Reset")));
}

#[test]
fn enum_member_reads_as_a_constant() {
    let (analysis, bag) = analyze_src("on Start { let k = KeyCode.Space }");
    assert!(!bag.has_errors());
    let access = analysis.accesses.values().next().expect("one access");
    let AccessTarget::EnumValue { value, .. } = access else {
        panic!("expected enum value access");
    };
    assert_eq!(*value, 32);
}

#[test]
fn null_does_not_fit_numeric_slots() {
    let (_, bag) = analyze_src("let t: Transform = null\non Start { let n: int = null }");
    // Module-level null against a reference type is fine; the local
    // against int is not.
    assert_eq!(codes(&bag), vec![ErrorCode::E2001]);
}

#[test]
fn interpolation_resolves_concat_and_tostring() {
    let (analysis, bag) = analyze_src(
        "let score: int = 0\non Start { log(\"score: {score}\") }",
    );
    assert!(!bag.has_errors());
    assert_eq!(analysis.interp_ops.len(), 1);
}

#[test]
fn method_call_on_instance_receiver() {
    let (analysis, bag) = analyze_src("on Start { game_object.SetActive(false) }");
    assert!(!bag.has_errors());
    assert!(!analysis.calls.is_empty());
}

#[test]
fn ambiguous_overload_is_an_error_not_a_guess() {
    let (_, bag) = analyze_src("on Start { let m = Mathf.Max(1, 2) }");
    // Max only takes floats; both ints widen, one candidate, fine.
    assert!(!bag.has_errors());

    let (_, bag) = analyze_src("on Start { Convert.ToDouble(1.0) }");
    // Unknown type alias `Convert` is a scope error, not a crash.
    assert!(bag.has_errors());
}

#[test]
fn counted_loops_record_their_catalog_externs() {
    let (analysis, bag) = analyze_src("on Start { for i in 0..3 { } }");
    assert!(!bag.has_errors());
    let ops = analysis.loops.values().next().expect("one loop");
    assert_eq!(
        ops.less_than.id,
        "SystemInt32.__op_LessThan__SystemInt32_SystemInt32__SystemBoolean"
    );
    assert_eq!(
        ops.step.id,
        "SystemInt32.__op_Addition__SystemInt32_SystemInt32__SystemInt32"
    );
    assert!(ops.iter.is_none());
}

#[test]
fn array_loops_record_the_length_and_element_getters() {
    let (analysis, bag) = analyze_src("on Start { let a = [1, 2]\nfor x in a { log(\"{x}\") } }");
    assert!(!bag.has_errors());
    let ops = analysis.loops.values().next().expect("one loop");
    let iter = ops.iter.as_ref().expect("array getters");
    assert_eq!(iter.length.id, "SystemInt32Array.__get_Length__SystemInt32");
    assert_eq!(iter.get.id, "SystemInt32Array.__Get__SystemInt32__SystemInt32");
}

#[test]
fn iterating_an_array_type_without_getters_is_rejected() {
    // The loaded catalog whitelists the producer of the array but not
    // the array's own operations.
    let doc = r#"{
      "types": [{ "name": "Registry" }],
      "operations": [{
        "id": "Registry.__All__UnityEngineTransformArray",
        "owner": "Registry",
        "member": "All",
        "kind": "static-method",
        "ret": "UnityEngineTransformArray"
      }]
    }"#;
    let (analysis, bag) = analyze_doc("on Start { for t in Registry.All() { } }", doc);
    assert!(codes(&bag).contains(&ErrorCode::E5003));
    assert!(analysis.loops.is_empty());
}

#[test]
fn compound_assignment_needs_a_readable_property() {
    let doc = r#"{
      "types": [{ "name": "UnityEngineScreen", "alias": "Screen" }],
      "operations": [{
        "id": "UnityEngineScreen.__set_brightness__SystemSingle__SystemVoid",
        "owner": "UnityEngineScreen",
        "member": "set_brightness",
        "kind": "setter",
        "params": ["SystemSingle"],
        "ret": "SystemVoid"
      }]
    }"#;
    let (_, bag) = analyze_doc("on Start { Screen.brightness = 0.5 }", doc);
    assert!(!bag.has_errors());

    let (analysis, bag) = analyze_doc("on Start { Screen.brightness += 0.1 }", doc);
    assert!(codes(&bag).contains(&ErrorCode::E5005));
    assert!(analysis.stores.is_empty());
}
