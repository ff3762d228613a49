use pretty_assertions::assert_eq;

use super::{extern_id, flatten};

#[test]
fn flattens_namespaces() {
    assert_eq!(flatten("UnityEngine.Transform"), "UnityEngineTransform");
    assert_eq!(flatten("System.Int32"), "SystemInt32");
    assert_eq!(flatten("SystemInt32"), "SystemInt32");
}

#[test]
fn id_with_parameters() {
    assert_eq!(
        extern_id(
            "UnityEngineMathf",
            "Max",
            &["SystemSingle", "SystemSingle"],
            "SystemSingle"
        ),
        "UnityEngineMathf.__Max__SystemSingle_SystemSingle__SystemSingle"
    );
}

#[test]
fn id_without_parameters_collapses_segment() {
    assert_eq!(
        extern_id("UnityEngineTime", "get_deltaTime", &[], "SystemSingle"),
        "UnityEngineTime.__get_deltaTime__SystemSingle"
    );
}

#[test]
fn operator_id() {
    assert_eq!(
        extern_id(
            "SystemInt32",
            "op_Addition",
            &["SystemInt32", "SystemInt32"],
            "SystemInt32"
        ),
        "SystemInt32.__op_Addition__SystemInt32_SystemInt32__SystemInt32"
    );
}
