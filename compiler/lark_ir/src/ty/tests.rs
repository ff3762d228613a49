use pretty_assertions::assert_eq;

use super::Ty;

#[test]
fn core_types_map_to_platform_names() {
    assert_eq!(Ty::Int.platform_name(), "SystemInt32");
    assert_eq!(Ty::Float.platform_name(), "SystemSingle");
    assert_eq!(Ty::Str.platform_name(), "SystemString");
    assert_eq!(Ty::Object.platform_name(), "SystemObject");
}

#[test]
fn arrays_get_array_suffix() {
    assert_eq!(
        Ty::Array(Box::new(Ty::Int)).platform_name(),
        "SystemInt32Array"
    );
    assert_eq!(
        Ty::Array(Box::new(Ty::Platform("UnityEngineVector3".into()))).platform_name(),
        "UnityEngineVector3Array"
    );
}

#[test]
fn platform_names_round_trip() {
    for ty in [
        Ty::Int,
        Ty::Float,
        Ty::Double,
        Ty::Bool,
        Ty::Str,
        Ty::Object,
        Ty::Void,
        Ty::Array(Box::new(Ty::Float)),
        Ty::Platform("UnityEngineTransform".into()),
    ] {
        assert_eq!(Ty::from_platform_name(&ty.platform_name()), ty);
    }
}

#[test]
fn display_uses_source_spelling() {
    assert_eq!(Ty::Array(Box::new(Ty::Int)).to_string(), "int[]");
    assert_eq!(Ty::Str.to_string(), "string");
}

#[test]
fn keyword_lookup() {
    assert_eq!(Ty::from_keyword("int"), Some(Ty::Int));
    assert_eq!(Ty::from_keyword("Vector3"), None);
}
