use pretty_assertions::assert_eq;

use crate::catalog::Catalog;
use crate::interchange::CatalogFile;

use super::FileCatalog;

const DOC: &str = r#"{
  "types": [
    { "name": "UnityEngineAudioSource", "base": "UnityEngineComponent", "alias": "AudioSource" }
  ],
  "operations": [
    {
      "id": "UnityEngineAudioSource.__Play__SystemVoid",
      "owner": "UnityEngineAudioSource",
      "member": "Play",
      "kind": "method",
      "instance": true,
      "ret": "SystemVoid"
    },
    {
      "id": "UnityEngineAudioSource.__get_volume__SystemSingle",
      "owner": "UnityEngineAudioSource",
      "member": "get_volume",
      "kind": "getter",
      "instance": true,
      "ret": "SystemSingle"
    },
    {
      "id": "UnityEngineAudioSource.__set_volume__SystemSingle__SystemVoid",
      "owner": "UnityEngineAudioSource",
      "member": "set_volume",
      "kind": "setter",
      "instance": true,
      "params": ["SystemSingle"],
      "ret": "SystemVoid"
    }
  ],
  "enums": [
    {
      "name": "UnityEngineAudioRolloff",
      "underlying": "SystemInt32",
      "values": [["Logarithmic", 0], ["Linear", 1]]
    }
  ]
}"#;

fn load() -> FileCatalog {
    FileCatalog::from_document(CatalogFile::from_json(DOC).unwrap()).unwrap()
}

#[test]
fn loaded_types_and_aliases_resolve() {
    let catalog = load();
    assert!(catalog.is_known_type("UnityEngineAudioSource"));
    assert_eq!(
        catalog.resolve_type_name("AudioSource").as_deref(),
        Some("UnityEngineAudioSource")
    );
    // Loaded types slot into the built-in hierarchy.
    assert!(catalog.derives_from("UnityEngineAudioSource", "UnityEngineObject"));
}

#[test]
fn accessor_records_fold_into_one_property() {
    let catalog = load();
    let prop = catalog
        .property("UnityEngineAudioSource", "volume")
        .unwrap();
    assert_eq!(prop.ty, "SystemSingle");
    assert!(prop.getter.is_some());
    assert!(prop.setter.is_some());
}

#[test]
fn loaded_methods_resolve() {
    let catalog = load();
    let resolved = catalog
        .resolve_method("UnityEngineAudioSource", "Play", &[], false)
        .unwrap();
    assert_eq!(resolved.sig.id, "UnityEngineAudioSource.__Play__SystemVoid");
}

#[test]
fn misses_fall_back_to_the_builtin_table() {
    let catalog = load();
    assert!(catalog.is_known_type("UnityEngineVector3"));
    assert!(catalog
        .resolve_method("UnityEngineDebug", "Log", &["SystemString"], true)
        .is_ok());
    assert_eq!(
        catalog.resolve_type_name("float").as_deref(),
        Some("SystemSingle")
    );
}

#[test]
fn loaded_enums_expose_values() {
    let catalog = load();
    let info = catalog.enum_info("UnityEngineAudioRolloff").unwrap();
    assert_eq!(info.value("Linear"), Some(1));
    assert!(catalog.type_info("UnityEngineAudioRolloff").unwrap().is_enum);
}

#[test]
fn static_method_kind_loads_as_a_static_method() {
    let doc = CatalogFile::from_json(
        r#"{ "operations": [ {
            "id": "UnityEngineRandom.__Range__SystemInt32_SystemInt32__SystemInt32",
            "owner": "UnityEngineRandom",
            "member": "Range",
            "kind": "static-method",
            "instance": true,
            "params": ["SystemInt32", "SystemInt32"],
            "ret": "SystemInt32"
        } ] }"#,
    )
    .unwrap();
    let catalog = FileCatalog::from_document(doc).unwrap();
    let resolved = catalog
        .resolve_method(
            "UnityEngineRandom",
            "Range",
            &["SystemInt32", "SystemInt32"],
            true,
        )
        .unwrap();
    // The tag wins over a stray `instance` flag.
    assert!(!resolved.sig.instance);
}

#[test]
fn unknown_operation_kind_is_a_load_error() {
    let doc = CatalogFile::from_json(
        r#"{ "operations": [ { "id": "X.__f__SystemVoid", "owner": "X", "member": "f", "kind": "mystery", "ret": "SystemVoid" } ] }"#,
    )
    .unwrap();
    assert!(FileCatalog::from_document(doc).is_err());
}
