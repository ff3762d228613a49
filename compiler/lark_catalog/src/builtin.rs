//! The hand-authored built-in catalog.
//!
//! A deliberately small slice of the target platform: the numeric and
//! string primitives, the debug log surface, a handful of engine types,
//! and the array types the language can spell. File catalogs layer on
//! top of this table and fall back to it on a miss.

use rustc_hash::FxHashMap;

use crate::catalog::{Catalog, TOP_TYPE, VOID_TYPE};
use crate::id::extern_id;
use crate::types::{
    CatalogTypeInfo, EnumTypeInfo, ExternKind, ExternSignature, ImplicitConversion, PropertyInfo,
};

const INT: &str = "SystemInt32";
const UINT: &str = "SystemUInt32";
const FLOAT: &str = "SystemSingle";
const DOUBLE: &str = "SystemDouble";
const BOOL: &str = "SystemBoolean";
const STR: &str = "SystemString";

pub struct BuiltinCatalog {
    types: FxHashMap<String, CatalogTypeInfo>,
    aliases: FxHashMap<String, String>,
    // Keyed (owner, member, is_static).
    methods: FxHashMap<(String, String, bool), Vec<ExternSignature>>,
    properties: FxHashMap<(String, String), PropertyInfo>,
    operators: FxHashMap<(String, String), Vec<ExternSignature>>,
    enums: FxHashMap<String, EnumTypeInfo>,
    conversions: FxHashMap<(String, String), ImplicitConversion>,
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn sig(
    owner: &str,
    member: &str,
    params: &[&str],
    ret: &str,
    instance: bool,
    kind: ExternKind,
) -> ExternSignature {
    ExternSignature {
        id: extern_id(owner, member, params, ret),
        owner: owner.to_owned(),
        member: member.to_owned(),
        params: params.iter().map(|p| (*p).to_owned()).collect(),
        param_names: Vec::new(),
        ret: ret.to_owned(),
        instance,
        kind,
    }
}

impl BuiltinCatalog {
    pub fn new() -> Self {
        let mut c = Self {
            types: FxHashMap::default(),
            aliases: FxHashMap::default(),
            methods: FxHashMap::default(),
            properties: FxHashMap::default(),
            operators: FxHashMap::default(),
            enums: FxHashMap::default(),
            conversions: FxHashMap::default(),
        };
        c.register_types();
        c.register_primitives();
        c.register_engine();
        c.register_arrays();
        c.register_conversions();
        c
    }

    fn add_type(&mut self, name: &str, base: Option<&str>, is_enum: bool) {
        self.types.insert(
            name.to_owned(),
            CatalogTypeInfo {
                name: name.to_owned(),
                base: base.map(str::to_owned),
                is_enum,
            },
        );
    }

    fn add_alias(&mut self, source: &str, platform: &str) {
        self.aliases.insert(source.to_owned(), platform.to_owned());
    }

    fn add_method(&mut self, s: ExternSignature) {
        let key = (s.owner.clone(), s.member.clone(), !s.instance);
        self.methods.entry(key).or_default().push(s);
    }

    fn add_op(&mut self, owner: &str, name: &str, params: &[&str], ret: &str) {
        let s = sig(owner, name, params, ret, false, ExternKind::Operator);
        self.operators
            .entry((owner.to_owned(), name.to_owned()))
            .or_default()
            .push(s);
    }

    fn add_prop(&mut self, owner: &str, name: &str, ty: &str, instance: bool, writable: bool) {
        let getter = sig(
            owner,
            &format!("get_{name}"),
            &[],
            ty,
            instance,
            ExternKind::Getter,
        );
        let setter = writable.then(|| {
            sig(
                owner,
                &format!("set_{name}"),
                &[ty],
                VOID_TYPE,
                instance,
                ExternKind::Setter,
            )
        });
        self.properties.insert(
            (owner.to_owned(), name.to_owned()),
            PropertyInfo {
                owner: owner.to_owned(),
                name: name.to_owned(),
                ty: ty.to_owned(),
                getter: Some(getter),
                setter,
                instance,
            },
        );
    }

    fn add_conv(&mut self, from: &str, to: &str, op: Option<ExternSignature>) {
        self.conversions.insert(
            (from.to_owned(), to.to_owned()),
            ImplicitConversion {
                from: from.to_owned(),
                to: to.to_owned(),
                op,
            },
        );
    }

    fn register_types(&mut self) {
        self.add_type(TOP_TYPE, None, false);
        for name in [INT, UINT, FLOAT, DOUBLE, BOOL, STR] {
            self.add_type(name, Some(TOP_TYPE), false);
        }
        self.add_type("SystemConvert", Some(TOP_TYPE), false);
        self.add_type("UnityEngineObject", Some(TOP_TYPE), false);
        self.add_type("UnityEngineComponent", Some("UnityEngineObject"), false);
        self.add_type("UnityEngineTransform", Some("UnityEngineComponent"), false);
        self.add_type("UnityEngineGameObject", Some("UnityEngineObject"), false);
        self.add_type("UnityEngineVector3", Some(TOP_TYPE), false);
        self.add_type("UnityEngineDebug", Some(TOP_TYPE), false);
        self.add_type("UnityEngineMathf", Some(TOP_TYPE), false);
        self.add_type("UnityEngineTime", Some(TOP_TYPE), false);
        self.add_type("UnityEngineKeyCode", Some(TOP_TYPE), true);
        self.add_type("EngineBehaviour", Some("UnityEngineComponent"), false);
        self.add_type("EnginePlayer", Some(TOP_TYPE), false);

        for (source, platform) in [
            ("int", INT),
            ("float", FLOAT),
            ("double", DOUBLE),
            ("bool", BOOL),
            ("string", STR),
            ("object", TOP_TYPE),
            ("Vector3", "UnityEngineVector3"),
            ("Transform", "UnityEngineTransform"),
            ("GameObject", "UnityEngineGameObject"),
            ("KeyCode", "UnityEngineKeyCode"),
            ("Debug", "UnityEngineDebug"),
            ("Mathf", "UnityEngineMathf"),
            ("Time", "UnityEngineTime"),
            ("Player", "EnginePlayer"),
            ("Behaviour", "EngineBehaviour"),
        ] {
            self.add_alias(source, platform);
        }
    }

    fn register_primitives(&mut self) {
        // Arithmetic and comparison operators per numeric type.
        for ty in [INT, FLOAT, DOUBLE] {
            for op in [
                "op_Addition",
                "op_Subtraction",
                "op_Multiply",
                "op_Division",
                "op_Modulus",
            ] {
                self.add_op(ty, op, &[ty, ty], ty);
            }
            for op in [
                "op_Equality",
                "op_Inequality",
                "op_LessThan",
                "op_GreaterThan",
                "op_LessThanOrEqual",
                "op_GreaterThanOrEqual",
            ] {
                self.add_op(ty, op, &[ty, ty], BOOL);
            }
            self.add_op(ty, "op_UnaryNegation", &[ty], ty);
        }

        self.add_op(BOOL, "op_ConditionalAnd", &[BOOL, BOOL], BOOL);
        self.add_op(BOOL, "op_ConditionalOr", &[BOOL, BOOL], BOOL);
        self.add_op(BOOL, "op_LogicalNot", &[BOOL], BOOL);
        self.add_op(BOOL, "op_Equality", &[BOOL, BOOL], BOOL);
        self.add_op(BOOL, "op_Inequality", &[BOOL, BOOL], BOOL);

        self.add_op(STR, "op_Addition", &[STR, STR], STR);
        self.add_op(STR, "op_Equality", &[STR, STR], BOOL);
        self.add_op(STR, "op_Inequality", &[STR, STR], BOOL);

        // Reference equality for anything boxed.
        self.add_op(TOP_TYPE, "op_Equality", &[TOP_TYPE, TOP_TYPE], BOOL);
        self.add_op(TOP_TYPE, "op_Inequality", &[TOP_TYPE, TOP_TYPE], BOOL);

        for ty in [INT, FLOAT, DOUBLE, BOOL, TOP_TYPE] {
            self.add_method(sig(ty, "ToString", &[], STR, true, ExternKind::Method));
        }

        self.add_method(sig(STR, "Concat", &[STR, STR], STR, false, ExternKind::Method));
        self.add_method(sig(STR, "Contains", &[STR], BOOL, true, ExternKind::Method));
        self.add_prop(STR, "Length", INT, true, false);

        self.add_method(sig(
            "SystemConvert",
            "ToString",
            &[TOP_TYPE],
            STR,
            false,
            ExternKind::Method,
        ));
        self.add_method(sig(
            "SystemConvert",
            "ToSingle",
            &[INT],
            FLOAT,
            false,
            ExternKind::Method,
        ));
        self.add_method(sig(
            "SystemConvert",
            "ToDouble",
            &[INT],
            DOUBLE,
            false,
            ExternKind::Method,
        ));
        self.add_method(sig(
            "SystemConvert",
            "ToDouble",
            &[FLOAT],
            DOUBLE,
            false,
            ExternKind::Method,
        ));
        self.add_method(sig(
            "SystemConvert",
            "ToInt32",
            &[FLOAT],
            INT,
            false,
            ExternKind::Method,
        ));
    }

    fn register_engine(&mut self) {
        let debug = "UnityEngineDebug";
        for member in ["Log", "LogWarning", "LogError"] {
            self.add_method(sig(
                debug,
                member,
                &[TOP_TYPE],
                VOID_TYPE,
                false,
                ExternKind::Method,
            ));
        }

        let mathf = "UnityEngineMathf";
        // Two Abs overloads; the resolver must keep them apart.
        self.add_method(sig(mathf, "Abs", &[INT], INT, false, ExternKind::Method));
        self.add_method(sig(mathf, "Abs", &[FLOAT], FLOAT, false, ExternKind::Method));
        for member in ["Max", "Min"] {
            self.add_method(sig(
                mathf,
                member,
                &[FLOAT, FLOAT],
                FLOAT,
                false,
                ExternKind::Method,
            ));
        }
        for member in ["Sqrt", "Floor", "Round"] {
            self.add_method(sig(mathf, member, &[FLOAT], FLOAT, false, ExternKind::Method));
        }
        self.add_method(sig(
            mathf,
            "Clamp",
            &[FLOAT, FLOAT, FLOAT],
            FLOAT,
            false,
            ExternKind::Method,
        ));

        let time = "UnityEngineTime";
        self.add_prop(time, "deltaTime", FLOAT, false, false);
        self.add_prop(time, "time", FLOAT, false, false);

        let vec3 = "UnityEngineVector3";
        self.add_method(sig(
            vec3,
            "ctor",
            &[FLOAT, FLOAT, FLOAT],
            vec3,
            false,
            ExternKind::Constructor,
        ));
        for axis in ["x", "y", "z"] {
            self.add_prop(vec3, axis, FLOAT, true, true);
        }
        self.add_prop(vec3, "magnitude", FLOAT, true, false);
        self.add_prop(vec3, "zero", vec3, false, false);
        self.add_method(sig(
            vec3,
            "Distance",
            &[vec3, vec3],
            FLOAT,
            false,
            ExternKind::Method,
        ));
        self.add_op(vec3, "op_Addition", &[vec3, vec3], vec3);
        self.add_op(vec3, "op_Subtraction", &[vec3, vec3], vec3);
        self.add_op(vec3, "op_Multiply", &[vec3, FLOAT], vec3);
        self.add_op(vec3, "op_Equality", &[vec3, vec3], BOOL);
        self.add_op(vec3, "op_Inequality", &[vec3, vec3], BOOL);

        let transform = "UnityEngineTransform";
        self.add_prop(transform, "position", vec3, true, true);
        self.add_prop(transform, "localPosition", vec3, true, true);
        self.add_prop(transform, "localScale", vec3, true, true);

        let game_object = "UnityEngineGameObject";
        self.add_prop(game_object, "transform", transform, true, false);
        self.add_prop(game_object, "name", STR, true, false);
        self.add_method(sig(
            game_object,
            "SetActive",
            &[BOOL],
            VOID_TYPE,
            true,
            ExternKind::Method,
        ));

        let behaviour = "EngineBehaviour";
        self.add_method(sig(
            behaviour,
            "SendCustomEvent",
            &[STR],
            VOID_TYPE,
            true,
            ExternKind::Method,
        ));
        self.add_method(sig(
            behaviour,
            "RequestSerialization",
            &[],
            VOID_TYPE,
            true,
            ExternKind::Method,
        ));
        self.add_prop(behaviour, "transform", transform, true, false);
        self.add_prop(behaviour, "gameObject", game_object, true, false);

        let player = "EnginePlayer";
        self.add_prop(player, "displayName", STR, true, false);
        self.add_prop(player, "isLocal", BOOL, true, false);

        self.enums.insert(
            "UnityEngineKeyCode".to_owned(),
            EnumTypeInfo {
                name: "UnityEngineKeyCode".to_owned(),
                underlying: INT.to_owned(),
                values: vec![
                    ("Space".to_owned(), 32),
                    ("Return".to_owned(), 13),
                    ("Escape".to_owned(), 27),
                    ("UpArrow".to_owned(), 273),
                    ("DownArrow".to_owned(), 274),
                    ("RightArrow".to_owned(), 275),
                    ("LeftArrow".to_owned(), 276),
                    ("E".to_owned(), 101),
                ],
            },
        );
    }

    fn register_arrays(&mut self) {
        let elems = [
            INT,
            FLOAT,
            DOUBLE,
            BOOL,
            STR,
            TOP_TYPE,
            "UnityEngineVector3",
        ];
        for elem in elems {
            let owner = format!("{elem}Array");
            self.add_type(&owner, Some(TOP_TYPE), false);
            self.add_method(sig(&owner, "Get", &[INT], elem, true, ExternKind::Method));
            self.add_method(sig(
                &owner,
                "Set",
                &[INT, elem],
                VOID_TYPE,
                true,
                ExternKind::Method,
            ));
            self.add_method(sig(
                &owner,
                "ctor",
                &[INT],
                &owner,
                false,
                ExternKind::Constructor,
            ));
            self.add_prop(&owner, "Length", INT, true, false);
        }
    }

    fn register_conversions(&mut self) {
        self.add_conv(
            INT,
            FLOAT,
            Some(sig(
                "SystemConvert",
                "ToSingle",
                &[INT],
                FLOAT,
                false,
                ExternKind::Method,
            )),
        );
        self.add_conv(
            INT,
            DOUBLE,
            Some(sig(
                "SystemConvert",
                "ToDouble",
                &[INT],
                DOUBLE,
                false,
                ExternKind::Method,
            )),
        );
        self.add_conv(
            FLOAT,
            DOUBLE,
            Some(sig(
                "SystemConvert",
                "ToDouble",
                &[FLOAT],
                DOUBLE,
                false,
                ExternKind::Method,
            )),
        );
        // Enums travel as their underlying integral type.
        self.add_conv(
            "UnityEngineKeyCode",
            INT,
            Some(sig(
                "SystemConvert",
                "ToInt32",
                &["UnityEngineKeyCode"],
                INT,
                false,
                ExternKind::Method,
            )),
        );
    }
}

impl Catalog for BuiltinCatalog {
    fn type_info(&self, name: &str) -> Option<CatalogTypeInfo> {
        self.types.get(name).cloned()
    }

    fn resolve_type_name(&self, source_name: &str) -> Option<String> {
        if let Some(platform) = self.aliases.get(source_name) {
            return Some(platform.clone());
        }
        self.types.contains_key(source_name).then(|| source_name.to_owned())
    }

    fn property(&self, owner: &str, name: &str) -> Option<PropertyInfo> {
        self.properties
            .get(&(owner.to_owned(), name.to_owned()))
            .cloned()
    }

    fn method_candidates(&self, owner: &str, member: &str, statik: bool) -> Vec<ExternSignature> {
        self.methods
            .get(&(owner.to_owned(), member.to_owned(), statik))
            .cloned()
            .unwrap_or_default()
    }

    fn operator_candidates(&self, owner: &str, op_name: &str) -> Vec<ExternSignature> {
        self.operators
            .get(&(owner.to_owned(), op_name.to_owned()))
            .cloned()
            .unwrap_or_default()
    }

    fn member_names(&self, owner: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .methods
            .keys()
            .filter(|(o, _, _)| o == owner)
            .map(|(_, m, _)| m.clone())
            .chain(
                self.properties
                    .keys()
                    .filter(|(o, _)| o == owner)
                    .map(|(_, n)| n.clone()),
            )
            .collect();
        if let Some(info) = self.enums.get(owner) {
            names.extend(info.value_names().map(str::to_owned));
        }
        names
    }

    fn implicit_conversion(&self, from: &str, to: &str) -> Option<ImplicitConversion> {
        self.conversions
            .get(&(from.to_owned(), to.to_owned()))
            .cloned()
    }

    fn enum_info(&self, name: &str) -> Option<EnumTypeInfo> {
        self.enums.get(name).cloned()
    }
}
