//! Operation-id formatting.
//!
//! The VM addresses external operations by a flat string id built from
//! namespace-flattened type names:
//!
//! ```text
//! OwnerType.__MemberName__ParamType1_ParamType2__ReturnType
//! ```
//!
//! A zero-parameter operation collapses the parameter segment entirely,
//! e.g. `UnityEngineTime.__get_deltaTime__SystemSingle`.

/// Strip namespace dots: `UnityEngine.Transform` becomes
/// `UnityEngineTransform`. Already-flat names pass through.
pub fn flatten(type_name: &str) -> String {
    if type_name.contains('.') {
        type_name.replace('.', "")
    } else {
        type_name.to_owned()
    }
}

/// Build the flat id for an operation. All type names must already be
/// flattened.
pub fn extern_id(owner: &str, member: &str, params: &[&str], ret: &str) -> String {
    let mut id = String::with_capacity(owner.len() + member.len() + ret.len() + 8);
    id.push_str(owner);
    id.push_str(".__");
    id.push_str(member);
    if !params.is_empty() {
        id.push_str("__");
        for (i, p) in params.iter().enumerate() {
            if i > 0 {
                id.push('_');
            }
            id.push_str(p);
        }
    }
    id.push_str("__");
    id.push_str(ret);
    id
}

#[cfg(test)]
mod tests;
