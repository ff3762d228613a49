//! The fixed table of engine events.
//!
//! Handlers may only attach to events the runtime actually fires. Each
//! event has a reserved assembly label, and parameterized events deliver
//! their argument through a fixed, runtime-mandated heap slot name.

/// One engine event the runtime can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventInfo {
    /// Source-level name used after `on`.
    pub name: &'static str,
    /// Reserved assembly label the runtime jumps to.
    pub label: &'static str,
    /// Parameter delivered by the runtime, if any: flattened type and
    /// the fixed heap slot name it arrives in.
    pub param: Option<EventParam>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventParam {
    pub ty: &'static str,
    pub slot: &'static str,
}

const EVENTS: &[EventInfo] = &[
    EventInfo {
        name: "Start",
        label: "_start",
        param: None,
    },
    EventInfo {
        name: "Update",
        label: "_update",
        param: None,
    },
    EventInfo {
        name: "LateUpdate",
        label: "_lateUpdate",
        param: None,
    },
    EventInfo {
        name: "FixedUpdate",
        label: "_fixedUpdate",
        param: None,
    },
    EventInfo {
        name: "Interact",
        label: "_interact",
        param: None,
    },
    EventInfo {
        name: "OnEnable",
        label: "_onEnable",
        param: None,
    },
    EventInfo {
        name: "OnDisable",
        label: "_onDisable",
        param: None,
    },
    EventInfo {
        name: "PlayerJoined",
        label: "_onPlayerJoined",
        param: Some(EventParam {
            ty: "EnginePlayer",
            slot: "onPlayerJoinedPlayer",
        }),
    },
    EventInfo {
        name: "PlayerLeft",
        label: "_onPlayerLeft",
        param: Some(EventParam {
            ty: "EnginePlayer",
            slot: "onPlayerLeftPlayer",
        }),
    },
    EventInfo {
        name: "InputJump",
        label: "_inputJump",
        param: Some(EventParam {
            ty: "SystemBoolean",
            slot: "inputJumpBoolValue",
        }),
    },
    EventInfo {
        name: "InputUse",
        label: "_inputUse",
        param: Some(EventParam {
            ty: "SystemBoolean",
            slot: "inputUseBoolValue",
        }),
    },
    EventInfo {
        name: "InputGrab",
        label: "_inputGrab",
        param: Some(EventParam {
            ty: "SystemBoolean",
            slot: "inputGrabBoolValue",
        }),
    },
    EventInfo {
        name: "InputDrop",
        label: "_inputDrop",
        param: Some(EventParam {
            ty: "SystemBoolean",
            slot: "inputDropBoolValue",
        }),
    },
];

/// Look up an event by its source-level name.
pub fn event(name: &str) -> Option<&'static EventInfo> {
    EVENTS.iter().find(|e| e.name == name)
}

/// Every known event, for validation and suggestions.
pub fn all_events() -> &'static [EventInfo] {
    EVENTS
}

#[cfg(test)]
mod tests;
