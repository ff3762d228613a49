use pretty_assertions::assert_eq;

use super::{all_events, event};

#[test]
fn known_event_maps_to_runtime_label() {
    assert_eq!(event("Start").unwrap().label, "_start");
    assert_eq!(event("LateUpdate").unwrap().label, "_lateUpdate");
    assert!(event("Destroy").is_none());
}

#[test]
fn parameterized_events_carry_fixed_slots() {
    let joined = event("PlayerJoined").unwrap();
    let param = joined.param.unwrap();
    assert_eq!(param.slot, "onPlayerJoinedPlayer");
    assert_eq!(param.ty, "EnginePlayer");

    let jump = event("InputJump").unwrap();
    assert_eq!(jump.param.unwrap().slot, "inputJumpBoolValue");
}

#[test]
fn labels_are_unique() {
    let events = all_events();
    for (i, a) in events.iter().enumerate() {
        for b in &events[i + 1..] {
            assert_ne!(a.label, b.label);
            assert_ne!(a.name, b.name);
        }
    }
}
