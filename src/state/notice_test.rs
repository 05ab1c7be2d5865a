use super::*;

#[test]
fn push_assigns_increasing_ids() {
    let mut state = NoticeState::default();
    let a = state.push(NoticeKind::Info, "one");
    let b = state.push(NoticeKind::Error, "two");
    assert!(b > a);
    assert_eq!(state.items.iter().map(|n| n.kind).collect::<Vec<_>>(), vec![NoticeKind::Info, NoticeKind::Error]);
}

#[test]
fn dismiss_removes_only_matching_notice() {
    let mut state = NoticeState::default();
    let a = state.push(NoticeKind::Success, "saved");
    let b = state.push(NoticeKind::Error, "failed");
    state.dismiss(a);
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].id, b);
    state.dismiss(a);
    assert_eq!(state.items.len(), 1);
}

#[test]
fn ids_are_not_reused_after_dismiss() {
    let mut state = NoticeState::default();
    let a = state.push(NoticeKind::Info, "x");
    state.dismiss(a);
    assert_ne!(state.push(NoticeKind::Info, "y"), a);
}

#[test]
fn oldest_notice_is_dropped_past_limit() {
    let mut state = NoticeState::default();
    for i in 0..=MAX_NOTICES {
        state.push(NoticeKind::Info, format!("n{i}"));
    }
    assert_eq!(state.items.len(), MAX_NOTICES);
    assert_eq!(state.items[0].text, "n1");
}

#[test]
fn kind_maps_to_modifier_class() {
    assert_eq!(NoticeKind::Error.css_class(), "notice notice--error");
}
