use super::*;

#[test]
fn style_mapping_follows_message_kind() {
    assert_eq!(ToastStyle::for_kind(MessageKind::Error), ToastStyle::Error);
    assert_eq!(ToastStyle::for_kind(MessageKind::Danger), ToastStyle::Error);
    assert_eq!(ToastStyle::for_kind(MessageKind::Victory), ToastStyle::Success);
    assert_eq!(ToastStyle::for_kind(MessageKind::Success), ToastStyle::Success);
    assert_eq!(ToastStyle::for_kind(MessageKind::Info), ToastStyle::Info);
}

#[test]
fn icons_per_style() {
    assert_eq!(ToastStyle::Error.icon(), "fa-exclamation-triangle");
    assert_eq!(ToastStyle::Success.icon(), "fa-trophy");
    assert_eq!(ToastStyle::Info.icon(), "fa-info-circle");
    assert_eq!(ToastStyle::Error.css_class(), "error");
}

#[test]
fn toasts_stack_with_distinct_ids() {
    let mut area = NotificationArea::default();
    let first = area.push("one", ToastStyle::Info).id;
    let second = area.push("one", ToastStyle::Info).id;
    assert_ne!(first, second);
    assert_eq!(area.toasts().len(), 2);
}

#[test]
fn fade_and_remove_check_existence() {
    let mut area = NotificationArea::default();
    let id = area.push("bye", ToastStyle::Error).id;
    assert!(area.start_fade(id));
    assert_eq!(area.toasts()[0].phase, ToastPhase::Fading);
    assert!(area.remove(id));
    assert!(!area.remove(id));
    assert!(!area.start_fade(id));
}
