use std::time::Duration;

use super::*;
use crate::feedback::{Presented, Recorder, ToastPhase};

fn emitter() -> (FeedbackEmitter, Recorder) {
    let recorder = Recorder::new();
    (FeedbackEmitter::new(Box::new(recorder.clone()), Timings::default()), recorder)
}

#[test]
fn toast_lifecycle_fades_then_removes() {
    let (mut emitter, recorder) = emitter();
    let mut scheduler = Scheduler::default();
    let t0 = Instant::now();

    let id = emitter.toast("Hello", MessageKind::Info, &mut scheduler, t0);
    assert_eq!(emitter.toasts().len(), 1);
    assert_eq!(scheduler.next_deadline(), Some(t0 + Duration::from_millis(3500)));

    let t1 = t0 + Duration::from_millis(3500);
    let fade = scheduler.pop_due(t1).unwrap();
    emitter.on_timer(fade, &mut scheduler, t1);
    assert_eq!(emitter.toasts()[0].phase, ToastPhase::Fading);
    assert_eq!(scheduler.next_deadline(), Some(t1 + Duration::from_millis(400)));

    let t2 = t1 + Duration::from_millis(400);
    let remove = scheduler.pop_due(t2).unwrap();
    emitter.on_timer(remove, &mut scheduler, t2);
    assert!(emitter.toasts().is_empty());

    let events = recorder.events();
    assert!(matches!(events[0], Presented::ToastShown(_)));
    assert_eq!(events[1], Presented::ToastFading(id));
    assert_eq!(events[2], Presented::ToastRemoved(id));
}

#[test]
fn area_is_created_lazily() {
    let (mut emitter, _) = emitter();
    assert!(emitter.toasts().is_empty());
    let mut scheduler = Scheduler::default();
    emitter.on_timer(Timer::ToastFade(ToastId(9)), &mut scheduler, Instant::now());
    assert!(scheduler.is_empty());
}

#[test]
fn timer_for_vanished_toast_is_noop() {
    let (mut emitter, recorder) = emitter();
    let mut scheduler = Scheduler::default();
    let now = Instant::now();
    emitter.toast("a", MessageKind::Error, &mut scheduler, now);
    recorder.take();
    emitter.on_timer(Timer::ToastRemove(ToastId(99)), &mut scheduler, now);
    emitter.on_timer(Timer::ToastFade(ToastId(99)), &mut scheduler, now);
    assert!(recorder.events().is_empty());
}

#[test]
fn toast_style_follows_kind() {
    let (mut emitter, recorder) = emitter();
    let mut scheduler = Scheduler::default();
    emitter.toast("win", MessageKind::Victory, &mut scheduler, Instant::now());
    emitter.toast("bad", MessageKind::Danger, &mut scheduler, Instant::now());
    let toasts = recorder.toasts();
    assert_eq!(toasts[0].style, ToastStyle::Success);
    assert_eq!(toasts[1].style, ToastStyle::Error);
}

#[test]
fn shake_sequence_increases() {
    let (mut emitter, recorder) = emitter();
    emitter.shake();
    emitter.shake();
    assert_eq!(recorder.events(), vec![Presented::Shake(1), Presented::Shake(2)]);
}
