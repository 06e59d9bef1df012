//! Integration tests for StateMachine and SharedSignal

mod common;
use common::*;

use embassy_futures::block_on;
use embassy_futures::select::{Either, select};
use traffic_signal::{
    OperatingMode, SignalColor, StateMachine, TickOutcome, TimeDuration, TimeSource,
};

/// Ticks the machine at its own cadence until `end`, collecting transitions.
fn run_until(
    machine: &mut StateMachine<TestInstant>,
    shared: &Shared,
    timer: &MockTimeSource,
    end: u64,
) -> Vec<(u64, SignalColor)> {
    let mut transitions = Vec::new();
    while timer.now().0 <= end {
        let now = timer.now();
        let delay = machine.service(shared, now);
        if let TickOutcome::Advanced(color) = machine.last_outcome() {
            transitions.push((now.0, color));
        }
        timer.advance(delay);
    }
    transitions
}

#[test]
fn normal_mode_cycles_with_planned_durations() {
    let timer = MockTimeSource::new();
    let shared = shared_at(0);
    let mut machine = StateMachine::new();

    let transitions = run_until(&mut machine, &shared, &timer, 35_000);

    assert_eq!(
        transitions,
        vec![
            (15_000, SignalColor::Yellow),
            (20_000, SignalColor::Red),
            (35_000, SignalColor::Green),
        ]
    );
}

#[test]
fn normal_tick_interval_is_100ms() {
    let shared = shared_at(0);
    let mut machine = StateMachine::new();

    let delay = machine.service(&shared, TestInstant(0));
    assert_eq!(delay.as_millis(), 100);
}

#[test]
fn warning_tracks_remaining_time_through_a_cycle() {
    let timer = MockTimeSource::new();
    let shared = shared_at(0);
    let mut machine = StateMachine::new();

    while timer.now().0 <= 36_000 {
        let delay = machine.service(&shared, timer.now());
        let state = shared.snapshot();
        let remaining = state.color_duration_ms - state.elapsed_ms;
        assert_eq!(
            state.warning_active,
            remaining <= 3_000,
            "at {} ms in {:?}",
            timer.now().0,
            state.color
        );
        timer.advance(delay);
    }
}

#[test]
fn late_tick_causes_a_single_transition() {
    let shared = shared_at(0);
    let mut machine = StateMachine::new();

    machine.service(&shared, TestInstant(0));
    machine.service(&shared, TestInstant(50_000));

    assert_eq!(machine.last_outcome(), TickOutcome::Advanced(SignalColor::Yellow));
    let state = shared.snapshot();
    assert_eq!(state.color, SignalColor::Yellow);
    assert_eq!(state.elapsed_ms, 0);
    assert_eq!(state.color_duration_ms, 5_000);
}

#[test]
fn entering_night_keeps_color_and_clears_timing() {
    let shared = shared_at(0);
    let mut machine = StateMachine::new();

    machine.service(&shared, TestInstant(0));
    machine.service(&shared, TestInstant(16_000));
    assert_eq!(shared.snapshot().color, SignalColor::Yellow);

    shared.toggle_mode(TestInstant(17_000));

    let state = shared.snapshot();
    assert_eq!(state.mode, OperatingMode::Night);
    assert_eq!(state.color, SignalColor::Yellow);
    assert_eq!(state.elapsed_ms, 0);
    assert!(!state.warning_active);
    assert!(!state.night_led_on);
    assert_eq!(state.night_phase_started_at, TestInstant(17_000));
}

#[test]
fn night_flash_lights_on_entry_then_flips_every_two_seconds() {
    let timer = MockTimeSource::new();
    let shared = shared_at(0);
    let mut machine = StateMachine::new();

    machine.service(&shared, timer.now());
    timer.set_time(TestInstant(5_000));
    shared.toggle_mode(timer.now());

    let mut flips = Vec::new();
    while timer.now().0 <= 11_000 {
        let delay = machine.service(&shared, timer.now());
        assert_eq!(delay.as_millis(), 50);
        if let TickOutcome::Flashed(on) = machine.last_outcome() {
            flips.push((timer.now().0, on));
        }
        timer.advance(delay);
    }

    assert_eq!(
        flips,
        vec![
            (5_000, true),
            (7_000, false),
            (9_000, true),
            (11_000, false),
        ]
    );
}

#[test]
fn night_mode_does_not_advance_colors() {
    let timer = MockTimeSource::new();
    let shared = shared_at(0);
    let mut machine = StateMachine::new();

    shared.toggle_mode(TestInstant(0));
    let transitions = run_until(&mut machine, &shared, &timer, 40_000);

    assert!(transitions.is_empty());
    assert_eq!(shared.snapshot().color, SignalColor::Green);
    assert_eq!(shared.snapshot().elapsed_ms, 0);
}

#[test]
fn leaving_night_restarts_green() {
    let shared = shared_at(0);
    let mut machine = StateMachine::new();

    machine.service(&shared, TestInstant(0));
    machine.service(&shared, TestInstant(15_000));
    machine.service(&shared, TestInstant(20_000));
    assert_eq!(shared.snapshot().color, SignalColor::Red);

    shared.toggle_mode(TestInstant(21_000));
    machine.service(&shared, TestInstant(21_000));
    assert!(shared.snapshot().night_led_on);

    assert_eq!(shared.toggle_mode(TestInstant(22_000)), OperatingMode::Normal);
    let state = shared.snapshot();
    assert_eq!(state.color, SignalColor::Green);
    assert_eq!(state.elapsed_ms, 0);
    assert_eq!(state.color_duration_ms, 15_000);
    assert!(!state.night_led_on);
    assert!(!state.warning_active);
}

#[test]
fn time_after_toggle_counts_from_the_toggle() {
    let shared = shared_at(0);
    let mut machine = StateMachine::new();

    shared.toggle_mode(TestInstant(0));
    machine.service(&shared, TestInstant(0));

    // Back to NORMAL between two state machine ticks.
    shared.toggle_mode(TestInstant(1_030));
    machine.service(&shared, TestInstant(1_100));

    assert_eq!(
        machine.last_outcome(),
        TickOutcome::ModeChanged(OperatingMode::Normal)
    );
    assert_eq!(shared.snapshot().elapsed_ms, 70);
}

#[test]
fn mode_change_wakes_a_pending_wait() {
    let shared = shared_at(0);

    shared.toggle_mode(TestInstant(10));
    assert_eq!(block_on(shared.wait_mode_change()), OperatingMode::Night);

    shared.toggle_mode(TestInstant(20));
    assert_eq!(block_on(shared.wait_mode_change()), OperatingMode::Normal);
}

#[test]
fn cleared_mode_change_does_not_wake() {
    let shared = shared_at(0);

    shared.toggle_mode(TestInstant(10));
    shared.clear_mode_change();

    let result = block_on(select(shared.wait_mode_change(), core::future::ready(())));
    assert!(matches!(result, Either::Second(())));
}
