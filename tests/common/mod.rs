//! Shared test infrastructure for traffic-signal integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use palette::Srgb;
use traffic_signal::{
    LedPanel, ModeButton, SharedSignal, StatusLed, TextDisplay, TimeDuration, TimeInstant,
    TimeSource, ToneOutput,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0.saturating_sub(earlier.0))
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_add(duration.0).map(TestInstant)
    }
}

/// Shared holder as the host tests use it.
pub type Shared = SharedSignal<NoopRawMutex, TestInstant>;

pub fn shared_at(millis: u64) -> Shared {
    SharedSignal::new(TestInstant(millis))
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given duration
    pub fn advance(&self, duration: TestDuration) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + duration.0));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Devices
//
// Each mock is a cheap handle onto shared recordings, so a test keeps one
// clone for inspection and hands the other to the component under test.
// ============================================================================

/// Mock LED panel that records every frame
#[derive(Clone, Default)]
pub struct MockPanel {
    frames: Rc<RefCell<Vec<Srgb>>>,
}

impl MockPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<Srgb> {
        self.frames.borrow().clone()
    }

    pub fn last_frame(&self) -> Option<Srgb> {
        self.frames.borrow().last().copied()
    }
}

impl LedPanel for MockPanel {
    fn set_all_pixels(&mut self, color: Srgb) {
        self.frames.borrow_mut().push(color);
    }
}

/// One call made on a [`MockDisplay`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayOp {
    Clear,
    Text(String, i32, i32),
    Flush,
}

/// Mock text display that records every call
#[derive(Clone, Default)]
pub struct MockDisplay {
    ops: Rc<RefCell<Vec<DisplayOp>>>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> Vec<DisplayOp> {
        self.ops.borrow().clone()
    }

    /// Text drawn since the most recent clear, in draw order.
    pub fn visible_text(&self) -> Vec<(String, i32, i32)> {
        let ops = self.ops.borrow();
        let start = ops
            .iter()
            .rposition(|op| *op == DisplayOp::Clear)
            .map_or(0, |index| index + 1);

        ops[start..]
            .iter()
            .filter_map(|op| match op {
                DisplayOp::Text(text, x, y) => Some((text.clone(), *x, *y)),
                _ => None,
            })
            .collect()
    }

    pub fn shows(&self, text: &str) -> bool {
        self.visible_text().iter().any(|(line, _, _)| line == text)
    }

    pub fn reset(&self) {
        self.ops.borrow_mut().clear();
    }
}

impl TextDisplay for MockDisplay {
    fn clear(&mut self) {
        self.ops.borrow_mut().push(DisplayOp::Clear);
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        self.ops
            .borrow_mut()
            .push(DisplayOp::Text(String::from(text), x, y));
    }

    fn flush(&mut self) {
        self.ops.borrow_mut().push(DisplayOp::Flush);
    }
}

/// One call made on a [`MockBuzzer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuzzerOp {
    Frequency(u32),
    Duty(u8),
    Stop,
}

/// Mock buzzer that records every call
#[derive(Clone, Default)]
pub struct MockBuzzer {
    ops: Rc<RefCell<Vec<BuzzerOp>>>,
}

impl MockBuzzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> Vec<BuzzerOp> {
        self.ops.borrow().clone()
    }

    /// Frequencies the buzzer was started at, in order.
    pub fn tones(&self) -> Vec<u32> {
        self.ops
            .borrow()
            .iter()
            .filter_map(|op| match op {
                BuzzerOp::Frequency(hz) => Some(*hz),
                _ => None,
            })
            .collect()
    }

    pub fn reset(&self) {
        self.ops.borrow_mut().clear();
    }
}

impl ToneOutput for MockBuzzer {
    fn set_frequency(&mut self, hz: u32) {
        self.ops.borrow_mut().push(BuzzerOp::Frequency(hz));
    }

    fn set_duty(&mut self, percent: u8) {
        self.ops.borrow_mut().push(BuzzerOp::Duty(percent));
    }

    fn stop(&mut self) {
        self.ops.borrow_mut().push(BuzzerOp::Stop);
    }
}

/// Mock status LED that records every (red, green, blue) setting
#[derive(Clone, Default)]
pub struct MockStatusLed {
    history: Rc<RefCell<Vec<(bool, bool, bool)>>>,
}

impl MockStatusLed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<(bool, bool, bool)> {
        self.history.borrow().clone()
    }

    pub fn last(&self) -> Option<(bool, bool, bool)> {
        self.history.borrow().last().copied()
    }
}

impl StatusLed for MockStatusLed {
    fn set(&mut self, red: bool, green: bool, blue: bool) {
        self.history.borrow_mut().push((red, green, blue));
    }
}

/// Mock button whose level the test drives
#[derive(Clone)]
pub struct MockButton {
    level: Rc<Cell<bool>>,
}

impl MockButton {
    /// Starts released (pulled high).
    pub fn new() -> Self {
        Self {
            level: Rc::new(Cell::new(true)),
        }
    }

    pub fn press(&self) {
        self.level.set(false);
    }

    pub fn release(&self) {
        self.level.set(true);
    }
}

impl ModeButton for MockButton {
    fn read_button(&mut self) -> bool {
        self.level.get()
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Compare two colors with floating-point tolerance
pub fn colors_equal(a: Srgb, b: Srgb) -> bool {
    const EPSILON: f32 = 0.001;
    (a.red - b.red).abs() < EPSILON
        && (a.green - b.green).abs() < EPSILON
        && (a.blue - b.blue).abs() < EPSILON
}
