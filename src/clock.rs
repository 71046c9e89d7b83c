//! Animation time and the host-side scheduling seams.
//!
//! A chart never spins its own loop. It asks a [`FrameScheduler`] for the
//! next frame and is called back by the host when that frame is due, so the
//! same chart can be driven by a display-linked GUI or by hand in tests.

use std::collections::BTreeSet;

/// Per-frame increment at unit speed, before the base rate is applied.
pub const FRAME_STEP: f64 = 0.006;
/// Base scroll rate multiplied with the caller's speed factor.
pub const BASE_RATE: f64 = 0.6;
/// Bounds on `BASE_RATE * speed_factor`.
pub const RATE_BOUNDS: (f64, f64) = (0.2, 3.0);

/// Monotonic phase accumulator owned by one chart instance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationClock {
    t: f64,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock positioned at an arbitrary time, for snapshots.
    pub fn at(t: f64) -> Self {
        Self { t }
    }

    pub fn time(&self) -> f64 {
        self.t
    }

    /// Step taken per frame for the given speed factor.
    pub fn step_for(speed_factor: f64) -> f64 {
        let (lo, hi) = RATE_BOUNDS;
        FRAME_STEP * (BASE_RATE * speed_factor).clamp(lo, hi)
    }

    /// Advance by one frame.
    pub fn advance(&mut self, speed_factor: f64) {
        self.t += Self::step_for(speed_factor);
    }

    /// Advance by a raw amount (the decorative wave uses its own step).
    pub fn advance_by(&mut self, dt: f64) {
        self.t += dt;
    }
}

/// Opaque handle for one requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameToken(pub u64);

/// Opaque handle for one resize subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Subscription(pub u64);

/// Host primitive for "call me on the next frame".
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameToken;
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Host primitive for viewport resize notifications.
pub trait ResizeNotifier {
    fn subscribe_resize(&mut self) -> Subscription;
    fn unsubscribe_resize(&mut self, sub: Subscription);
}

/// Everything a chart needs from its environment.
pub trait Host: FrameScheduler + ResizeNotifier {
    /// Whether a drawing context could be acquired. Hosts without one make
    /// the chart a no-op instead of an error.
    fn context_available(&self) -> bool {
        true
    }
}

impl<T: FrameScheduler + ?Sized> FrameScheduler for &mut T {
    fn request_frame(&mut self) -> FrameToken {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        (**self).cancel_frame(token)
    }
}

impl<T: ResizeNotifier + ?Sized> ResizeNotifier for &mut T {
    fn subscribe_resize(&mut self) -> Subscription {
        (**self).subscribe_resize()
    }

    fn unsubscribe_resize(&mut self, sub: Subscription) {
        (**self).unsubscribe_resize(sub)
    }
}

impl<T: Host + ?Sized> Host for &mut T {
    fn context_available(&self) -> bool {
        (**self).context_available()
    }
}

/// Deterministic host that records requests; frames only happen when the
/// test (or a headless driver) fires them.
#[derive(Debug, Default)]
pub struct ManualHost {
    next_id: u64,
    pending: BTreeSet<FrameToken>,
    subscriptions: BTreeSet<Subscription>,
    cancelled: usize,
    no_context: bool,
}

impl ManualHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host whose drawing context can never be acquired.
    pub fn without_context() -> Self {
        Self {
            no_context: true,
            ..Self::default()
        }
    }

    /// Remove and return the oldest pending frame, if any.
    pub fn take_frame(&mut self) -> Option<FrameToken> {
        self.pending.pop_first()
    }

    pub fn pending_frames(&self) -> usize {
        self.pending.len()
    }

    pub fn resize_listeners(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn cancelled_frames(&self) -> usize {
        self.cancelled
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl FrameScheduler for ManualHost {
    fn request_frame(&mut self) -> FrameToken {
        let token = FrameToken(self.next());
        self.pending.insert(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if self.pending.remove(&token) {
            self.cancelled += 1;
        }
    }
}

impl ResizeNotifier for ManualHost {
    fn subscribe_resize(&mut self) -> Subscription {
        let sub = Subscription(self.next());
        self.subscriptions.insert(sub);
        sub
    }

    fn unsubscribe_resize(&mut self, sub: Subscription) {
        self.subscriptions.remove(&sub);
    }
}

impl Host for ManualHost {
    fn context_available(&self) -> bool {
        !self.no_context
    }
}
