use recycler::kurbo::Size;
use recycler::{DataSource, Recycler, RecyclerOptions};

use crate::{
    CancelToken, DEFAULT_SMOOTH_SCROLL_SPEED, DataObservable, Inertia, ScrollAnimation,
    SmoothScroll,
};

/// Frame time assumed for the first tick of an animation.
const DEFAULT_FRAME_SECONDS: f64 = 1.0 / 60.0;

/// Pointer interaction state as reported by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerState {
    pub is_down: bool,
    pub is_dragging: bool,
}

#[derive(Debug)]
struct ScrollTask {
    animation: ScrollAnimation,
    token: CancelToken,
}

/// A framework-neutral façade over a [`Recycler`] that adds animated scrolling.
///
/// This type does not hold any UI objects. Hosts drive it by calling:
/// - `on_viewport` / `on_scroll` when the scroll container changes
/// - `on_pointer_down` / `on_drag` / `on_pointer_up` for user interaction
/// - `tick(now_ms)` once per frame while [`Adapter::is_animating`] returns `true`
///
/// At most one animation runs at a time. Starting a new one, pressing or dragging cancels the
/// running one at its next step boundary.
pub struct Adapter<D: DataSource> {
    recycler: Recycler<D>,
    task: Option<ScrollTask>,
    pointer: PointerState,
    smooth_scroll_speed: f64,
    last_tick_ms: Option<u64>,
}

impl<D: DataSource> Adapter<D> {
    pub fn new(source: D, options: RecyclerOptions) -> Self {
        Self::from_recycler(Recycler::new(source, options))
    }

    pub fn from_recycler(recycler: Recycler<D>) -> Self {
        Self {
            recycler,
            task: None,
            pointer: PointerState::default(),
            smooth_scroll_speed: DEFAULT_SMOOTH_SCROLL_SPEED,
            last_tick_ms: None,
        }
    }

    pub fn recycler(&self) -> &Recycler<D> {
        &self.recycler
    }

    pub fn recycler_mut(&mut self) -> &mut Recycler<D> {
        &mut self.recycler
    }

    pub fn into_recycler(self) -> Recycler<D> {
        self.recycler
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn smooth_scroll_speed(&self) -> f64 {
        self.smooth_scroll_speed
    }

    /// Sets the distance covered per frame by smooth scrolls started afterwards.
    pub fn set_smooth_scroll_speed(&mut self, speed: f64) {
        self.smooth_scroll_speed = speed;
    }

    pub fn with_smooth_scroll_speed(mut self, speed: f64) -> Self {
        self.smooth_scroll_speed = speed;
        self
    }

    pub fn is_animating(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.token.is_cancelled())
    }

    pub fn animation(&self) -> Option<&ScrollAnimation> {
        self.task
            .as_ref()
            .filter(|t| !t.token.is_cancelled())
            .map(|t| &t.animation)
    }

    /// A handle that can cancel the running animation from elsewhere.
    pub fn cancel_token(&self) -> Option<CancelToken> {
        self.task.as_ref().map(|t| t.token.clone())
    }

    pub fn cancel_animation(&mut self) {
        if let Some(task) = self.task.take() {
            rtrace!("animation cancelled");
            task.token.cancel();
        }
    }

    /// Cancels any animation and rebuilds the window at index 0.
    pub fn notify_dataset_changed(&mut self) {
        self.cancel_animation();
        self.recycler.notify_dataset_changed();
    }

    /// Mutates the data source, then rebuilds the window at index 0.
    pub fn submit(&mut self, f: impl FnOnce(&mut D)) {
        self.cancel_animation();
        self.recycler.submit(f);
    }

    pub fn on_viewport(&mut self, viewport: Size) {
        self.recycler.set_viewport(viewport);
    }

    /// Call this when the host's scroll container reports a new offset.
    ///
    /// Returns the offset the recycler settled on, which the host should write back when it
    /// differs.
    pub fn on_scroll(&mut self, offset: f64) -> f64 {
        self.recycler.set_content_offset(offset);
        self.recycler.content_offset()
    }

    /// A press halts any running animation immediately.
    pub fn on_pointer_down(&mut self) {
        self.pointer.is_down = true;
        self.cancel_animation();
    }

    /// A drag halts any running animation immediately.
    pub fn on_drag(&mut self) {
        self.pointer.is_dragging = true;
        self.cancel_animation();
    }

    /// Ends the interaction. A non-zero release `velocity` (units per second) starts inertia.
    pub fn on_pointer_up(&mut self, velocity: f64) {
        let was_dragging = self.pointer.is_dragging;
        self.pointer = PointerState::default();
        if was_dragging && velocity != 0.0 {
            self.fling(velocity);
        }
    }

    /// Starts inertial scrolling with `velocity` units per second, decaying by the
    /// deceleration rate from the recycler options.
    pub fn fling(&mut self, velocity: f64) {
        let rate = self.recycler.options().deceleration_rate;
        self.start(ScrollAnimation::Inertia(Inertia::new(velocity, rate)));
    }

    /// Starts a smooth scroll by `delta` from the current offset.
    ///
    /// Returns the clamped target offset.
    pub fn scroll_by(&mut self, delta: f64) -> f64 {
        let target = self.recycler.content_offset() + delta;
        self.smooth_scroll_to_offset(target)
    }

    /// Starts a smooth scroll to `fraction` (`0.0..=1.0`) of the scroll extent.
    ///
    /// Returns the clamped target offset.
    pub fn scroll_to(&mut self, fraction: f64) -> f64 {
        let target = self.recycler.layout().offset_for_fraction(fraction);
        self.smooth_scroll_to_offset(target)
    }

    /// Jumps to `index` without animation.
    ///
    /// Returns `false` when `index > item_count`.
    pub fn scroll_to_index(&mut self, index: usize) -> bool {
        self.cancel_animation();
        self.recycler.scroll_to_index(index)
    }

    /// Starts a smooth scroll that brings `index` to the anchored edge.
    ///
    /// Returns the clamped target offset.
    pub fn smooth_scroll_to_index(&mut self, index: usize) -> f64 {
        let target = self.recycler.offset_for_index(index);
        self.smooth_scroll_to_offset(target)
    }

    /// Starts a smooth scroll to `offset`.
    ///
    /// Returns the clamped target offset.
    pub fn smooth_scroll_to_offset(&mut self, offset: f64) -> f64 {
        let target = self.recycler.layout().clamp(offset);
        let speed = self.smooth_scroll_speed;
        self.start(ScrollAnimation::Smooth(SmoothScroll::new(target, speed)));
        target
    }

    fn start(&mut self, animation: ScrollAnimation) {
        self.cancel_animation();
        rdebug!(
            offset = self.recycler.content_offset(),
            ?animation,
            "animation started"
        );
        self.task = Some(ScrollTask {
            animation,
            token: CancelToken::new(),
        });
        self.last_tick_ms = None;
    }

    /// Advances the active animation by one frame.
    ///
    /// Returns the offset applied this frame, or `None` when nothing is animating. The
    /// animation ends once it reaches its target, its velocity dies out, or the recycler adjusts
    /// the requested offset (boundary clamp or rebuild).
    pub fn tick(&mut self, now_ms: u64) -> Option<f64> {
        let dt = match self.last_tick_ms.replace(now_ms) {
            Some(prev) => now_ms.saturating_sub(prev) as f64 / 1000.0,
            None => DEFAULT_FRAME_SECONDS,
        };

        let cancelled = match &self.task {
            None => return None,
            Some(task) => task.token.is_cancelled(),
        };
        if cancelled {
            self.task = None;
            return None;
        }

        let current = self.recycler.content_offset();
        let next = self
            .task
            .as_mut()
            .and_then(|task| task.animation.step(current, dt));
        let Some(requested) = next else {
            rtrace!(offset = current, "animation finished");
            self.task = None;
            return None;
        };

        self.recycler.set_content_offset(requested);
        let applied = self.recycler.content_offset();
        let done = self
            .task
            .as_ref()
            .is_none_or(|task| task.animation.is_done(applied));
        if applied != requested || done {
            rtrace!(requested, applied, "animation stopped");
            self.task = None;
        }
        Some(applied)
    }
}

impl<D: DataSource> DataObservable for Adapter<D> {
    fn notify_dataset_changed(&mut self) {
        Adapter::notify_dataset_changed(self);
    }
}

impl<D: DataSource> core::fmt::Debug for Adapter<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Adapter")
            .field("recycler", &self.recycler)
            .field("animation", &self.animation())
            .field("pointer", &self.pointer)
            .field("smooth_scroll_speed", &self.smooth_scroll_speed)
            .finish_non_exhaustive()
    }
}
