use kurbo::{Size, Vec2};

use crate::Anchor;

/// Configuration for [`crate::Recycler`].
///
/// Tier capacities are read on every reset, so changing them through
/// [`crate::Recycler::update_options`] takes effect immediately.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecyclerOptions {
    /// Per-second velocity multiplier applied to inertial scrolling.
    pub deceleration_rate: f64,
    /// Gap between rows. Only `spacing.y` affects the vertical layout.
    pub spacing: Vec2,
    /// Grow the list upward from the bottom edge instead of downward from the top edge.
    pub is_reverse: bool,
    /// Maximum number of recycled (unbound) views kept for reassignment.
    pub pool_size: usize,
    /// Maximum number of detached views kept bound for cheap reattachment.
    ///
    /// Larger values trade memory for fewer rebinds when the scroll direction reverses.
    pub cache_size: usize,
    /// The viewport size used until the host reports one via `set_viewport`.
    pub initial_viewport: Size,
}

impl Default for RecyclerOptions {
    fn default() -> Self {
        Self {
            deceleration_rate: 0.5,
            spacing: Vec2::ZERO,
            is_reverse: false,
            pool_size: 3,
            cache_size: 3,
            initial_viewport: Size::ZERO,
        }
    }
}

impl RecyclerOptions {
    pub fn new(initial_viewport: Size) -> Self {
        Self {
            initial_viewport,
            ..Self::default()
        }
    }

    pub fn anchor(&self) -> Anchor {
        Anchor::from_reverse(self.is_reverse)
    }

    pub fn with_deceleration_rate(mut self, deceleration_rate: f64) -> Self {
        self.deceleration_rate = deceleration_rate;
        self
    }

    pub fn with_spacing(mut self, spacing: Vec2) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_reverse(mut self, is_reverse: bool) -> Self {
        self.is_reverse = is_reverse;
        self
    }

    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    pub fn with_cache_size(mut self, cache_size: usize) -> Self {
        self.cache_size = cache_size;
        self
    }

    pub fn with_initial_viewport(mut self, initial_viewport: Size) -> Self {
        self.initial_viewport = initial_viewport;
        self
    }
}
