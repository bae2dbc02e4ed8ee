use kurbo::{Point, Rect, Size};

use crate::math;
use crate::{Anchor, ItemView, LayoutState, Phase, RecyclerOptions, ViewHolder, Window};

/// The window engine: maps a scroll offset and viewport onto a range of item indexes and places
/// view holders inside the content area.
///
/// Geometry is expressed in content space (y-up, origin on the anchored edge, x centered).
/// In top-anchored mode the content offset ranges over `[0, limit]`; in bottom-anchored
/// ("reverse") mode over `[-limit, 0]`.
#[derive(Clone, Debug)]
pub struct LayoutManager {
    anchor: Anchor,
    spacing: f64,
    viewport: Size,
    row: Size,
    limit_bottom: f64,
    content_offset: f64,
    phase: Phase,
}

impl LayoutManager {
    pub fn new(options: &RecyclerOptions) -> Self {
        Self {
            anchor: options.anchor(),
            spacing: options.spacing.y,
            viewport: options.initial_viewport,
            row: Size::ZERO,
            limit_bottom: 0.0,
            content_offset: 0.0,
            phase: Phase::Idle,
        }
    }

    pub(crate) fn configure(&mut self, options: &RecyclerOptions) {
        self.anchor = options.anchor();
        self.spacing = options.spacing.y;
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_resetting(&self) -> bool {
        self.phase == Phase::Resetting
    }

    pub(crate) fn begin_reset(&mut self) {
        self.phase = Phase::Resetting;
    }

    pub(crate) fn end_reset(&mut self) {
        self.phase = Phase::Idle;
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub(crate) fn set_viewport(&mut self, viewport: Size, item_count: usize) {
        self.viewport = viewport;
        self.update_limit(item_count);
    }

    /// Rendered row size measured during the last reset (spacing excluded).
    pub fn row(&self) -> Size {
        self.row
    }

    /// Distance between the pivots of two consecutive rows.
    pub fn row_size(&self) -> f64 {
        self.row.height + self.spacing
    }

    /// `item_count * row_size - viewport_height - spacing`, as measured.
    ///
    /// Negative when the content is shorter than the viewport.
    pub fn limit_bottom(&self) -> f64 {
        self.limit_bottom
    }

    /// The maximum scroll distance, never negative.
    pub fn scroll_extent(&self) -> f64 {
        self.limit_bottom.max(0.0)
    }

    pub fn content_offset(&self) -> f64 {
        self.content_offset
    }

    pub(crate) fn set_content_offset(&mut self, offset: f64) {
        self.content_offset = offset;
    }

    pub fn state(&self) -> LayoutState {
        LayoutState {
            content_offset: self.content_offset,
            row_size: self.row_size(),
            limit_bottom: self.limit_bottom,
            viewport: self.viewport,
        }
    }

    /// Derives row geometry from a freshly bound view and recomputes the content extent.
    pub(crate) fn measure(&mut self, row: Size, item_count: usize) {
        self.row = row;
        self.update_limit(item_count);
        rdebug!(
            row_height = row.height,
            row_size = self.row_size(),
            limit_bottom = self.limit_bottom,
            item_count,
            "measured row geometry"
        );
    }

    /// Recomputes the content extent for `item_count` rows of the measured size.
    pub(crate) fn update_limit(&mut self, item_count: usize) {
        self.limit_bottom =
            item_count as f64 * self.row_size() - self.viewport.height - self.spacing;
    }

    pub fn first_visible_index(&self) -> usize {
        let row = self.row_size();
        if row <= 0.0 {
            return 0;
        }
        let extent = self.scroll_extent();
        match self.anchor {
            Anchor::Top => {
                math::round_ties_even(self.content_offset.clamp(0.0, extent) / row) as usize
            }
            Anchor::Bottom => {
                (-math::round_ties_even(self.content_offset.clamp(-extent, 0.0) / row)) as usize
            }
        }
    }

    /// Number of whole rows that fit in the viewport.
    pub fn screen_capacity(&self) -> usize {
        let row = self.row_size();
        if row <= 0.0 {
            return 0;
        }
        math::floor(self.viewport.height / row) as usize
    }

    /// The index range that should be attached for the current offset.
    pub fn window(&self, item_count: usize) -> Window {
        if item_count == 0 {
            return Window::default();
        }
        let first = self.first_visible_index();
        let end = first
            .saturating_add(self.screen_capacity())
            .saturating_add(1)
            .min(item_count);
        Window::new(first.saturating_sub(1), end)
    }

    /// The content offset that brings `index` to the anchored edge (unclamped).
    pub fn offset_for_index(&self, index: usize) -> f64 {
        let distance = self.row_size() * index as f64;
        match self.anchor {
            Anchor::Top => distance,
            Anchor::Bottom => -distance,
        }
    }

    /// The content offset at `fraction` of the scroll extent (unclamped).
    pub fn offset_for_fraction(&self, fraction: f64) -> f64 {
        let distance = fraction * self.scroll_extent();
        match self.anchor {
            Anchor::Top => distance,
            Anchor::Bottom => -distance,
        }
    }

    /// Clamps `offset` so the list cannot overscroll past either end.
    pub fn clamp(&self, offset: f64) -> f64 {
        let extent = self.scroll_extent();
        match self.anchor {
            Anchor::Top => {
                if offset < 0.0 {
                    0.0
                } else if offset > extent {
                    extent
                } else {
                    offset
                }
            }
            Anchor::Bottom => {
                if offset > 0.0 {
                    0.0
                } else if offset < -extent {
                    -extent
                } else {
                    offset
                }
            }
        }
    }

    pub(crate) fn clamp_offset(&mut self) {
        self.content_offset = self.clamp(self.content_offset);
    }

    /// Whether the content offset lies beyond the last row.
    pub fn is_past_end(&self) -> bool {
        let extent = self.scroll_extent();
        match self.anchor {
            Anchor::Top => self.content_offset > extent,
            Anchor::Bottom => self.content_offset < -extent,
        }
    }

    /// The viewport rectangle in content space.
    pub fn viewport_rect(&self) -> Rect {
        let half = self.viewport.width / 2.0;
        let h = self.viewport.height;
        let o = self.content_offset;
        match self.anchor {
            Anchor::Top => Rect::new(-half, -o - h, half, -o),
            Anchor::Bottom => Rect::new(-half, -o, half, -o + h),
        }
    }

    /// Places `holder` at its index.
    pub fn position_view<V: ItemView>(&self, holder: &mut ViewHolder<V>) {
        let size = holder.view().size();
        let step = self.row_size() * holder.current_index() as f64;
        let half = size.width / 2.0;
        let (pivot, bounds) = match self.anchor {
            Anchor::Top => (
                Point::new(0.0, -step),
                Rect::new(-half, -step - size.height, half, -step),
            ),
            Anchor::Bottom => (
                Point::new(0.0, step),
                Rect::new(-half, step, half, step + size.height),
            ),
        };
        holder.place(bounds, pivot);
    }

    pub(crate) fn attach<V: ItemView>(&self, holder: &mut ViewHolder<V>) {
        holder.attach(self.anchor);
        self.position_view(holder);
    }
}
