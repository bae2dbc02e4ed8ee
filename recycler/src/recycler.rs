use alloc::vec::Vec;
use core::{fmt, mem};

use kurbo::Size;

use crate::{
    Cache, DataSource, ItemView, LayoutManager, LayoutState, Phase, Pool, RecyclerOptions,
    TierSnapshot, ViewHolder, Window,
};

/// A headless, tiered view recycler.
///
/// Owns every view holder and moves them between three tiers:
/// - attached: bound and positioned for an in-window index,
/// - cache: detached but still bound (reattached without a rebind),
/// - pool: unbound, reassigned to any index with a rebind.
///
/// The host pushes scroll offsets and viewport sizes in and reads the (clamped) content offset
/// back. Memory stays bounded by `window + cache_size + pool_size` views regardless of
/// `item_count`.
///
/// For animated scrolling and pointer handling, see the `recycler-adapter` crate.
pub struct Recycler<D: DataSource> {
    source: D,
    options: RecyclerOptions,
    layout: LayoutManager,
    attached: Vec<ViewHolder<D::View>>,
    cache: Cache<D::View>,
    pool: Pool<D::View>,
}

impl<D: DataSource> Recycler<D> {
    /// Creates a recycler and builds the initial window at index 0.
    pub fn new(source: D, options: RecyclerOptions) -> Self {
        rdebug!(
            pool_size = options.pool_size,
            cache_size = options.cache_size,
            is_reverse = options.is_reverse,
            "Recycler::new"
        );
        let mut recycler = Self {
            source,
            layout: LayoutManager::new(&options),
            attached: Vec::new(),
            cache: Cache::new(options.cache_size),
            pool: Pool::new(options.pool_size),
            options,
        };
        recycler.reset(0);
        recycler
    }

    pub fn options(&self) -> &RecyclerOptions {
        &self.options
    }

    /// Clones the current options, applies `f`, then rebuilds the window at the current first
    /// visible index so new capacities and geometry take effect.
    pub fn update_options(&mut self, f: impl FnOnce(&mut RecyclerOptions)) {
        // With a fresh extent the first visible index never exceeds the item count.
        self.layout.update_limit(self.source.item_count());
        let first = self.layout.first_visible_index();
        f(&mut self.options);
        self.layout.configure(&self.options);
        self.reset(first);
    }

    pub fn source(&self) -> &D {
        &self.source
    }

    /// Mutable access to the data source.
    ///
    /// Changing the dataset through this reference does not rebuild the window; call
    /// [`Self::notify_dataset_changed`] afterwards, or use [`Self::submit`].
    pub fn source_mut(&mut self) -> &mut D {
        &mut self.source
    }

    pub fn into_source(self) -> D {
        self.source
    }

    pub fn item_count(&self) -> usize {
        self.source.item_count()
    }

    pub fn layout(&self) -> &LayoutManager {
        &self.layout
    }

    pub fn layout_state(&self) -> LayoutState {
        self.layout.state()
    }

    pub fn phase(&self) -> Phase {
        self.layout.phase()
    }

    pub fn content_offset(&self) -> f64 {
        self.layout.content_offset()
    }

    pub fn limit_bottom(&self) -> f64 {
        self.layout.limit_bottom()
    }

    pub fn first_visible_index(&self) -> usize {
        self.layout.first_visible_index()
    }

    pub fn screen_capacity(&self) -> usize {
        self.layout.screen_capacity()
    }

    /// The index range the attached tier should cover at the current offset.
    pub fn window(&self) -> Window {
        self.layout.window(self.source.item_count())
    }

    pub fn attached(&self) -> &[ViewHolder<D::View>] {
        &self.attached
    }

    pub fn cache(&self) -> &Cache<D::View> {
        &self.cache
    }

    pub fn pool(&self) -> &Pool<D::View> {
        &self.pool
    }

    pub fn snapshot(&self) -> TierSnapshot {
        TierSnapshot {
            attached: self.attached.iter().map(|h| h.current_index()).collect(),
            cache: self.cache.iter().map(|h| h.current_index()).collect(),
            pool: self.pool.iter().map(|h| h.current_index()).collect(),
        }
    }

    /// Full rebuild at index 0.
    pub fn notify_dataset_changed(&mut self) {
        self.reset(0);
    }

    /// Mutates the data source, then rebuilds the whole window at index 0.
    ///
    /// There is no diffing: every attached view is rebound.
    pub fn submit(&mut self, f: impl FnOnce(&mut D)) {
        f(&mut self.source);
        self.notify_dataset_changed();
    }

    /// Updates the viewport size and reacts as if the content had scrolled.
    pub fn set_viewport(&mut self, viewport: Size) {
        if self.layout.viewport() == viewport {
            return;
        }
        self.layout.set_viewport(viewport, self.source.item_count());
        self.on_scroll();
    }

    /// Applies a scroll offset reported by the host's scroll container.
    ///
    /// The offset may be adjusted (clamped, or moved by a rebuild); read it back with
    /// [`Self::content_offset`].
    pub fn set_content_offset(&mut self, offset: f64) {
        rtrace!(offset, "set_content_offset");
        self.layout.set_content_offset(offset);
        self.on_scroll();
    }

    /// Shifts the content offset instantly by `delta`.
    pub fn scroll_by(&mut self, delta: f64) {
        let offset = self.layout.content_offset() + delta;
        self.set_content_offset(offset);
    }

    /// Jumps to `index`: a full rebuild anchored at `index`, settled at the clamped offset.
    ///
    /// Returns `false` (and changes nothing) when `index > item_count`.
    pub fn scroll_to_index(&mut self, index: usize) -> bool {
        self.reset(index)
    }

    /// The clamped content offset that brings `index` to the anchored edge.
    pub fn offset_for_index(&self, index: usize) -> f64 {
        self.layout.clamp(self.layout.offset_for_index(index))
    }

    /// Reacts to a content offset change.
    ///
    /// Ignored while a reset is in progress. When no attached view is visible anymore the jump
    /// is treated as discontinuous and the window is rebuilt from the nearest boundary index;
    /// otherwise the window is recomputed incrementally and the offset clamped.
    pub fn on_scroll(&mut self) {
        if self.layout.is_resetting() {
            rtrace!("on_scroll ignored while resetting");
            return;
        }
        self.layout.update_limit(self.source.item_count());
        if self.is_state_valid() {
            self.settle();
        } else {
            self.invalidate();
        }
    }

    fn is_state_valid(&self) -> bool {
        if self.source.item_count() == 0 {
            return true;
        }
        let viewport = self.layout.viewport_rect();
        self.attached.iter().any(|h| !h.is_hidden(viewport))
    }

    fn invalidate(&mut self) {
        let count = self.source.item_count();
        let target = if self.layout.is_past_end() {
            count.saturating_sub(1)
        } else {
            0
        };
        rdebug!(
            offset = self.layout.content_offset(),
            target,
            "teleport scroll, rebuilding window"
        );
        self.reset(target);
    }

    fn settle(&mut self) {
        self.update_scrap();
        self.layout.clamp_offset();
    }

    /// Recomputes the attached tier for the current window.
    ///
    /// Every in-window index resolves, in priority order, to the attached holder already bound
    /// to it, a cached holder bound to it, a pooled holder (rebound), or a new view (bound).
    /// Attached holders left over are detached into the cache.
    pub fn update_scrap(&mut self) {
        let window = self.window();
        let mut next = Vec::with_capacity(window.len());
        for index in window.indexes() {
            let holder = self.resolve(index);
            next.push(holder);
        }
        let detached = mem::replace(&mut self.attached, next);
        for holder in detached {
            self.cache.offer(holder, &mut self.pool);
        }
        rtrace!(
            start = window.start_index,
            end = window.end_index,
            cache = self.cache.len(),
            pool = self.pool.len(),
            "update_scrap"
        );
    }

    fn resolve(&mut self, index: usize) -> ViewHolder<D::View> {
        if let Some(pos) = self
            .attached
            .iter()
            .position(|h| h.current_index() == index)
        {
            return self.attached.remove(pos);
        }

        if let Some(mut holder) = self.cache.try_take_by_index(index) {
            self.layout.attach(&mut holder);
            return holder;
        }

        if let Some(mut holder) = self.pool.try_take() {
            holder.reassign(index);
            self.source.bind_view(holder.view_mut(), index);
            self.layout.attach(&mut holder);
            return holder;
        }

        self.create_bound(index)
    }

    fn create_bound(&mut self, index: usize) -> ViewHolder<D::View> {
        let mut holder = ViewHolder::new(self.source.create_view(), index);
        self.source.bind_view(holder.view_mut(), index);
        self.layout.attach(&mut holder);
        holder
    }

    /// Rebuilds every tier with the window seeded at `pos`, then settles the window around the
    /// clamped offset.
    ///
    /// Returns `false` without touching any state when `pos > item_count`. On a non-empty
    /// dataset `pos == item_count` anchors at the last item.
    pub fn reset(&mut self, pos: usize) -> bool {
        let count = self.source.item_count();
        if pos > count {
            rwarn!(pos, count, "reset target out of range");
            return false;
        }

        self.layout.begin_reset();
        self.clear();

        if count == 0 {
            self.layout.update_limit(0);
            self.layout.set_content_offset(0.0);
        } else {
            let pos = pos.min(count - 1);
            let mut first = ViewHolder::new(self.source.create_view(), pos);
            self.source.bind_view(first.view_mut(), pos);
            self.layout.measure(first.view().size(), count);
            self.layout
                .set_content_offset(self.layout.offset_for_index(pos));
            self.layout.attach(&mut first);
            self.attached.push(first);

            let end = pos
                .saturating_add(self.layout.screen_capacity())
                .saturating_add(1)
                .min(count);
            for index in pos + 1..end {
                let holder = self.create_bound(index);
                self.attached.push(holder);
            }
            self.layout.clamp_offset();
        }

        rdebug!(
            pos,
            count,
            attached = self.attached.len(),
            offset = self.layout.content_offset(),
            "reset"
        );
        self.layout.end_reset();
        self.settle();
        true
    }

    fn clear(&mut self) {
        for holder in self.attached.drain(..) {
            holder.destroy();
        }
        for holder in self.cache.drain() {
            holder.destroy();
        }
        for holder in self.pool.drain() {
            holder.destroy();
        }
        self.cache = Cache::new(self.options.cache_size);
        self.pool = Pool::new(self.options.pool_size);
    }
}

impl<D: DataSource> fmt::Debug for Recycler<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recycler")
            .field("options", &self.options)
            .field("layout", &self.layout)
            .field("tiers", &self.snapshot())
            .finish_non_exhaustive()
    }
}
