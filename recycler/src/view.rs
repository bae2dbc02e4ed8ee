use kurbo::{Point, Rect, Size};

use crate::{Anchor, ViewState};

/// A host-provided visual that can be positioned inside the list's content area.
///
/// Only [`ItemView::size`] and [`ItemView::set_position`] are required. The remaining hooks let
/// a host mirror tier transitions in its own render tree (activate/deactivate, reparent, etc).
pub trait ItemView {
    /// Rendered size of the view, scale included.
    fn size(&self) -> Size;

    /// Moves the view's pivot to `position` (content space, y-up).
    fn set_position(&mut self, position: Point);

    /// The view joined the attached set. `anchor` is the edge used as the view's pivot.
    fn on_attach(&mut self, anchor: Anchor) {
        let _ = anchor;
    }

    /// The view was detached into the cache. It is still bound.
    fn on_detach(&mut self) {}

    /// The view was moved to the pool and will be rebound before it is shown again.
    fn on_recycle(&mut self) {}

    /// Returns `true` when none of the corners of `bounds` lie inside `viewport`.
    fn is_hidden(&self, bounds: Rect, viewport: Rect) -> bool {
        !corners(bounds).iter().any(|&p| viewport.contains(p))
    }

    /// Releases the view from the host permanently.
    fn destroy(self)
    where
        Self: Sized,
    {
    }
}

/// Caller-supplied callbacks that produce and bind views for a concrete list.
pub trait DataSource {
    type View: ItemView;

    fn item_count(&self) -> usize;

    /// Creates a fresh, unbound view.
    fn create_view(&mut self) -> Self::View;

    /// Binds the item at `index` into `view`.
    ///
    /// The recycler never catches failures raised here.
    fn bind_view(&mut self, view: &mut Self::View, index: usize);
}

fn corners(r: Rect) -> [Point; 4] {
    [
        Point::new(r.x0, r.y0),
        Point::new(r.x1, r.y0),
        Point::new(r.x1, r.y1),
        Point::new(r.x0, r.y1),
    ]
}

/// A recycler-owned wrapper around a host view.
///
/// Tracks the index the view is bound to, the index it held before its last reassignment,
/// its bounds in content space and its [`ViewState`].
#[derive(Debug)]
pub struct ViewHolder<V> {
    view: V,
    current_index: usize,
    last_index: usize,
    bounds: Rect,
    state: ViewState,
}

impl<V: ItemView> ViewHolder<V> {
    pub(crate) fn new(view: V, index: usize) -> Self {
        Self {
            view,
            current_index: index,
            last_index: index,
            bounds: Rect::ZERO,
            state: ViewState::Scrap,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn last_index(&self) -> usize {
        self.last_index
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    /// Visibility test against the viewport rect (both in content space).
    pub fn is_hidden(&self, viewport: Rect) -> bool {
        self.view.is_hidden(self.bounds, viewport)
    }

    /// Consumes the handle and releases its view from the host.
    pub fn destroy(self) {
        self.view.destroy();
    }

    pub(crate) fn reassign(&mut self, index: usize) {
        self.last_index = self.current_index;
        self.current_index = index;
    }

    pub(crate) fn place(&mut self, bounds: Rect, pivot: Point) {
        self.bounds = bounds;
        self.view.set_position(pivot);
    }

    pub(crate) fn attach(&mut self, anchor: Anchor) {
        self.state = ViewState::Scrap;
        self.view.on_attach(anchor);
    }

    pub(crate) fn detach(&mut self) {
        self.state = ViewState::Cache;
        self.view.on_detach();
    }

    pub(crate) fn recycle(&mut self) {
        self.state = ViewState::Recycled;
        self.view.on_recycle();
    }
}
