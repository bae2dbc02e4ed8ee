use crate::*;

use alloc::collections::BTreeSet;
use alloc::string::ToString;
use alloc::vec::Vec;
use kurbo::{Point, Rect, Size, Vec2};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_f64(&mut self, start: f64, end: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        start + (end - start) * unit
    }
}

#[derive(Debug, Default)]
struct Log {
    binds: Vec<usize>,
    recycled: Vec<usize>,
    destroyed: Vec<usize>,
}

#[derive(Debug)]
struct Row {
    id: usize,
    size: Size,
    position: Point,
    active: bool,
    bound: Option<usize>,
    log: Rc<RefCell<Log>>,
}

impl ItemView for Row {
    fn size(&self) -> Size {
        self.size
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn on_attach(&mut self, _anchor: Anchor) {
        self.active = true;
    }

    fn on_recycle(&mut self) {
        self.active = false;
        self.log.borrow_mut().recycled.push(self.id);
    }

    fn destroy(self) {
        self.log.borrow_mut().destroyed.push(self.id);
    }
}

#[derive(Debug)]
struct Rows {
    count: usize,
    row: Size,
    next_id: usize,
    log: Rc<RefCell<Log>>,
}

impl DataSource for Rows {
    type View = Row;

    fn item_count(&self) -> usize {
        self.count
    }

    fn create_view(&mut self) -> Row {
        let id = self.next_id;
        self.next_id += 1;
        Row {
            id,
            size: self.row,
            position: Point::ZERO,
            active: false,
            bound: None,
            log: Rc::clone(&self.log),
        }
    }

    fn bind_view(&mut self, view: &mut Row, index: usize) {
        assert!(index < self.count, "bind out of range: {index}");
        view.bound = Some(index);
        self.log.borrow_mut().binds.push(index);
    }
}

const VIEWPORT: Size = Size::new(100.0, 300.0);

fn rows(count: usize) -> Rows {
    Rows {
        count,
        row: Size::new(100.0, 100.0),
        next_id: 0,
        log: Rc::default(),
    }
}

fn recycler(count: usize, options: RecyclerOptions) -> Recycler<Rows> {
    Recycler::new(rows(count), options.with_initial_viewport(VIEWPORT))
}

fn take_binds(r: &Recycler<Rows>) -> Vec<usize> {
    core::mem::take(&mut r.source().log.borrow_mut().binds)
}

fn destroyed(r: &Recycler<Rows>) -> Vec<usize> {
    r.source().log.borrow().destroyed.clone()
}

fn attached_index(r: &Recycler<Rows>, index: usize) -> &ViewHolder<Row> {
    r.attached()
        .iter()
        .find(|h| h.current_index() == index)
        .unwrap()
}

#[test]
fn cold_start_attaches_capacity_plus_one() {
    let r = recycler(5, RecyclerOptions::default());

    assert_eq!(r.screen_capacity(), 3);
    assert_eq!(r.limit_bottom(), 200.0); // 5*100 - 300 - 0
    assert_eq!(r.content_offset(), 0.0);
    assert_eq!(r.phase(), Phase::Idle);

    let snap = r.snapshot();
    assert_eq!(snap.attached, [0, 1, 2, 3]);
    assert!(snap.cache.is_empty());
    assert!(snap.pool.is_empty());
    assert_eq!(take_binds(&r), [0, 1, 2, 3]);

    for h in r.attached() {
        assert_eq!(h.state(), ViewState::Scrap);
        assert!(h.view().active);
        assert_eq!(h.view().bound, Some(h.current_index()));
    }
}

#[test]
fn attached_views_are_stacked_downward_from_the_top_edge() {
    let r = recycler(5, RecyclerOptions::default());
    let h = attached_index(&r, 2);
    assert_eq!(h.view().position, Point::new(0.0, -200.0));
    assert_eq!(h.bounds(), Rect::new(-50.0, -300.0, 50.0, -200.0));
}

#[test]
fn forward_scroll_reuses_attached_and_caches_detached() {
    let mut r = recycler(5, RecyclerOptions::default());
    take_binds(&r);

    r.set_content_offset(200.0);
    assert_eq!(r.first_visible_index(), 2);

    let snap = r.snapshot();
    assert_eq!(snap.attached, [1, 2, 3, 4]);
    assert_eq!(snap.cache, [0]);
    assert!(snap.pool.is_empty());
    // Only the newly entered index is bound.
    assert_eq!(take_binds(&r), [4]);
    assert!(r.cache().iter().all(|h| h.state() == ViewState::Cache));
}

#[test]
fn scrolling_back_hits_the_cache_without_rebinding() {
    let mut r = recycler(5, RecyclerOptions::default());
    r.set_content_offset(200.0);
    take_binds(&r);

    r.set_content_offset(0.0);
    assert_eq!(r.snapshot().attached, [0, 1, 2, 3]);
    assert_eq!(r.snapshot().cache, [4]);
    assert!(take_binds(&r).is_empty());
    assert_eq!(
        attached_index(&r, 0).view().position,
        Point::new(0.0, 0.0)
    );
}

#[test]
fn cache_eviction_moves_oldest_to_pool_then_destroys() {
    let options = RecyclerOptions::default()
        .with_cache_size(1)
        .with_pool_size(1);
    let mut r = recycler(10, options);
    take_binds(&r);

    r.set_content_offset(100.0);
    r.set_content_offset(200.0);
    assert_eq!(r.snapshot().cache, [0]);

    r.set_content_offset(300.0);
    let snap = r.snapshot();
    assert_eq!(snap.attached, [2, 3, 4, 5, 6]);
    assert_eq!(snap.cache, [1]);
    assert_eq!(snap.pool, [0]);
    assert!(r.pool().iter().all(|h| h.state() == ViewState::Recycled));
    assert!(r.pool().iter().all(|h| !h.view().active));
    take_binds(&r);

    // Jump two rows: index 7 reuses the pooled view, 8 is new, 2 and 3 are detached.
    r.set_content_offset(500.0);
    let snap = r.snapshot();
    assert_eq!(snap.attached, [4, 5, 6, 7, 8]);
    assert_eq!(snap.cache, [3]);
    assert_eq!(snap.pool, [2]);
    assert_eq!(take_binds(&r), [7, 8]);

    let reused = attached_index(&r, 7);
    assert_eq!(reused.view().id, 0);
    assert_eq!(reused.last_index(), 0);

    // The view that held index 1 overflowed the full pool.
    assert_eq!(destroyed(&r), [1]);
    assert_eq!(r.source().log.borrow().recycled, [0, 1, 2]);
}

#[test]
fn random_scroll_walk_keeps_window_and_tier_invariants() {
    let options = RecyclerOptions::default()
        .with_cache_size(2)
        .with_pool_size(2);
    let mut r = recycler(50, options);
    let mut rng = Lcg(7);

    for _ in 0..500 {
        let before: BTreeSet<usize> = r
            .attached()
            .iter()
            .chain(r.cache().iter())
            .map(|h| h.current_index())
            .collect();
        take_binds(&r);

        let delta = rng.gen_range_f64(-150.0, 150.0);
        r.scroll_by(delta);

        let offset = r.content_offset();
        assert!((0.0..=r.limit_bottom()).contains(&offset));

        let first = (offset / 100.0).round_ties_even() as usize;
        let expected: Vec<usize> = (first.saturating_sub(1)..(first + 4).min(50)).collect();
        let attached: Vec<usize> = r.attached().iter().map(|h| h.current_index()).collect();
        assert_eq!(attached, expected, "offset={offset}");

        assert!(r.cache().len() <= 2);
        assert!(r.pool().len() <= 2);
        assert!(r.attached().iter().all(|h| h.state() == ViewState::Scrap));
        assert!(r.cache().iter().all(|h| h.state() == ViewState::Cache));
        assert!(r.pool().iter().all(|h| h.state() == ViewState::Recycled));

        for index in take_binds(&r) {
            assert!(
                !before.contains(&index),
                "index {index} was attached or cached but got rebound"
            );
        }
    }
}

#[test]
fn teleport_before_end_rebuilds_from_first_index() {
    let mut r = recycler(100, RecyclerOptions::default());
    take_binds(&r);

    r.set_content_offset(5_000.0);
    assert_eq!(r.content_offset(), 0.0);
    assert_eq!(r.snapshot().attached, [0, 1, 2, 3]);
    assert_eq!(take_binds(&r), [0, 1, 2, 3]);
    // The old views were released, not recycled.
    assert_eq!(destroyed(&r), [0, 1, 2, 3]);
}

#[test]
fn teleport_past_end_rebuilds_from_last_index() {
    let mut r = recycler(100, RecyclerOptions::default());
    take_binds(&r);

    r.set_content_offset(20_000.0);
    assert_eq!(r.limit_bottom(), 9_700.0);
    assert_eq!(r.content_offset(), 9_700.0);
    assert_eq!(r.snapshot().attached, [96, 97, 98, 99]);
    assert_eq!(take_binds(&r), [99, 96, 97, 98]);
}

#[test]
fn reset_is_idempotent() {
    let mut r = recycler(20, RecyclerOptions::default());

    assert!(r.reset(4));
    let first = (r.snapshot(), r.layout_state());
    assert!(r.reset(4));
    let second = (r.snapshot(), r.layout_state());

    assert_eq!(first, second);
    assert_eq!(first.0.attached, [3, 4, 5, 6, 7]);
    assert_eq!(first.1.content_offset, 400.0);
    assert_eq!(first.1.row_size, 100.0);
}

#[test]
fn reset_rejects_out_of_range_target() {
    let mut r = recycler(5, RecyclerOptions::default());
    r.set_content_offset(100.0);
    let before = (r.snapshot(), r.layout_state());
    take_binds(&r);

    assert!(!r.reset(6));
    assert_eq!((r.snapshot(), r.layout_state()), before);
    assert!(take_binds(&r).is_empty());
    assert!(destroyed(&r).is_empty());
    assert_eq!(r.phase(), Phase::Idle);

    // `pos == item_count` anchors at the last item.
    assert!(r.reset(5));
    assert_eq!(r.snapshot().attached, [1, 2, 3, 4]);
    assert_eq!(r.content_offset(), 200.0);
}

#[test]
fn reset_settles_window_around_clamped_offset() {
    let mut r = recycler(20, RecyclerOptions::default());

    assert!(r.reset(4));
    let window: Vec<usize> = r.window().indexes().collect();
    assert_eq!(window, [3, 4, 5, 6, 7]);
    assert_eq!(r.snapshot().attached, window);

    take_binds(&r);
    assert!(r.reset(20));
    assert_eq!(r.content_offset(), 1_700.0);
    let window: Vec<usize> = r.window().indexes().collect();
    assert_eq!(window, [16, 17, 18, 19]);
    assert_eq!(r.snapshot().attached, window);
    assert_eq!(take_binds(&r), [19, 16, 17, 18]);
}

#[test]
fn scrolling_picks_up_item_count_changes_in_the_extent() {
    let mut r = recycler(10, RecyclerOptions::default());
    assert!(r.scroll_to_index(7));
    assert_eq!(r.limit_bottom(), 700.0);
    assert_eq!(r.snapshot().attached, [6, 7, 8, 9]);
    take_binds(&r);

    r.source_mut().count = 12;
    r.set_content_offset(800.0);
    assert_eq!(r.limit_bottom(), 900.0);
    assert_eq!(r.content_offset(), 800.0);
    assert_eq!(r.snapshot().attached, [7, 8, 9, 10, 11]);
    assert_eq!(take_binds(&r), [10, 11]);
}

#[test]
fn scroll_to_index_rebuilds_and_settles() {
    let mut r = recycler(100, RecyclerOptions::default());
    assert!(r.scroll_to_index(42));
    assert_eq!(r.content_offset(), 4_200.0);
    assert_eq!(r.snapshot().attached, [41, 42, 43, 44, 45]);

    assert!(!r.scroll_to_index(101));
    assert_eq!(r.content_offset(), 4_200.0);
}

#[test]
fn boundary_clamp_keeps_offset_in_range() {
    let mut r = recycler(5, RecyclerOptions::default());

    r.set_content_offset(-50.0);
    assert_eq!(r.content_offset(), 0.0);

    r.set_content_offset(260.0);
    assert_eq!(r.content_offset(), 200.0);
    assert_eq!(r.snapshot().attached, [1, 2, 3, 4]);
}

#[test]
fn empty_dataset_has_no_views_and_submit_rebuilds() {
    let mut r = recycler(0, RecyclerOptions::default());
    assert!(r.attached().is_empty());
    assert!(r.window().is_empty());

    r.set_content_offset(120.0);
    assert!(r.attached().is_empty());

    r.submit(|rows| rows.count = 5);
    assert_eq!(r.snapshot().attached, [0, 1, 2, 3]);
    assert_eq!(r.limit_bottom(), 200.0);
}

#[test]
fn notify_dataset_changed_rebinds_the_whole_window() {
    let mut r = recycler(30, RecyclerOptions::default());
    assert!(r.scroll_to_index(10));
    take_binds(&r);

    r.source_mut().count = 8;
    r.notify_dataset_changed();
    assert_eq!(r.content_offset(), 0.0);
    assert_eq!(r.snapshot().attached, [0, 1, 2, 3]);
    assert_eq!(take_binds(&r), [0, 1, 2, 3]);
    assert!(r.cache().is_empty());
    assert!(r.pool().is_empty());
}

#[test]
fn reverse_mode_mirrors_positions_and_clamp() {
    let mut r = recycler(5, RecyclerOptions::default().with_reverse(true));
    assert_eq!(r.layout().anchor(), Anchor::Bottom);
    assert_eq!(r.snapshot().attached, [0, 1, 2, 3]);

    let h = attached_index(&r, 2);
    assert_eq!(h.view().position, Point::new(0.0, 200.0));
    assert_eq!(h.bounds(), Rect::new(-50.0, 200.0, 50.0, 300.0));

    r.set_content_offset(-200.0);
    assert_eq!(r.first_visible_index(), 2);
    assert_eq!(r.snapshot().attached, [1, 2, 3, 4]);
    assert_eq!(r.snapshot().cache, [0]);

    r.set_content_offset(100.0);
    assert_eq!(r.content_offset(), 0.0);
    assert_eq!(r.snapshot().attached, [0, 1, 2, 3]);

    r.set_content_offset(-500.0);
    assert_eq!(r.content_offset(), -200.0);
}

#[test]
fn reverse_teleport_past_end_rebuilds_from_last_index() {
    let mut r = recycler(100, RecyclerOptions::default().with_reverse(true));
    r.set_content_offset(-20_000.0);
    assert_eq!(r.content_offset(), -9_700.0);
    assert_eq!(r.snapshot().attached, [96, 97, 98, 99]);

    assert!(r.scroll_to_index(10));
    assert_eq!(r.content_offset(), -1_000.0);
}

#[test]
fn spacing_enters_row_size_and_limit() {
    let options = RecyclerOptions::default().with_spacing(Vec2::new(0.0, 20.0));
    let r = recycler(5, options);

    assert_eq!(r.layout().row_size(), 120.0);
    assert_eq!(r.limit_bottom(), 280.0); // 5*120 - 300 - 20
    assert_eq!(r.screen_capacity(), 2);
    assert_eq!(r.snapshot().attached, [0, 1, 2]);
    assert_eq!(
        attached_index(&r, 2).view().position,
        Point::new(0.0, -240.0)
    );
}

#[test]
fn short_list_cannot_scroll() {
    let mut r = recycler(2, RecyclerOptions::default());
    assert_eq!(r.limit_bottom(), -100.0);
    assert_eq!(r.layout().scroll_extent(), 0.0);

    r.set_content_offset(40.0);
    assert_eq!(r.content_offset(), 0.0);
    assert_eq!(r.snapshot().attached, [0, 1]);
}

#[test]
fn viewport_resize_grows_the_window() {
    let mut r = Recycler::new(rows(10), RecyclerOptions::default());
    assert_eq!(r.screen_capacity(), 0);
    assert_eq!(r.snapshot().attached, [0]);

    r.set_viewport(VIEWPORT);
    assert_eq!(r.limit_bottom(), 700.0);
    assert_eq!(r.snapshot().attached, [0, 1, 2, 3]);
}

#[test]
fn update_options_applies_new_capacities() {
    let mut r = recycler(10, RecyclerOptions::default());
    r.update_options(|o| {
        o.cache_size = 0;
        o.pool_size = 1;
    });
    assert_eq!(r.cache().capacity(), 0);
    assert_eq!(r.pool().capacity(), 1);
    assert_eq!(r.snapshot().attached, [0, 1, 2, 3]);

    r.set_content_offset(200.0);
    let snap = r.snapshot();
    assert!(snap.cache.is_empty());
    assert_eq!(snap.pool, [0]);
}

#[test]
fn zero_capacity_pool_hands_the_holder_back() {
    let mut source = rows(1);
    let log = Rc::clone(&source.log);
    let mut pool = Pool::new(0);
    let holder = ViewHolder::new(source.create_view(), 3);

    let evicted = pool.offer(holder).unwrap();
    assert_eq!(evicted.state(), ViewState::Recycled);
    assert!(pool.is_empty());

    evicted.destroy();
    assert_eq!(log.borrow().destroyed, [0]);
}

#[test]
fn default_visibility_test_uses_half_open_corners() {
    let view = rows(1).create_view();
    let viewport = Rect::new(-50.0, -300.0, 50.0, 0.0);

    // Bottom-left corner touches the viewport's top edge: y = 0 is excluded.
    assert!(view.is_hidden(Rect::new(-50.0, 0.0, 50.0, 100.0), viewport));
    // Bottom-left corner at the viewport's min edge is included.
    assert!(!view.is_hidden(Rect::new(-50.0, -300.0, 50.0, -200.0), viewport));
    assert!(view.is_hidden(Rect::new(-50.0, -500.0, 50.0, -400.0), viewport));
}

#[test]
fn snapshot_formats_tiers() {
    let mut r = recycler(5, RecyclerOptions::default());
    r.set_content_offset(200.0);
    assert_eq!(
        r.snapshot().to_string(),
        "Attached: {1,2,3,4,} Cache: {0,} Pool: {}"
    );
}
