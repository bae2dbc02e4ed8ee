// Example: adapter-driven smooth scrolling, a fling and a press that interrupts it.
use recycler::kurbo::{Point, Size};
use recycler::{DataSource, ItemView, RecyclerOptions};
use recycler_adapter::Adapter;

struct Bubble {
    position: Point,
    message: Option<usize>,
}

impl ItemView for Bubble {
    fn size(&self) -> Size {
        Size::new(200.0, 60.0)
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }
}

struct Messages(usize);

impl DataSource for Messages {
    type View = Bubble;

    fn item_count(&self) -> usize {
        self.0
    }

    fn create_view(&mut self) -> Bubble {
        Bubble {
            position: Point::ZERO,
            message: None,
        }
    }

    fn bind_view(&mut self, view: &mut Bubble, index: usize) {
        view.message = Some(index);
    }
}

fn main() {
    // Chat-style list anchored at the bottom edge.
    let options = RecyclerOptions::new(Size::new(200.0, 400.0)).with_reverse(true);
    let mut a = Adapter::new(Messages(500), options);

    let target = a.smooth_scroll_to_index(40);
    println!("target_offset={target}");

    let mut now_ms = 0u64;
    while let Some(off) = a.tick(now_ms) {
        if now_ms % 160 == 0 {
            println!("t={now_ms} off={off} window={:?}", a.recycler().window());
        }
        now_ms += 16;
    }
    println!("done: {}", a.recycler().snapshot());

    // Fling toward older messages, then press to stop it.
    a.on_pointer_down();
    a.on_drag();
    a.on_pointer_up(-3000.0);
    for _ in 0..10 {
        now_ms += 16;
        a.tick(now_ms);
    }
    a.on_pointer_down();
    println!(
        "pressed: animating={} off={} first={}",
        a.is_animating(),
        a.recycler().content_offset(),
        a.recycler().first_visible_index()
    );
}
