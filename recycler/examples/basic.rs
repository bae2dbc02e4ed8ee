// Example: a 10k-row list displayed through a handful of recycled views.
use recycler::kurbo::{Point, Size};
use recycler::{DataSource, ItemView, Recycler, RecyclerOptions};

struct Cell {
    text: String,
    position: Point,
}

impl ItemView for Cell {
    fn size(&self) -> Size {
        Size::new(320.0, 48.0)
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }
}

struct Names {
    items: Vec<String>,
    created: usize,
}

impl DataSource for Names {
    type View = Cell;

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn create_view(&mut self) -> Cell {
        self.created += 1;
        Cell {
            text: String::new(),
            position: Point::ZERO,
        }
    }

    fn bind_view(&mut self, view: &mut Cell, index: usize) {
        view.text.clone_from(&self.items[index]);
    }
}

fn main() {
    let source = Names {
        items: (0..10_000).map(|i| format!("row #{i}")).collect(),
        created: 0,
    };
    let options = RecyclerOptions::new(Size::new(320.0, 480.0)).with_spacing((0.0, 4.0).into());
    let mut r = Recycler::new(source, options);
    println!("after reset: {} window={:?}", r.snapshot(), r.window());

    // Small steps reuse attached views and refill from the cache/pool.
    for _ in 0..40 {
        r.scroll_by(26.0);
    }
    println!(
        "offset={} first={} {}",
        r.content_offset(),
        r.first_visible_index(),
        r.snapshot()
    );

    // A jump past every attached view is rebuilt from a boundary index.
    r.set_content_offset(1_000_000.0);
    println!("teleport: offset={} {}", r.content_offset(), r.snapshot());

    r.scroll_to_index(5_000);
    for h in r.attached() {
        println!("  {:>5} at {:?}: {}", h.current_index(), h.view().position, h.view().text);
    }
    println!("views created: {}", r.source().created);
}
