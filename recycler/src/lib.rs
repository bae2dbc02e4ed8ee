//! A headless, tiered view-recycling engine for virtualized scroll lists.
//!
//! For adapter-level utilities (smooth scrolling, inertia, pointer cancellation), see the
//! `recycler-adapter` crate.
//!
//! The engine displays an arbitrarily large ordered collection through a small, bounded set of
//! reusable views. Views move between three tiers as the viewport scrolls:
//!
//! - **attached**: bound and positioned for an index inside the current window,
//! - **cache**: detached but still bound, reattached without rebinding on a hit,
//! - **pool**: unbound, reassigned to any index with a rebind.
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - views, through [`DataSource::create_view`] / [`DataSource::bind_view`]
//! - view geometry and render-tree hooks, through [`ItemView`]
//! - viewport size and scroll offset updates
//!
//! ## Features
//!
//! - `std` (default): float math through `std`.
//! - `libm`: `no_std` + `alloc` builds using `libm` for float math.
//! - `serde`: `Serialize`/`Deserialize` for value and snapshot types.
//! - `tracing`: emits `trace`/`debug`/`warn` events under the `recycler` target.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("recycler requires either the `std` or the `libm` feature");

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod cache;
mod layout;
mod options;
mod pool;
mod recycler;
mod state;
mod types;
mod view;

#[doc(hidden)]
pub mod math;

#[cfg(test)]
mod tests;

pub use cache::Cache;
pub use layout::LayoutManager;
pub use options::RecyclerOptions;
pub use pool::Pool;
pub use recycler::Recycler;
pub use state::{LayoutState, TierSnapshot};
pub use types::{Anchor, Phase, ViewState, Window};
pub use view::{DataSource, ItemView, ViewHolder};

pub use kurbo;
