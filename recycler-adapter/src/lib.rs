//! Adapter utilities for the `recycler` crate.
//!
//! The `recycler` crate is UI-agnostic and only reacts to offsets pushed into it. This crate
//! provides small, framework-neutral helpers commonly needed by hosts:
//!
//! - Smooth scrolling to an index, an offset or a fraction of the extent
//! - Inertial scrolling after a fling
//! - Pointer handling that cancels animations on press or drag
//!
//! Animations are cooperative: the host calls [`Adapter::tick`] once per frame and writes the
//! returned offset into its scroll container.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod adapter;
mod animation;
mod cancel;
mod observable;


pub use adapter::{Adapter, PointerState};
pub use animation::{DEFAULT_SMOOTH_SCROLL_SPEED, Inertia, ScrollAnimation, SmoothScroll};
pub use cancel::CancelToken;
pub use observable::DataObservable;
