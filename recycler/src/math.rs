//! Float helpers that work with either `std` or `libm`.

#[cfg(feature = "std")]
pub fn floor(x: f64) -> f64 {
    x.floor()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
pub fn floor(x: f64) -> f64 {
    libm::floor(x)
}

/// Rounds to the nearest integer, ties to even.
#[cfg(feature = "std")]
pub fn round_ties_even(x: f64) -> f64 {
    x.round_ties_even()
}

/// Rounds to the nearest integer, ties to even.
#[cfg(all(not(feature = "std"), feature = "libm"))]
pub fn round_ties_even(x: f64) -> f64 {
    libm::rint(x)
}

#[cfg(feature = "std")]
pub fn powf(base: f64, exp: f64) -> f64 {
    base.powf(exp)
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
pub fn powf(base: f64, exp: f64) -> f64 {
    libm::pow(base, exp)
}
