use alloc::vec::Vec;
use core::fmt;

use kurbo::Size;

/// A snapshot of which indexes each tier currently holds, in tier order.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TierSnapshot {
    pub attached: Vec<usize>,
    pub cache: Vec<usize>,
    pub pool: Vec<usize>,
}

impl fmt::Display for TierSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn tier(f: &mut fmt::Formatter<'_>, name: &str, indexes: &[usize]) -> fmt::Result {
            write!(f, "{name}: {{")?;
            for i in indexes {
                write!(f, "{i},")?;
            }
            f.write_str("}")
        }
        tier(f, "Attached", &self.attached)?;
        f.write_str(" ")?;
        tier(f, "Cache", &self.cache)?;
        f.write_str(" ")?;
        tier(f, "Pool", &self.pool)
    }
}

/// A lightweight snapshot of the window engine's geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutState {
    pub content_offset: f64,
    /// Row height plus vertical spacing.
    pub row_size: f64,
    pub limit_bottom: f64,
    pub viewport: Size,
}
