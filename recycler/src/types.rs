use core::ops;

/// Lifecycle stage of a [`crate::ViewHolder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViewState {
    /// Attached to the content area, bound and positioned.
    Scrap,
    /// Detached but still bound; reusable without a rebind.
    Cache,
    /// Detached and awaiting reassignment to another index.
    Recycled,
}

/// The edge of the content area the list grows from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Anchor {
    /// Index 0 sits at the top edge and the list grows downward.
    Top,
    /// Index 0 sits at the bottom edge and the list grows upward ("reverse" mode).
    Bottom,
}

impl Anchor {
    pub fn from_reverse(is_reverse: bool) -> Self {
        if is_reverse { Self::Bottom } else { Self::Top }
    }

    pub fn is_reverse(self) -> bool {
        matches!(self, Self::Bottom)
    }
}

/// Whether the recycler is rebuilding its tiers.
///
/// Scroll reactions are ignored while [`Phase::Resetting`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    #[default]
    Idle,
    Resetting,
}

/// A contiguous range of item indexes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl Window {
    pub fn new(start_index: usize, end_index: usize) -> Self {
        Self {
            start_index: start_index.min(end_index),
            end_index,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start_index..self.end_index).contains(&index)
    }

    pub fn indexes(&self) -> ops::Range<usize> {
        self.start_index..self.end_index
    }
}
