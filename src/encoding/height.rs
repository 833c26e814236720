use std::fmt::Display;

use crate::{encoding::transition::Transition, error::ShadowError};

/// Samples per transition, bounds are inclusive.
///
/// A `Both` transition builds a wall `2 / unit_width` of a pixel wide, so lower widths
/// trade resolution for thicker walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnitWidth(usize);

impl UnitWidth {
    pub const MIN: usize = 2;
    pub const MAX: usize = 40;
    pub const DEFAULT: UnitWidth = UnitWidth(20);

    pub fn new(width: usize) -> crate::error::Result<Self> {
        if width % 2 != 0 || !(Self::MIN..=Self::MAX).contains(&width) {
            return Err(ShadowError::invalid_parameter(format!(
                "unit width must be even and within {}..={}, got {}",
                Self::MIN,
                Self::MAX,
                width
            )));
        }
        Ok(Self(width))
    }

    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Run length of the outer sections, `unit_width / 2 - 1`.
    #[inline]
    pub const fn run(self) -> usize {
        self.0 / 2 - 1
    }

    /// Vertical step between ledges.
    #[inline]
    pub fn z_step_height(self) -> f64 {
        self.0 as f64 / 1.5
    }
}

impl Default for UnitWidth {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Display for UnitWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Heights of the four sections a transition expands into, relative to `height`.
///
/// ```text
///    1     2 3      4
/// ________|- -|________
/// __________|----------
/// _____________________
/// ```
#[inline]
pub const fn sections(transition: Transition, height: i32) -> [i32; 4] {
    match transition {
        Transition::Flat => [height, height, height, height],
        Transition::Rising => [height, height, height + 1, height + 1],
        Transition::Falling => [height, height, height - 1, height - 1],
        Transition::Both => [height, height + 1, height + 1, height],
    }
}

/// Expand a row of transitions into its stepped height profile.
///
/// Every transition but the last contributes `unit_width` samples, each starting from
/// the closing height of the one before it. The profile starts at `0`.
pub fn expand_heights(unit_width: UnitWidth, transitions: &[Transition]) -> Vec<i32> {
    let steps = transitions.len().saturating_sub(1);
    let run = unit_width.run();
    let mut profile = Vec::with_capacity(steps * unit_width.get());

    let mut height = 0;
    for &transition in &transitions[..steps] {
        let [first, second, third, fourth] = sections(transition, height);
        profile.extend(std::iter::repeat_n(first, run));
        profile.push(second);
        profile.push(third);
        profile.extend(std::iter::repeat_n(fourth, run));
        height = fourth;
    }

    debug_assert_eq!(profile.len(), steps * unit_width.get());
    profile
}
