/// Edge kind at a boundary between two columns.
///
/// ```text
/// _____ Flat
/// __|-- Rising
/// --|__ Falling
/// __|__ Both
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    Flat,
    Rising,
    Falling,
    Both,
}

impl Transition {
    /// `a` is the left image bit before the boundary, `b` the right image bit after it.
    #[inline]
    pub const fn from_bits(a: bool, b: bool) -> Self {
        match (a, b) {
            (false, false) => Transition::Flat,
            (true, false) => Transition::Rising,
            (false, true) => Transition::Falling,
            (true, true) => Transition::Both,
        }
    }

    #[inline]
    pub const fn code(self) -> u8 {
        match self {
            Transition::Flat => 0,
            Transition::Rising => 1,
            Transition::Falling => 2,
            Transition::Both => 3,
        }
    }
}

/// Transitions for the boundaries `start..=end` of one row.
///
/// `left` and `right` are flattened row-major bit buffers and `[start, end)` is the
/// index range of the row. The outer boundaries see an implicit `0` on their open
/// side, so a row of width `w` gives `w + 1` transitions.
///
/// # Panics
/// When `start > end` or `end` is past either buffer.
pub fn row_transitions(left: &[bool], right: &[bool], start: usize, end: usize) -> Vec<Transition> {
    assert!(start <= end, "row range is reversed");
    assert!(
        end <= left.len() && end <= right.len(),
        "row range is out of bounds"
    );

    (start..=end)
        .map(|i| {
            let a = i != start && left[i - 1];
            let b = i < end && right[i];
            Transition::from_bits(a, b)
        })
        .collect()
}
