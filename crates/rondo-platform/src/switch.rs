//! Debounced momentary switch.
//!
//! Each update shifts the raw pin state into an 8-bit history. A rising
//! edge is reported when the history reads `0111_1111` (seven pressed
//! polls after at least one released poll); a falling edge on
//! `1000_0000`. Contact bounce shorter than seven polls never produces an
//! edge.

/// Shift-register switch debouncer.
///
/// # Example
///
/// ```rust
/// use rondo_platform::Switch;
///
/// let mut sw = Switch::new();
/// let edges = (0..10).filter(|_| {
///     sw.update(true);
///     sw.rising_edge()
/// }).count();
/// assert_eq!(edges, 1);
/// assert!(sw.pressed());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Switch {
    history: u8,
}

impl Switch {
    /// Polls of stable contact needed before an edge.
    pub const SETTLE_POLLS: usize = 7;

    /// A released switch.
    pub const fn new() -> Self {
        Self { history: 0 }
    }

    /// Shift in the raw contact state for this poll.
    #[inline]
    pub fn update(&mut self, raw_pressed: bool) {
        self.history = (self.history << 1) | u8::from(raw_pressed);
    }

    /// True on the poll the press settled.
    #[inline]
    pub fn rising_edge(&self) -> bool {
        self.history == 0x7F
    }

    /// True on the poll the release settled.
    #[inline]
    pub fn falling_edge(&self) -> bool {
        self.history == 0x80
    }

    /// True while held for the whole history window.
    #[inline]
    pub fn pressed(&self) -> bool {
        self.history == 0xFF
    }
}
