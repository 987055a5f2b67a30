//! Code-driven control surface.
//!
//! [`VirtualSurface`] stands in for the panel when there is no hardware:
//! the offline renderer, the live player and tests set knob positions and
//! queue button presses, and the surface feeds them through the same
//! [`AnalogControl`] smoothing and [`Switch`] debouncing the panel uses.
//! A queued press holds the contact for [`PRESS_POLLS`] polls and then
//! releases it for [`RELEASE_POLLS`] polls, so each press yields exactly one
//! rising edge, [`Switch::SETTLE_POLLS`] polls after it starts.

use crate::{AnalogControl, Button, ControlSurface, KNOB_COUNT, Switch};

/// Polls a queued press holds the contact closed.
pub const PRESS_POLLS: u8 = 10;
/// Polls the contact stays open after a press.
pub const RELEASE_POLLS: u8 = 2;

#[derive(Debug, Clone, Copy, Default)]
struct PressQueue {
    pending: u16,
    hold: u8,
    release: u8,
}

impl PressQueue {
    /// Raw contact state for this poll.
    fn step(&mut self) -> bool {
        if self.hold > 0 {
            self.hold -= 1;
            if self.hold == 0 {
                self.release = RELEASE_POLLS;
            }
            return true;
        }
        if self.release > 0 {
            self.release -= 1;
            return false;
        }
        if self.pending > 0 {
            self.pending -= 1;
            self.hold = PRESS_POLLS - 1;
            if self.hold == 0 {
                self.release = RELEASE_POLLS;
            }
            return true;
        }
        false
    }

    fn idle(&self) -> bool {
        self.pending == 0 && self.hold == 0 && self.release == 0
    }
}

/// Host-side [`ControlSurface`].
///
/// # Example
///
/// ```rust
/// use rondo_platform::{Button, ControlSurface, Switch, VirtualSurface};
///
/// let mut surface = VirtualSurface::new(48000.0, 0.1);
/// surface.snap_knob(10, 0.5);
/// surface.press(Button::Forward);
///
/// let mut edges = 0;
/// for _ in 0..32 {
///     surface.poll();
///     edges += usize::from(surface.rising_edge(Button::Forward));
/// }
/// assert_eq!(edges, 1);
/// assert_eq!(surface.knob(10), 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct VirtualSurface {
    knobs: [AnalogControl; KNOB_COUNT],
    switches: [Switch; 3],
    presses: [PressQueue; 3],
}

impl Default for VirtualSurface {
    fn default() -> Self {
        Self::new(48000.0, crate::DEFAULT_SLEW_SECONDS)
    }
}

impl VirtualSurface {
    /// Create a surface polled at `update_rate` Hz, knobs at 0.
    pub fn new(update_rate: f32, slew_seconds: f32) -> Self {
        Self {
            knobs: core::array::from_fn(|_| AnalogControl::new(update_rate, slew_seconds)),
            switches: [Switch::new(); 3],
            presses: [PressQueue::default(); 3],
        }
    }

    /// Move a knob. The reported value glides there over the slew time.
    /// Unknown channels are ignored.
    pub fn set_knob(&mut self, channel: usize, value: f32) {
        if let Some(knob) = self.knobs.get_mut(channel) {
            knob.set_raw(value);
        }
    }

    /// Move a knob and report the new value immediately.
    pub fn snap_knob(&mut self, channel: usize, value: f32) {
        if let Some(knob) = self.knobs.get_mut(channel) {
            knob.snap(value);
        }
    }

    /// Queue one press of `button`.
    pub fn press(&mut self, button: Button) {
        let queue = &mut self.presses[button.index()];
        queue.pending = queue.pending.saturating_add(1);
    }

    /// True while no press is queued or in progress.
    pub fn presses_idle(&self) -> bool {
        self.presses.iter().all(PressQueue::idle)
    }

    /// True while `button` has been held for the full debounce window.
    pub fn is_held(&self, button: Button) -> bool {
        self.switches[button.index()].pressed()
    }
}

impl ControlSurface for VirtualSurface {
    fn poll(&mut self) {
        for knob in &mut self.knobs {
            knob.process();
        }
        for (switch, queue) in self.switches.iter_mut().zip(self.presses.iter_mut()) {
            switch.update(queue.step());
        }
    }

    fn knob(&self, channel: usize) -> f32 {
        self.knobs.get(channel).map_or(0.0, AnalogControl::value)
    }

    fn rising_edge(&self, button: Button) -> bool {
        self.switches[button.index()].rising_edge()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_edges(surface: &mut VirtualSurface, button: Button, polls: usize) -> Vec<usize> {
        let mut at = Vec::new();
        for n in 1..=polls {
            surface.poll();
            if surface.rising_edge(button) {
                at.push(n);
            }
        }
        at
    }

    #[test]
    fn test_edge_lands_after_settle_polls() {
        let mut surface = VirtualSurface::default();
        surface.press(Button::Backward);
        let edges = count_edges(&mut surface, Button::Backward, 40);
        assert_eq!(edges, vec![Switch::SETTLE_POLLS]);
    }

    #[test]
    fn test_queued_presses_each_edge_once() {
        let mut surface = VirtualSurface::default();
        for _ in 0..3 {
            surface.press(Button::Forward);
        }
        let edges = count_edges(&mut surface, Button::Forward, 100);
        assert_eq!(edges.len(), 3);
        assert!(surface.presses_idle());
    }

    #[test]
    fn test_buttons_are_independent() {
        let mut surface = VirtualSurface::default();
        surface.press(Button::Aux);
        assert!(count_edges(&mut surface, Button::Forward, 40).is_empty());
    }

    #[test]
    fn test_held_during_press() {
        let mut surface = VirtualSurface::default();
        surface.press(Button::Forward);
        for _ in 0..8 {
            surface.poll();
        }
        assert!(surface.is_held(Button::Forward));
    }

    #[test]
    fn test_knobs_glide_and_unknown_channels_read_zero() {
        let mut surface = VirtualSurface::new(1000.0, 0.1);
        surface.set_knob(3, 1.0);
        surface.poll();
        let first = surface.knob(3);
        assert!(first > 0.0 && first < 0.05);
        surface.set_knob(99, 1.0);
        assert_eq!(surface.knob(99), 0.0);
    }
}
