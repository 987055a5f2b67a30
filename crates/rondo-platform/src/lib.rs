//! Rondo Platform - control surface abstraction
//!
//! Everything between the physical panel and the synthesis engine's
//! parameter bank: smoothed knob readings, debounced buttons, response
//! curves, knob-to-parameter tables and page selection.
//!
//! # Core Abstractions
//!
//! - [`ControlSurface`] - What the engine reads once per control tick
//! - [`ControlId`] - Namespaced control identifier (hardware or host)
//! - [`Button`] - The three panel buttons
//!
//! ## Collaborators
//!
//! - [`AnalogControl`] - One-pole smoothed knob reading
//! - [`Switch`] - Shift-register debouncer with edge detection
//! - [`Parameter`] / [`Curve`] - Normalized input to engineering range
//! - [`ControlMapper`] - Fixed-capacity control-to-target table
//! - [`PageSelector`] - Active page index with forward wrap and backward clamp
//! - [`VirtualSurface`] - Host-side surface driven by code instead of hardware
//!
//! # Control ID Namespaces
//!
//! - `0x00XX` - Hardware controls (ADC channels, panel buttons)
//! - `0x01XX` - Host controls (scenes, tests, GUIs)
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! rondo-platform = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod analog;
pub mod control_mapper;
pub mod page;
pub mod parameter;
pub mod switch;
pub mod virtual_surface;

pub use analog::AnalogControl;
pub use control_mapper::ControlMapper;
pub use page::PageSelector;
pub use parameter::{Curve, Parameter};
pub use switch::Switch;
pub use virtual_surface::VirtualSurface;

/// Number of analog channels on the panel (two 8-way multiplexers).
pub const KNOB_COUNT: usize = 16;

/// Default knob smoothing time constant in seconds.
pub const DEFAULT_SLEW_SECONDS: f32 = 0.1;

/// Namespace identifiers for control sources.
pub mod namespace {
    /// Hardware controls (ADC channels, panel buttons).
    pub const HARDWARE: u16 = 0x0000;
    /// Host controls (scenes, tests, GUIs).
    pub const HOST: u16 = 0x0100;
}

/// A namespaced control identifier.
///
/// High byte is the namespace, low byte the channel within it. Knob
/// channels on the panel are `ControlId::hardware(0..16)`.
///
/// # Example
///
/// ```rust
/// use rondo_platform::ControlId;
///
/// let knob = ControlId::hardware(10);
/// assert_eq!(knob.raw(), 0x000A);
/// assert!(knob.is_hardware());
///
/// let host = ControlId::host(3);
/// assert_eq!(host.raw(), 0x0103);
/// assert_eq!(host.index(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId(u16);

impl ControlId {
    /// Creates a ControlId from a raw 16-bit value.
    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Creates a hardware control ID (namespace 0x00XX).
    #[inline]
    pub const fn hardware(index: u8) -> Self {
        Self(namespace::HARDWARE | index as u16)
    }

    /// Creates a host control ID (namespace 0x01XX).
    #[inline]
    pub const fn host(index: u8) -> Self {
        Self(namespace::HOST | index as u16)
    }

    /// Raw 16-bit value.
    #[inline]
    pub const fn raw(&self) -> u16 {
        self.0
    }

    /// Namespace portion (high byte).
    #[inline]
    pub const fn namespace(&self) -> u16 {
        self.0 & 0xFF00
    }

    /// Channel within the namespace (low byte).
    #[inline]
    pub const fn index(&self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    /// True for hardware controls.
    #[inline]
    pub const fn is_hardware(&self) -> bool {
        self.namespace() == namespace::HARDWARE
    }

    /// True for host controls.
    #[inline]
    pub const fn is_host(&self) -> bool {
        self.namespace() == namespace::HOST
    }
}

/// Panel buttons.
///
/// `Forward` and `Backward` page through the mixer stages. `Aux` is wired
/// and debounced but has no assigned action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Button 1.
    Aux,
    /// Button 2: select the next stage.
    Forward,
    /// Button 3: select the previous stage.
    Backward,
}

impl Button {
    /// Every button, in panel order.
    pub const ALL: [Button; 3] = [Button::Aux, Button::Forward, Button::Backward];

    /// Position in [`Button::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Button::Aux => 0,
            Button::Forward => 1,
            Button::Backward => 2,
        }
    }

    /// Hardware control ID of the button (channels 0x20..).
    #[inline]
    pub const fn control_id(self) -> ControlId {
        ControlId::hardware(0x20 + self.index() as u8)
    }

    /// Lowercase name, as written in scene files.
    pub const fn name(self) -> &'static str {
        match self {
            Button::Aux => "aux",
            Button::Forward => "forward",
            Button::Backward => "backward",
        }
    }

    /// Inverse of [`Button::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }
}

/// What the engine reads from the panel once per control tick.
///
/// [`poll`](ControlSurface::poll) advances smoothing and debouncing by one
/// control step; the accessors then report the state as of that poll. All
/// methods must be non-blocking: implementations report the most recent
/// completed reading.
///
/// # Example
///
/// ```rust
/// use rondo_platform::{Button, ControlSurface, KNOB_COUNT};
///
/// struct Fixed;
///
/// impl ControlSurface for Fixed {
///     fn poll(&mut self) {}
///     fn knob(&self, channel: usize) -> f32 {
///         if channel < KNOB_COUNT { 0.5 } else { 0.0 }
///     }
///     fn rising_edge(&self, _button: Button) -> bool {
///         false
///     }
/// }
///
/// let mut panel = Fixed;
/// panel.poll();
/// assert_eq!(panel.knob(3), 0.5);
/// ```
pub trait ControlSurface {
    /// Advance one control step.
    fn poll(&mut self);

    /// Normalized `[0, 1]` reading of an analog channel. Unknown channels read 0.
    fn knob(&self, channel: usize) -> f32;

    /// True on the poll where `button` became pressed after debouncing.
    fn rising_edge(&self, button: Button) -> bool;

    /// Number of analog channels.
    fn knob_count(&self) -> usize {
        KNOB_COUNT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_id_namespaces() {
        let hw = ControlId::hardware(0x0F);
        assert_eq!(hw.raw(), 0x000F);
        assert_eq!(hw.namespace(), namespace::HARDWARE);
        assert!(hw.is_hardware());
        assert!(!hw.is_host());

        let host = ControlId::host(0x02);
        assert_eq!(host.namespace(), namespace::HOST);
        assert_eq!(host.index(), 2);
        assert!(host.is_host());
    }

    #[test]
    fn test_control_id_from_raw() {
        let id = ControlId::from_raw(0x0105);
        assert!(id.is_host());
        assert_eq!(id.index(), 5);
    }

    #[test]
    fn test_button_indices_follow_panel_order() {
        for (i, button) in Button::ALL.iter().enumerate() {
            assert_eq!(button.index(), i);
        }
        assert_eq!(Button::Forward.control_id(), ControlId::hardware(0x21));
    }

    #[test]
    fn test_button_names() {
        for button in Button::ALL {
            assert_eq!(Button::from_name(button.name()), Some(button));
        }
        assert_eq!(Button::from_name("shift"), None);
    }
}
