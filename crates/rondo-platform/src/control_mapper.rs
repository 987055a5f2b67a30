//! Control-to-target mapping table.
//!
//! [`ControlMapper`] associates hardware knob channels with an application
//! target (for the synthesizer, a parameter id) and the [`Parameter`] curve
//! that converts the knob's normalized reading.
//!
//! # Example
//!
//! ```rust
//! use rondo_platform::{ControlId, ControlMapper, Parameter};
//!
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! enum Target { Rate, Depth }
//!
//! let mut mapper = ControlMapper::<Target, 4>::new();
//! mapper.map(ControlId::hardware(8), Target::Rate, Parameter::linear(0.2, 10.0));
//! mapper.map(ControlId::hardware(15), Target::Depth, Parameter::linear(0.0, 1000.0));
//!
//! assert_eq!(mapper.get_target(ControlId::hardware(8)), Some(Target::Rate));
//! assert_eq!(mapper.len(), 2);
//! ```

use crate::{ControlId, ControlSurface, Parameter};

/// One mapping slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mapping<P> {
    /// Source control.
    pub control: ControlId,
    /// Application target.
    pub target: P,
    /// Curve applied to the control's normalized value.
    pub parameter: Parameter,
}

/// Fixed-capacity table of control → target mappings.
///
/// # Type Parameters
///
/// - `P`: target identifier
/// - `N`: maximum number of mappings (compile-time constant for no_std)
#[derive(Debug, Clone)]
pub struct ControlMapper<P, const N: usize> {
    mappings: [Option<Mapping<P>>; N],
    count: usize,
}

impl<P: Copy + PartialEq, const N: usize> Default for ControlMapper<P, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Copy + PartialEq, const N: usize> ControlMapper<P, N> {
    /// Creates an empty mapper.
    pub const fn new() -> Self {
        Self {
            mappings: [None; N],
            count: 0,
        }
    }

    /// Number of active mappings.
    #[inline]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// True if there are no mappings.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Maximum number of mappings.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Map a control to a target.
    ///
    /// Remapping an already-mapped control replaces its target and curve.
    /// Returns `false` if the table is full.
    pub fn map(&mut self, control: ControlId, target: P, parameter: Parameter) -> bool {
        for entry in self.mappings.iter_mut().flatten() {
            if entry.control == control {
                entry.target = target;
                entry.parameter = parameter;
                return true;
            }
        }

        for slot in self.mappings.iter_mut() {
            if slot.is_none() {
                *slot = Some(Mapping {
                    control,
                    target,
                    parameter,
                });
                self.count += 1;
                return true;
            }
        }

        false
    }

    /// Remove the mapping for a control. Returns `false` if it was not mapped.
    pub fn unmap(&mut self, control: ControlId) -> bool {
        for slot in self.mappings.iter_mut() {
            if let Some(entry) = slot
                && entry.control == control
            {
                *slot = None;
                self.count -= 1;
                return true;
            }
        }
        false
    }

    /// Target mapped to a control.
    #[inline]
    pub fn get_target(&self, control: ControlId) -> Option<P> {
        self.find(|m| m.control == control).map(|m| m.target)
    }

    /// First control mapped to a target.
    #[inline]
    pub fn get_control(&self, target: P) -> Option<ControlId> {
        self.find(|m| m.target == target).map(|m| m.control)
    }

    /// Full mapping for a target.
    pub fn get_mapping(&self, target: P) -> Option<&Mapping<P>> {
        self.find(|m| m.target == target)
    }

    /// Active mappings in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Mapping<P>> {
        self.mappings.iter().flatten()
    }

    /// Remove every mapping.
    pub fn clear(&mut self) {
        self.mappings = [None; N];
        self.count = 0;
    }

    /// Read every mapped hardware knob from `surface` and pass
    /// `(target, mapped_value)` to `apply`.
    ///
    /// Host-namespace mappings are skipped; they are written by the host
    /// directly.
    pub fn read_into<S, F>(&self, surface: &S, mut apply: F)
    where
        S: ControlSurface + ?Sized,
        F: FnMut(P, f32),
    {
        for entry in self.iter() {
            if entry.control.is_hardware() {
                let raw = surface.knob(usize::from(entry.control.index()));
                apply(entry.target, entry.parameter.process(raw));
            }
        }
    }

    fn find(&self, pred: impl Fn(&Mapping<P>) -> bool) -> Option<&Mapping<P>> {
        self.mappings.iter().flatten().find(|m| pred(m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Button, Curve};

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Target {
        A,
        B,
        C,
    }

    struct Panel([f32; 4]);

    impl ControlSurface for Panel {
        fn poll(&mut self) {}
        fn knob(&self, channel: usize) -> f32 {
            self.0.get(channel).copied().unwrap_or(0.0)
        }
        fn rising_edge(&self, _button: Button) -> bool {
            false
        }
    }

    #[test]
    fn test_map_and_lookup() {
        let mut mapper = ControlMapper::<Target, 4>::new();
        assert!(mapper.is_empty());
        assert!(mapper.map(ControlId::hardware(0), Target::A, Parameter::linear(0.0, 1.0)));
        assert!(mapper.map(ControlId::hardware(1), Target::B, Parameter::linear(0.0, 1.0)));
        assert_eq!(mapper.get_target(ControlId::hardware(1)), Some(Target::B));
        assert_eq!(mapper.get_control(Target::A), Some(ControlId::hardware(0)));
        assert_eq!(mapper.get_target(ControlId::hardware(2)), None);
    }

    #[test]
    fn test_remap_replaces_in_place() {
        let mut mapper = ControlMapper::<Target, 2>::new();
        mapper.map(ControlId::hardware(0), Target::A, Parameter::linear(0.0, 1.0));
        mapper.map(ControlId::hardware(0), Target::C, Parameter::linear(0.0, 4.0));
        assert_eq!(mapper.len(), 1);
        assert_eq!(mapper.get_target(ControlId::hardware(0)), Some(Target::C));
        assert_eq!(mapper.get_mapping(Target::C).map(|m| m.parameter.max), Some(4.0));
    }

    #[test]
    fn test_capacity_limit() {
        let mut mapper = ControlMapper::<Target, 2>::new();
        assert!(mapper.map(ControlId::hardware(0), Target::A, Parameter::linear(0.0, 1.0)));
        assert!(mapper.map(ControlId::hardware(1), Target::B, Parameter::linear(0.0, 1.0)));
        assert!(!mapper.map(ControlId::hardware(2), Target::C, Parameter::linear(0.0, 1.0)));
        assert_eq!(mapper.capacity(), 2);
    }

    #[test]
    fn test_unmap_and_clear() {
        let mut mapper = ControlMapper::<Target, 4>::new();
        mapper.map(ControlId::hardware(0), Target::A, Parameter::linear(0.0, 1.0));
        mapper.map(ControlId::hardware(1), Target::B, Parameter::linear(0.0, 1.0));
        assert!(mapper.unmap(ControlId::hardware(0)));
        assert!(!mapper.unmap(ControlId::hardware(0)));
        assert_eq!(mapper.len(), 1);
        mapper.clear();
        assert!(mapper.is_empty());
    }

    #[test]
    fn test_read_into_applies_curves() {
        let mut mapper = ControlMapper::<Target, 4>::new();
        mapper.map(ControlId::hardware(0), Target::A, Parameter::linear(0.0, 4.0));
        mapper.map(
            ControlId::hardware(2),
            Target::B,
            Parameter::new(0.0, 100.0, Curve::Exponential),
        );
        mapper.map(ControlId::host(1), Target::C, Parameter::linear(0.0, 1.0));

        let panel = Panel([0.5, 0.0, 0.5, 0.0]);
        let mut seen = [None; 3];
        mapper.read_into(&panel, |target, value| {
            let slot = match target {
                Target::A => 0,
                Target::B => 1,
                Target::C => 2,
            };
            seen[slot] = Some(value);
        });
        assert_eq!(seen, [Some(2.0), Some(25.0), None]);
    }
}
