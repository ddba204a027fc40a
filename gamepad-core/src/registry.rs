//! Static table of input sources and its construction checks.

use crate::types::{AdcChannel, Axis, Buttons, PinId};

/// A physical input wired to a logical gamepad field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputSource {
    /// Digital button on a pulled-up GPIO; contributes `action` while low.
    Button { action: Buttons, pin: PinId },
    /// Analog input whose scaled reading lands in `axis`.
    Analog { axis: Axis, channel: AdcChannel },
}

impl InputSource {
    #[must_use]
    pub const fn button(action: Buttons, pin: u8) -> Self {
        InputSource::Button {
            action,
            pin: PinId(pin),
        }
    }

    #[must_use]
    pub const fn analog(axis: Axis, channel: u8) -> Self {
        InputSource::Analog {
            axis,
            channel: AdcChannel(channel),
        }
    }
}

/// Invalid input map. Each variant carries the index of the offending entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// Button with no action bit.
    EmptyAction(usize),
    /// Button with more than one action bit.
    MultiBitAction(usize),
    /// Button action already used by an earlier entry.
    DuplicateAction(usize),
    /// Axis already fed by an earlier analog entry.
    DuplicateAxis(usize),
}

/// Read-only, ordered set of input sources.
///
/// Built once from a static table; there is no insertion or removal.
///
/// ```
/// use gamepad_core::{Axis, Buttons, InputRegistry, InputSource};
///
/// static SOURCES: [InputSource; 2] = [
///     InputSource::button(Buttons::SOUTH, 7),
///     InputSource::analog(Axis::X, 0),
/// ];
/// static REGISTRY: InputRegistry<'static> = InputRegistry::new(&SOURCES);
/// assert_eq!(REGISTRY.len(), 2);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct InputRegistry<'a> {
    sources: &'a [InputSource],
}

impl<'a> InputRegistry<'a> {
    /// Create a registry, panicking on an invalid map.
    ///
    /// Evaluated in a `const` or `static` item, an invalid map fails the build.
    #[must_use]
    pub const fn new(sources: &'a [InputSource]) -> Self {
        match Self::validate(sources) {
            Ok(()) => Self { sources },
            Err(RegistryError::EmptyAction(_)) => panic!("button source without an action bit"),
            Err(RegistryError::MultiBitAction(_)) => {
                panic!("button source with more than one action bit")
            }
            Err(RegistryError::DuplicateAction(_)) => panic!("duplicate button action"),
            Err(RegistryError::DuplicateAxis(_)) => panic!("duplicate analog axis"),
        }
    }

    /// Create a registry, returning the first invariant violation.
    pub const fn try_new(sources: &'a [InputSource]) -> Result<Self, RegistryError> {
        match Self::validate(sources) {
            Ok(()) => Ok(Self { sources }),
            Err(e) => Err(e),
        }
    }

    /// Check that every button has exactly one action bit, that action bits
    /// are pairwise disjoint, and that each axis is fed at most once.
    pub const fn validate(sources: &[InputSource]) -> Result<(), RegistryError> {
        let mut used_actions = 0u32;
        let mut used_axes = 0u8;
        let mut i = 0;
        while i < sources.len() {
            match sources[i] {
                InputSource::Button { action, .. } => {
                    match action.0.count_ones() {
                        0 => return Err(RegistryError::EmptyAction(i)),
                        1 => {}
                        _ => return Err(RegistryError::MultiBitAction(i)),
                    }
                    if used_actions & action.0 != 0 {
                        return Err(RegistryError::DuplicateAction(i));
                    }
                    used_actions |= action.0;
                }
                InputSource::Analog { axis, .. } => {
                    let bit = 1u8 << (axis as u8);
                    if used_axes & bit != 0 {
                        return Err(RegistryError::DuplicateAxis(i));
                    }
                    used_axes |= bit;
                }
            }
            i += 1;
        }
        Ok(())
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'a, InputSource> {
        self.sources.iter()
    }

    #[inline]
    #[must_use]
    pub const fn sources(&self) -> &'a [InputSource] {
        self.sources
    }

    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.sources.len()
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Union of all button actions in the map.
    #[must_use]
    pub fn action_mask(&self) -> Buttons {
        self.iter().fold(Buttons::NONE, |mask, source| match source {
            InputSource::Button { action, .. } => mask | *action,
            InputSource::Analog { .. } => mask,
        })
    }
}

impl<'a> IntoIterator for &InputRegistry<'a> {
    type Item = &'a InputSource;
    type IntoIter = core::slice::Iter<'a, InputSource>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::vec::Vec;

    static BOARD: [InputSource; 4] = [
        InputSource::button(Buttons::SOUTH, 7),
        InputSource::button(Buttons::EAST, 8),
        InputSource::analog(Axis::X, 0),
        InputSource::analog(Axis::Y, 1),
    ];

    static BOARD_REGISTRY: InputRegistry<'static> = InputRegistry::new(&BOARD);

    #[test]
    fn test_static_registry_preserves_order() {
        assert_eq!(BOARD_REGISTRY.len(), 4);
        assert!(!BOARD_REGISTRY.is_empty());
        let collected: Vec<_> = BOARD_REGISTRY.iter().copied().collect();
        assert_eq!(collected, BOARD);
        assert_eq!(BOARD_REGISTRY.action_mask(), Buttons::SOUTH | Buttons::EAST);
    }

    #[test]
    fn test_rejects_duplicate_action() {
        let sources = [
            InputSource::button(Buttons::SOUTH, 7),
            InputSource::analog(Axis::X, 0),
            InputSource::button(Buttons::SOUTH, 9),
        ];
        assert_eq!(
            InputRegistry::validate(&sources),
            Err(RegistryError::DuplicateAction(2))
        );
    }

    #[test]
    fn test_rejects_multi_bit_and_empty_action() {
        let multi = [InputSource::button(Buttons::SOUTH | Buttons::EAST, 7)];
        assert_eq!(
            InputRegistry::try_new(&multi).map(|r| r.len()),
            Err(RegistryError::MultiBitAction(0))
        );

        let empty = [InputSource::button(Buttons::NONE, 7)];
        assert_eq!(
            InputRegistry::validate(&empty),
            Err(RegistryError::EmptyAction(0))
        );
    }

    #[test]
    fn test_rejects_duplicate_axis() {
        let sources = [
            InputSource::analog(Axis::X, 0),
            InputSource::analog(Axis::X, 1),
        ];
        assert_eq!(
            InputRegistry::validate(&sources),
            Err(RegistryError::DuplicateAxis(1))
        );
    }

    #[test]
    #[should_panic(expected = "duplicate analog axis")]
    fn test_new_panics_on_invalid_map() {
        let sources = [
            InputSource::analog(Axis::Y, 0),
            InputSource::analog(Axis::Y, 1),
        ];
        let _ = InputRegistry::new(&sources);
    }

    #[test]
    fn test_empty_registry_is_valid() {
        let registry = InputRegistry::new(&[]);
        assert!(registry.is_empty());
        assert_eq!(registry.action_mask(), Buttons::NONE);
    }

    /// Every subset of a candidate pool is accepted exactly when its button
    /// bits are disjoint and its axes are unique; accepted maps always have
    /// pairwise disjoint action bits.
    #[test]
    fn test_validation_matches_brute_force_over_all_subsets() {
        let pool = [
            InputSource::button(Buttons::SOUTH, 7),
            InputSource::button(Buttons::EAST, 8),
            InputSource::button(Buttons::SOUTH, 5),
            InputSource::button(Buttons::START, 21),
            InputSource::analog(Axis::X, 0),
            InputSource::analog(Axis::Y, 1),
            InputSource::analog(Axis::X, 2),
            InputSource::analog(Axis::Rz, 3),
        ];

        for mask in 0u32..(1 << pool.len()) {
            let subset: Vec<InputSource> = pool
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << *i) != 0)
                .map(|(_, s)| *s)
                .collect();

            let mut disjoint = true;
            for (i, a) in subset.iter().enumerate() {
                for b in &subset[i + 1..] {
                    match (a, b) {
                        (
                            InputSource::Button { action: x, .. },
                            InputSource::Button { action: y, .. },
                        ) if x.intersects(*y) => disjoint = false,
                        (
                            InputSource::Analog { axis: x, .. },
                            InputSource::Analog { axis: y, .. },
                        ) if x == y => disjoint = false,
                        _ => {}
                    }
                }
            }

            let result = InputRegistry::try_new(&subset);
            assert_eq!(result.is_ok(), disjoint, "subset mask {mask:#010b}");
            if let Ok(registry) = result {
                let total: u32 = registry
                    .iter()
                    .filter_map(|s| match s {
                        InputSource::Button { action, .. } => Some(action.raw().count_ones()),
                        InputSource::Analog { .. } => None,
                    })
                    .sum();
                assert_eq!(registry.action_mask().raw().count_ones(), total);
            }
        }
    }
}
