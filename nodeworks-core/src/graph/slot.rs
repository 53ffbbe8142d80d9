//! Slots
//!
//! A slot is a single named value cell on a node. Slots come in two
//! directions (input and output); a slot's id is only meaningful within its
//! owning node and direction. The engine never inspects slot values, it
//! only moves them between slots.

use std::fmt;

/// Identifier of a slot, scoped to its owning node and direction.
pub type SlotId = u32;

/// Which side of a node a slot sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotDirection {
    Input,
    Output,
}

impl fmt::Display for SlotDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotDirection::Input => f.write_str("input"),
            SlotDirection::Output => f.write_str("output"),
        }
    }
}

/// A named value cell belonging to a node.
///
/// The value starts out unset unless the slot is constructed with
/// [`Slot::with_value`]; evaluation fills input slots as values arrive over
/// edges and output slots as nodes compute.
#[derive(Debug, Clone)]
pub struct Slot<V> {
    id: SlotId,
    name: String,
    value: Option<V>,
}

impl<V> Slot<V> {
    /// Create an empty slot.
    pub fn new(id: SlotId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            value: None,
        }
    }

    /// Create a slot pre-seeded with a value.
    pub fn with_value(id: SlotId, name: impl Into<String>, value: V) -> Self {
        Self {
            id,
            name: name.into(),
            value: Some(value),
        }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value, if any has been stored.
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub fn set_value(&mut self, value: V) {
        self.value = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_starts_empty() {
        let slot: Slot<f64> = Slot::new(0, "a");
        assert_eq!(slot.id(), 0);
        assert_eq!(slot.name(), "a");
        assert!(slot.value().is_none());
    }

    #[test]
    fn seeded_slot_holds_value() {
        let mut slot = Slot::with_value(1, "val", 99.0);
        assert_eq!(slot.value(), Some(&99.0));

        slot.set_value(7.0);
        assert_eq!(slot.value(), Some(&7.0));
    }

    #[test]
    fn direction_display() {
        assert_eq!(SlotDirection::Input.to_string(), "input");
        assert_eq!(SlotDirection::Output.to_string(), "output");
    }
}
