//! Equipment ledger: two equip slots, an unbounded bank, and consumables.
//!
//! Invariant: an item is in exactly one slot, in the bank, or nowhere.
//! Equipping into an occupied slot hands the displaced item back to the
//! caller; it is never auto-banked.

use super::types::Item;
use crate::core::constants::{STARTING_FIELD_BANDAGES, STARTING_SMOKE_BOMBS};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const EQUIP_SLOTS: usize = 2;

/// Charge-granting consumables carried outside the equip slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumableBag {
    pub smoke_bombs: u32,
    pub field_bandages: u32,
}

impl ConsumableBag {
    /// Starting loadout for a fresh run.
    pub fn starting() -> Self {
        Self {
            smoke_bombs: STARTING_SMOKE_BOMBS,
            field_bandages: STARTING_FIELD_BANDAGES,
        }
    }

    pub fn empty() -> Self {
        Self {
            smoke_bombs: 0,
            field_bandages: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipError {
    InvalidSlot(usize),
}

impl fmt::Display for EquipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquipError::InvalidSlot(slot) => {
                write!(f, "equip slot {slot} out of range 0..{EQUIP_SLOTS}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentLedger {
    slots: [Option<Item>; EQUIP_SLOTS],
    bank: Vec<Item>,
    pub consumables: ConsumableBag,
}

impl EquipmentLedger {
    pub fn new() -> Self {
        Self {
            slots: [None, None],
            bank: Vec::new(),
            consumables: ConsumableBag::starting(),
        }
    }

    /// Place an item in a slot, returning whatever occupied it before.
    /// The caller is responsible for routing the displaced item.
    pub fn equip(&mut self, item: Item, slot: usize) -> Result<Option<Item>, EquipError> {
        if slot >= EQUIP_SLOTS {
            return Err(EquipError::InvalidSlot(slot));
        }
        Ok(self.slots[slot].replace(item))
    }

    /// Append to the bank. Banked items contribute value only, never effects.
    pub fn bank(&mut self, item: Item) {
        self.bank.push(item);
    }

    pub fn is_slot_free(&self, slot: usize) -> bool {
        slot < EQUIP_SLOTS && self.slots[slot].is_none()
    }

    pub fn slot(&self, slot: usize) -> Option<&Item> {
        self.slots.get(slot).and_then(|s| s.as_ref())
    }

    pub fn equipped_items(&self) -> Vec<&Item> {
        self.slots.iter().filter_map(|s| s.as_ref()).collect()
    }

    pub fn banked_items(&self) -> &[Item] {
        &self.bank
    }

    pub fn banked_value(&self) -> i64 {
        self.bank.iter().map(|item| item.value()).sum()
    }

    pub fn equipped_value(&self) -> i64 {
        self.equipped_items().iter().map(|item| item.value()).sum()
    }

    pub fn has_equipped(&self, identity: &str) -> bool {
        self.equipped_items()
            .iter()
            .any(|item| item.identity() == identity)
    }
}

impl Default for EquipmentLedger {
    fn default() -> Self {
        Self::new()
    }
}
