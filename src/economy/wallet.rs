use std::collections::{BTreeMap, BTreeSet};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::*;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EconomyError {
    #[error("not enough {kind:?}: need {needed}, have {available}")]
    Insufficient {
        kind: ResourceKind,
        needed: u32,
        available: u32,
    },
    #[error("unknown shop listing '{0}'")]
    UnknownListing(String),
}

/// Balances and one-shot progress flags. Balances are unsigned, so they can
/// never go negative; every debit goes through `spend` or `apply`.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Economy {
    pub balances: BTreeMap<ResourceKind, u32>,
    pub flags: BTreeSet<ProgressFlag>,
}

impl Economy {
    pub fn with_balances(balances: impl IntoIterator<Item = (ResourceKind, u32)>) -> Self {
        Self {
            balances: balances.into_iter().collect(),
            flags: BTreeSet::new(),
        }
    }

    pub fn balance(&self, kind: ResourceKind) -> u32 {
        self.balances.get(&kind).copied().unwrap_or(0)
    }

    pub fn can_afford(&self, kind: ResourceKind, amount: u32) -> bool {
        self.balance(kind) >= amount
    }

    /// Returns the new balance.
    pub fn credit(&mut self, kind: ResourceKind, amount: u32) -> u32 {
        let entry = self.balances.entry(kind).or_insert(0);
        *entry = entry.saturating_add(amount);
        *entry
    }

    /// Debit `amount`, or fail without touching the balance.
    pub fn spend(&mut self, kind: ResourceKind, amount: u32) -> Result<u32, EconomyError> {
        let available = self.balance(kind);
        if available < amount {
            return Err(EconomyError::Insufficient { kind, needed: amount, available });
        }
        let remaining = available - amount;
        self.balances.insert(kind, remaining);
        Ok(remaining)
    }

    /// Apply a signed delta. Overdrafts clamp to zero; the second value is
    /// `true` when clamping happened.
    pub fn apply(&mut self, kind: ResourceKind, delta: i64) -> (u32, bool) {
        if delta >= 0 {
            let gain = u32::try_from(delta).unwrap_or(u32::MAX);
            return (self.credit(kind, gain), false);
        }
        let cost = u32::try_from(delta.unsigned_abs()).unwrap_or(u32::MAX);
        match self.spend(kind, cost) {
            Ok(balance) => (balance, false),
            Err(_) => {
                self.balances.insert(kind, 0);
                (0, true)
            }
        }
    }

    pub fn has_flag(&self, flag: ProgressFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Returns `true` only the first time the flag is raised.
    pub fn raise_flag(&mut self, flag: ProgressFlag) -> bool {
        self.flags.insert(flag)
    }

    /// Returns `true` if the flag was set.
    pub fn clear_flag(&mut self, flag: ProgressFlag) -> bool {
        self.flags.remove(&flag)
    }
}

/// Applies ResourceChangeEvents to the Economy and tells observers about
/// the new balances.
pub fn apply_resource_changes(
    mut change_events: EventReader<ResourceChangeEvent>,
    mut economy: ResMut<Economy>,
    mut changed_writer: EventWriter<EconomyChangedEvent>,
) {
    for ev in change_events.read() {
        if ev.amount == 0 {
            continue;
        }
        let (balance, clamped) = economy.apply(ev.kind, ev.amount);
        if clamped {
            warn!(
                "[Economy] {:?} {} would overdraw ({}); clamped to 0",
                ev.kind, ev.amount, ev.reason
            );
        } else {
            info!(
                "[Economy] {:?} {:+}: {}. New balance: {}",
                ev.kind, ev.amount, ev.reason, balance
            );
        }
        changed_writer.send(EconomyChangedEvent { kind: ev.kind, balance });
    }
}

/// Format a funds amount for display (e.g. "1,234g").
pub fn format_funds(amount: u32) -> String {
    let s = amount.to_string();
    let mut result = String::new();
    let digits: Vec<char> = s.chars().collect();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*ch);
    }
    result.push('g');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spend_rejects_overdraft() {
        let mut economy = Economy::with_balances([(ResourceKind::Funds, 10)]);
        let err = economy.spend(ResourceKind::Funds, 11).unwrap_err();
        assert_eq!(
            err,
            EconomyError::Insufficient {
                kind: ResourceKind::Funds,
                needed: 11,
                available: 10,
            }
        );
        assert_eq!(economy.balance(ResourceKind::Funds), 10);
        assert_eq!(economy.spend(ResourceKind::Funds, 10), Ok(0));
    }

    #[test]
    fn test_apply_clamps_at_zero() {
        let mut economy = Economy::with_balances([(ResourceKind::Seeds, 2)]);
        assert_eq!(economy.apply(ResourceKind::Seeds, -5), (0, true));
        assert_eq!(economy.apply(ResourceKind::Seeds, 3), (3, false));
        assert_eq!(economy.apply(ResourceKind::SkillPoints, -1), (0, true));
    }

    #[test]
    fn test_missing_balance_reads_zero() {
        let economy = Economy::default();
        assert_eq!(economy.balance(ResourceKind::SkillPoints), 0);
        assert!(economy.can_afford(ResourceKind::Funds, 0));
        assert!(!economy.can_afford(ResourceKind::Funds, 1));
    }

    #[test]
    fn test_flags_are_one_shot() {
        let mut economy = Economy::default();
        assert!(economy.raise_flag(ProgressFlag::FirstHarvest));
        assert!(!economy.raise_flag(ProgressFlag::FirstHarvest));
        assert!(economy.has_flag(ProgressFlag::FirstHarvest));
        assert!(economy.clear_flag(ProgressFlag::FirstHarvest));
        assert!(!economy.clear_flag(ProgressFlag::FirstHarvest));
    }

    #[test]
    fn test_format_funds() {
        assert_eq!(format_funds(0), "0g");
        assert_eq!(format_funds(500), "500g");
        assert_eq!(format_funds(1234), "1,234g");
        assert_eq!(format_funds(1000000), "1,000,000g");
    }
}
