//! VIP / ultra-VIP / admin membership.
//!
//! Each tier is an [`IdSet`]: a plain lookup of Telegram user ids. Production sets
//! come from the environment (see `config::members`), tests build their own.

use std::collections::HashSet;

use crate::core::config;

/// Set of Telegram user ids answering `is_member`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdSet {
    ids: HashSet<i64>,
}

impl IdSet {
    pub fn new(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn is_member(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// All membership tiers the handlers care about.
#[derive(Debug, Clone, Default)]
pub struct Membership {
    pub admins: IdSet,
    pub vips: IdSet,
    pub ultra_vips: IdSet,
}

impl Membership {
    pub fn new(admins: IdSet, vips: IdSet, ultra_vips: IdSet) -> Self {
        Self {
            admins,
            vips,
            ultra_vips,
        }
    }

    /// Lists read from ADMIN_IDS, VIP_IDS and ULTRA_VIP_IDS.
    pub fn from_env() -> Self {
        Self {
            admins: IdSet::new(config::members::ADMIN_IDS.iter().copied()),
            vips: IdSet::new(config::members::VIP_IDS.iter().copied()),
            ultra_vips: IdSet::new(config::members::ULTRA_VIP_IDS.iter().copied()),
        }
    }

    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admins.is_member(user_id)
    }

    pub fn is_vip(&self, user_id: i64) -> bool {
        self.vips.is_member(user_id)
    }

    pub fn is_ultra_vip(&self, user_id: i64) -> bool {
        self.ultra_vips.is_member(user_id)
    }

    /// Bonus added to a freshly generated size. Tiers stack.
    pub fn bonus_for(&self, user_id: i64) -> i64 {
        let mut bonus = 0;
        if self.is_vip(user_id) {
            bonus += config::bonus::VIP;
        }
        if self.is_ultra_vip(user_id) {
            bonus += config::bonus::ULTRA_VIP;
        }
        bonus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Membership {
        Membership::new(IdSet::new([1]), IdSet::new([10, 30]), IdSet::new([20, 30]))
    }

    #[test]
    fn test_bonus_per_tier() {
        let m = fixture();
        assert_eq!(m.bonus_for(99), 0);
        assert_eq!(m.bonus_for(10), 5);
        assert_eq!(m.bonus_for(20), 50);
        assert_eq!(m.bonus_for(30), 55);
    }

    #[test]
    fn test_admin_is_not_a_bonus_tier() {
        let m = fixture();
        assert!(m.is_admin(1));
        assert!(!m.is_admin(10));
        assert_eq!(m.bonus_for(1), 0);
    }

    #[test]
    fn test_empty_membership_has_no_members() {
        let m = Membership::default();
        assert!(m.admins.is_empty());
        assert!(!m.is_vip(0));
        assert_eq!(m.bonus_for(0), 0);
    }

    #[test]
    fn test_id_set_deduplicates() {
        let set = IdSet::new([5, 5, 6]);
        assert_eq!(set.len(), 2);
        assert!(set.is_member(6));
    }
}
