//! Cat Clicker game state: the persisted record.

use std::collections::BTreeMap;

use super::catalog::Catalog;

/// Milliseconds since the Unix epoch.
pub type Millis = u64;

/// Full persisted state of a Cat Clicker game.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    /// Current points (fractional because passive accrual is continuous).
    pub points: f64,
    /// Points granted per manual click. Always >= 1.
    pub click_power: u32,
    /// Owned count per producer id. Keys are exactly the catalog ids.
    pub producer_owned: BTreeMap<String, u32>,
    /// Last moment accrual was applied.
    pub last_update: Millis,
}

impl GameState {
    /// Fresh default record: nothing owned, click power 1.
    pub fn new(catalog: &Catalog, now: Millis) -> Self {
        Self {
            points: 0.0,
            click_power: 1,
            producer_owned: zero_filled(catalog),
            last_update: now,
        }
    }

    /// Owned count for `id`, 0 when unknown.
    pub fn owned(&self, id: &str) -> u32 {
        self.producer_owned.get(id).copied().unwrap_or(0)
    }

    /// Total producers owned across all kinds.
    pub fn total_owned(&self) -> u64 {
        self.producer_owned.values().map(|&n| n as u64).sum()
    }

    /// Repair a restored record so every invariant holds again.
    ///
    /// Returns true if anything had to be changed.
    pub fn normalize(&mut self, catalog: &Catalog) -> bool {
        let mut repaired = false;

        let same_ids = self.producer_owned.len() == catalog.len()
            && catalog.ids().all(|id| self.producer_owned.contains_key(id));
        if !same_ids {
            self.producer_owned = zero_filled(catalog);
            repaired = true;
        }

        if self.click_power == 0 {
            self.click_power = 1;
            repaired = true;
        }

        if !self.points.is_finite() || self.points < 0.0 {
            self.points = 0.0;
            repaired = true;
        }

        repaired
    }
}

fn zero_filled(catalog: &Catalog) -> BTreeMap<String, u32> {
    catalog.ids().map(|id| (id.to_string(), 0)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_defaults() {
        let catalog = Catalog::reference();
        let state = GameState::new(&catalog, 1_000);
        assert!((state.points - 0.0).abs() < f64::EPSILON);
        assert_eq!(state.click_power, 1);
        assert_eq!(state.last_update, 1_000);
        assert_eq!(state.producer_owned.len(), 4);
        assert!(state.producer_owned.values().all(|&n| n == 0));
    }

    #[test]
    fn owned_unknown_is_zero() {
        let state = GameState::new(&Catalog::reference(), 0);
        assert_eq!(state.owned("dogHouse"), 0);
    }

    #[test]
    fn total_owned_sums_counts() {
        let mut state = GameState::new(&Catalog::reference(), 0);
        state.producer_owned.insert("autoPurr".into(), 3);
        state.producer_owned.insert("meowTeam".into(), 2);
        assert_eq!(state.total_owned(), 5);
    }

    #[test]
    fn normalize_keeps_valid_state() {
        let catalog = Catalog::reference();
        let mut state = GameState::new(&catalog, 0);
        state.points = 42.5;
        state.click_power = 3;
        state.producer_owned.insert("catnipFarm".into(), 7);
        let before = state.clone();
        assert!(!state.normalize(&catalog));
        assert_eq!(state, before);
    }

    #[test]
    fn normalize_replaces_stale_ids() {
        let catalog = Catalog::reference();
        let mut state = GameState::new(&catalog, 0);
        state.producer_owned.remove("meowTeam");
        state.producer_owned.insert("oldThing".into(), 9);
        state.producer_owned.insert("autoPurr".into(), 4);
        assert!(state.normalize(&catalog));
        assert_eq!(state.producer_owned.len(), 4);
        assert!(state.producer_owned.values().all(|&n| n == 0));
        assert!(!state.producer_owned.contains_key("oldThing"));
    }

    #[test]
    fn normalize_replaces_missing_ids() {
        let catalog = Catalog::reference();
        let mut state = GameState::new(&catalog, 0);
        state.producer_owned.clear();
        assert!(state.normalize(&catalog));
        assert_eq!(state.owned("laserFactory"), 0);
        assert_eq!(state.producer_owned.len(), 4);
    }

    #[test]
    fn normalize_fixes_click_power_and_points() {
        let catalog = Catalog::reference();
        let mut state = GameState::new(&catalog, 0);
        state.click_power = 0;
        state.points = -12.0;
        assert!(state.normalize(&catalog));
        assert_eq!(state.click_power, 1);
        assert!((state.points - 0.0).abs() < f64::EPSILON);

        state.points = f64::NAN;
        assert!(state.normalize(&catalog));
        assert!((state.points - 0.0).abs() < f64::EPSILON);
    }
}
