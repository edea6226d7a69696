//! Cat Clicker game logic — pure functions over `GameState`, fully testable.

use super::catalog::{Catalog, ProducerDefinition};
use super::error::{GameError, Result};
use super::state::{GameState, Millis};

/// Geometric price growth per owned unit.
pub const COST_GROWTH: f64 = 1.15;

/// Price of the first click power upgrade. Doubles each level.
pub const CLICK_UPGRADE_BASE: f64 = 50.0;

/// Suffixes for compact number display, in ascending order of magnitude.
const SUFFIXES: &[&str] = &["K", "M", "B", "T", "Qa", "Qi"];

/// Result of a successful producer purchase.
#[derive(Clone, Debug, PartialEq)]
pub struct Purchase {
    /// Owned count after the purchase.
    pub owned: u32,
    pub price: f64,
}

/// Result of a successful click power upgrade.
#[derive(Clone, Debug, PartialEq)]
pub struct ClickUpgrade {
    /// Click power after the upgrade.
    pub click_power: u32,
    pub price: f64,
}

/// Price of the next unit when `owned` are already owned. Always an integer.
pub fn producer_cost(def: &ProducerDefinition, owned: u32) -> f64 {
    let exp = i32::try_from(owned).unwrap_or(i32::MAX);
    (def.base_cost * COST_GROWTH.powi(exp)).floor()
}

/// Price of the next unit of `def` for the current state.
pub fn next_cost(state: &GameState, def: &ProducerDefinition) -> f64 {
    producer_cost(def, state.owned(&def.id))
}

/// Price of the next click power level.
pub fn click_upgrade_cost(click_power: u32) -> f64 {
    let exp = i32::try_from(click_power.saturating_sub(1)).unwrap_or(i32::MAX);
    (CLICK_UPGRADE_BASE * 2.0_f64.powi(exp)).floor()
}

pub fn can_afford(state: &GameState, price: f64) -> bool {
    state.points >= price
}

/// Points per second contributed by one producer kind.
pub fn producer_rate(state: &GameState, def: &ProducerDefinition) -> f64 {
    def.base_rate * state.owned(&def.id) as f64
}

/// Total passive points per second.
pub fn passive_rate(state: &GameState, catalog: &Catalog) -> f64 {
    catalog.iter().map(|def| producer_rate(state, def)).sum()
}

/// Apply passive accrual up to `now`. Returns the points gained.
///
/// A `now` earlier than `last_update` counts as zero elapsed time and leaves
/// `last_update` where it is.
pub fn tick(state: &mut GameState, catalog: &Catalog, now: Millis) -> f64 {
    let dt = now.saturating_sub(state.last_update) as f64 / 1000.0;
    let gain = passive_rate(state, catalog) * dt;
    if gain > 0.0 {
        state.points += gain;
    }
    state.last_update = state.last_update.max(now);
    gain
}

/// Manual click. Returns the points granted.
pub fn click(state: &mut GameState) -> u32 {
    state.points += state.click_power as f64;
    state.click_power
}

/// Buy one unit of producer `id` at its current price.
pub fn buy(state: &mut GameState, catalog: &Catalog, id: &str) -> Result<Purchase> {
    let def = catalog
        .get(id)
        .ok_or_else(|| GameError::UnknownProducer(id.to_string()))?;
    let price = next_cost(state, def);
    if !can_afford(state, price) {
        return Err(GameError::InsufficientFunds {
            price,
            points: state.points,
        });
    }

    state.points -= price;
    let owned = state.producer_owned.entry(def.id.clone()).or_insert(0);
    *owned = owned.saturating_add(1);
    Ok(Purchase {
        owned: *owned,
        price,
    })
}

/// Raise click power by one level.
pub fn upgrade_click_power(state: &mut GameState) -> Result<ClickUpgrade> {
    let price = click_upgrade_cost(state.click_power);
    if !can_afford(state, price) {
        return Err(GameError::InsufficientFunds {
            price,
            points: state.points,
        });
    }

    state.points -= price;
    state.click_power = state.click_power.saturating_add(1);
    Ok(ClickUpgrade {
        click_power: state.click_power,
        price,
    })
}

/// Canonical default state, stamped with the reset time.
pub fn reset(catalog: &Catalog, now: Millis) -> GameState {
    GameState::new(catalog, now)
}

/// Compact display: "999", "1.23K", "1.5M", ...
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "0".into();
    }
    if n < 0.0 {
        return format!("-{}", format_number(-n));
    }
    if n.is_infinite() {
        return "∞".into();
    }
    if n < 1000.0 {
        return (n.floor() as u64).to_string();
    }

    let mut mantissa = n;
    let mut unit = 0;
    while mantissa >= 1000.0 && unit < SUFFIXES.len() {
        mantissa /= 1000.0;
        unit += 1;
    }

    format!("{}{}", two_decimals(mantissa), SUFFIXES[unit - 1])
}

/// Rates keep their fraction below 1000 ("0.1", "2.5"), then read like
/// `format_number`.
pub fn format_rate(rate: f64) -> String {
    if rate.is_finite() && (0.0..1000.0).contains(&rate) {
        two_decimals(rate)
    } else {
        format_number(rate)
    }
}

/// `{:.2}` with trailing zeros dropped: "1.50" → "1.5", "2.00" → "2".
fn two_decimals(n: f64) -> String {
    let fixed = format!("{:.2}", n);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}
