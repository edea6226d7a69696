//! Cat Clicker — an idle cat clicker game.
//!
//! `CatGame` is the session: it owns the state, the catalog and the
//! collaborators (save store, clock), turns input into engine commands, and
//! decides when to persist. Engine rules live in `logic`.

pub mod actions;
pub mod catalog;
pub mod effects;
pub mod error;
pub mod logic;
pub mod render;
pub mod save;
pub mod state;

use crate::console;
use crate::input::InputEvent;
use crate::time::{Cadence, Clock};

use catalog::Catalog;
use effects::Effects;
use error::{GameError, Result};
use logic::{ClickUpgrade, Purchase};
use save::{SaveStore, AUTOSAVE_INTERVAL_MS};
use state::{GameState, Millis};

/// Passive accrual cadence (twice per second).
pub const TICK_INTERVAL_MS: Millis = 500;

pub struct CatGame {
    pub state: GameState,
    pub catalog: Catalog,
    pub effects: Effects,
    /// Reset was requested and waits for y/n.
    pub confirm_reset: bool,
    /// Points earned while the game was closed, shown once on startup.
    pub offline_gain: f64,
    store: Box<dyn SaveStore>,
    clock: Box<dyn Clock>,
    tick_cadence: Cadence,
    autosave_cadence: Cadence,
}

impl CatGame {
    /// Restore the saved game (or start fresh) and credit time spent away.
    pub fn new(catalog: Catalog, store: Box<dyn SaveStore>, clock: Box<dyn Clock>) -> Self {
        let now = clock.now_ms();
        let mut state = save::load_game(&*store, &catalog, now);
        let offline_gain = logic::tick(&mut state, &catalog, now);
        if offline_gain > 0.0 {
            console::info(&format!(
                "留守中に {} ポイント獲得",
                logic::format_number(offline_gain)
            ));
        }

        let mut tick_cadence = Cadence::new(TICK_INTERVAL_MS);
        let mut autosave_cadence = Cadence::new(AUTOSAVE_INTERVAL_MS);
        tick_cadence.restart(now);
        autosave_cadence.restart(now);

        Self {
            state,
            catalog,
            effects: Effects::new(),
            confirm_reset: false,
            offline_gain,
            store,
            clock,
            tick_cadence,
            autosave_cadence,
        }
    }

    pub fn now(&self) -> Millis {
        self.clock.now_ms()
    }

    /// Total passive points per second.
    pub fn rate(&self) -> f64 {
        logic::passive_rate(&self.state, &self.catalog)
    }

    // ── Commands ────────────────────────────────────────────────

    /// Manual click. Returns the points granted.
    pub fn click(&mut self) -> u32 {
        let now = self.now();
        let granted = logic::click(&mut self.state);
        self.effects.on_click(granted, now);
        self.persist();
        granted
    }

    /// Buy one unit of producer `id`.
    pub fn buy(&mut self, id: &str) -> Result<Purchase> {
        let now = self.now();
        // Settle income earned at the old rate before the count changes.
        logic::tick(&mut self.state, &self.catalog, now);
        match logic::buy(&mut self.state, &self.catalog, id) {
            Ok(purchase) => {
                self.effects.on_purchase(now);
                self.persist();
                Ok(purchase)
            }
            Err(e) => {
                self.on_rejected(&e, now);
                Err(e)
            }
        }
    }

    /// Buy the producer at catalog position `index`.
    pub fn buy_index(&mut self, index: usize) -> Result<Purchase> {
        let id = match self.catalog.at(index) {
            Some(def) => def.id.clone(),
            None => return Err(GameError::UnknownProducer(format!("#{}", index + 1))),
        };
        self.buy(&id)
    }

    pub fn upgrade_click_power(&mut self) -> Result<ClickUpgrade> {
        let now = self.now();
        logic::tick(&mut self.state, &self.catalog, now);
        match logic::upgrade_click_power(&mut self.state) {
            Ok(upgrade) => {
                self.effects.on_purchase(now);
                self.persist();
                Ok(upgrade)
            }
            Err(e) => {
                self.on_rejected(&e, now);
                Err(e)
            }
        }
    }

    /// Apply passive accrual up to the clock's current time.
    pub fn tick(&mut self) -> f64 {
        let now = self.now();
        self.tick_at(now)
    }

    pub fn tick_at(&mut self, now: Millis) -> f64 {
        logic::tick(&mut self.state, &self.catalog, now)
    }

    /// Discard all progress and the saved record.
    pub fn reset(&mut self) {
        let now = self.now();
        self.state = logic::reset(&self.catalog, now);
        self.effects.clear();
        self.confirm_reset = false;
        self.offline_gain = 0.0;
        if let Err(e) = save::delete_save(&*self.store) {
            console::warn(&format!("セーブの削除に失敗: {e}"));
        }
        console::info("ゲームをリセットしました。");
    }

    /// Explicit save (save button). Shows the "Saved" confirmation on success.
    pub fn save(&mut self) -> Result<()> {
        let now = self.now();
        self.tick_at(now);
        let result = save::save_game(&*self.store, &self.state);
        match &result {
            Ok(()) => {
                self.effects.on_saved(now);
                self.autosave_cadence.restart(now);
            }
            Err(e) => console::warn(&format!("セーブに失敗: {e}")),
        }
        result
    }

    // ── Driver hooks ────────────────────────────────────────────

    /// Called once per rendered frame: runs due cadences and ages effects.
    pub fn on_frame(&mut self) {
        let now = self.now();
        if self.tick_cadence.due(now) {
            self.tick_at(now);
        }
        if self.autosave_cadence.due(now) {
            self.tick_at(now);
            self.persist();
        }
        self.effects.expire(now);
    }

    /// Page is going away: accrue and write the final state.
    pub fn on_teardown(&mut self) {
        self.tick();
        self.persist();
    }

    /// Best-effort write. Failure is logged and the game keeps running.
    fn persist(&self) {
        if let Err(e) = save::save_game(&*self.store, &self.state) {
            console::warn(&format!("セーブに失敗: {e}"));
        }
    }

    fn on_rejected(&mut self, err: &GameError, now: Millis) {
        match err {
            GameError::InsufficientFunds { .. } => self.effects.on_reject(now),
            other => console::warn(&format!("コマンドを実行できません: {other}")),
        }
    }

    // ── Input ───────────────────────────────────────────────────

    /// Map an input event to a command. Returns true if the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        if self.confirm_reset {
            return self.handle_confirm(event);
        }

        match event {
            InputEvent::Key(' ') | InputEvent::Key('c') => {
                self.click();
                true
            }
            InputEvent::Key('u') => {
                let _ = self.upgrade_click_power();
                true
            }
            InputEvent::Key('s') => {
                let _ = self.save();
                true
            }
            InputEvent::Key('r') => {
                self.confirm_reset = true;
                true
            }
            InputEvent::Key(c @ '1'..='9') => {
                let index = (*c as u8 - b'1') as usize;
                if index < self.catalog.len() {
                    let _ = self.buy_index(index);
                    true
                } else {
                    false
                }
            }
            InputEvent::Click(actions::CLICK_CAT) => {
                self.click();
                true
            }
            InputEvent::Click(actions::UPGRADE_CLICK) => {
                let _ = self.upgrade_click_power();
                true
            }
            InputEvent::Click(actions::SAVE) => {
                let _ = self.save();
                true
            }
            InputEvent::Click(actions::RESET) => {
                self.confirm_reset = true;
                true
            }
            InputEvent::Click(id)
                if *id >= actions::BUY_PRODUCER_BASE
                    && ((*id - actions::BUY_PRODUCER_BASE) as usize) < self.catalog.len() =>
            {
                let _ = self.buy_index((*id - actions::BUY_PRODUCER_BASE) as usize);
                true
            }
            _ => false,
        }
    }

    fn handle_confirm(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key('y') | InputEvent::Click(actions::CONFIRM_RESET) => {
                self.reset();
                true
            }
            InputEvent::Key('n') | InputEvent::Click(actions::CANCEL_RESET) => {
                self.confirm_reset = false;
                true
            }
            _ => false,
        }
    }
}
