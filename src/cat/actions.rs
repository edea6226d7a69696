//! Semantic action IDs for Cat Clicker click targets.
//!
//! Each constant represents a distinct clickable action in the UI.
//! These IDs are registered during render and dispatched via `InputEvent::Click`.

// ── Core actions ────────────────────────────────────────────────
pub const CLICK_CAT: u16 = 0;
pub const UPGRADE_CLICK: u16 = 1;

// ── Save / reset ────────────────────────────────────────────────
pub const SAVE: u16 = 10;
pub const RESET: u16 = 11;
pub const CONFIRM_RESET: u16 = 12;
pub const CANCEL_RESET: u16 = 13;

// ── Producer purchase (base + catalog index) ────────────────────
pub const BUY_PRODUCER_BASE: u16 = 100;
