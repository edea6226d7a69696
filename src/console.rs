//! Diagnostic output.
//!
//! In the browser this goes to the devtools console; natively (tests) to stderr.

const PREFIX: &str = "Cat Clicker";

/// Non-fatal failure (save failed, corrupt data discarded, ...).
pub fn warn(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&format!("{PREFIX}: {msg}").into());
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("[warn] {PREFIX}: {msg}");
}

/// Informational event (migration, repair, reset).
pub fn info(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&format!("{PREFIX}: {msg}").into());
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("[info] {PREFIX}: {msg}");
}
