//! Cat Clicker セーブ/ロード機能。
//!
//! ## バージョニング方針
//!
//! - `SAVE_VERSION`: 現在のセーブ形式バージョン。フィールド追加時にインクリメントする。
//! - `MIN_COMPATIBLE_VERSION`: 互換性を維持できる最小バージョン。
//!
//! ## v1 (旧形式)
//! ブラウザ版の元ゲームが書いていたバージョン番号なしのレコード
//! (`points`, `clickPower`, `items: [{id, amount}]`, `lastTick`)。
//! ロード時に v2 へマイグレーションする。
//!
//! ## v2
//! `{version, game: {points, click_power, producers: {id: count}, last_update}}`。
//! game の4フィールドは必須。未知のフィールドは無視する。
//!
//! どのバージョンでも、ロード後に `GameState::normalize` で自己修復する。

use std::cell::RefCell;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::Catalog;
use super::error::{GameError, Result};
use super::state::{GameState, Millis};
use crate::console;

/// セーブデータのフォーマットバージョン。
const SAVE_VERSION: u32 = 2;

/// 互換性を維持できる最小バージョン (1 = 旧形式)。
const MIN_COMPATIBLE_VERSION: u32 = 1;

/// localStorage のキー。元ゲームと同じキーを使い、旧セーブを引き継ぐ。
#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "catclicker_v1_v2";

/// オートセーブの間隔 (ms)。
pub const AUTOSAVE_INTERVAL_MS: u64 = 30_000;

/// セーブ先の抽象。文字列をまるごと読み書きする（部分書き込みはしない）。
pub trait SaveStore {
    fn read(&self) -> Result<Option<String>>;
    fn write(&self, data: &str) -> Result<()>;
    fn remove(&self) -> Result<()>;
}

/// シリアライズ用のセーブデータ構造体。
#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    game: GameSave,
}

#[derive(Serialize, Deserialize)]
struct GameSave {
    points: f64,
    click_power: u32,
    producers: BTreeMap<String, u32>,
    last_update: Millis,
}

/// 旧形式 (v1) のレコード。
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacySave {
    points: f64,
    click_power: u32,
    #[serde(default)]
    items: Vec<LegacyItem>,
    last_tick: f64,
}

#[derive(Deserialize)]
struct LegacyItem {
    id: String,
    #[serde(default)]
    amount: u32,
}

/// version フィールドだけ先に覗くためのヘッダー。
#[derive(Deserialize)]
struct VersionHeader {
    version: Option<u32>,
}

fn extract_save(state: &GameState) -> SaveData {
    SaveData {
        version: SAVE_VERSION,
        game: GameSave {
            points: state.points,
            click_power: state.click_power,
            producers: state.producer_owned.clone(),
            last_update: state.last_update,
        },
    }
}

fn apply_save(save: GameSave) -> GameState {
    GameState {
        points: save.points,
        click_power: save.click_power,
        producer_owned: save.producers,
        last_update: save.last_update,
    }
}

/// `lastTick` が無効なら `now` を使う（1970 年からの放置収入を防ぐ）。
fn migrate_legacy(legacy: LegacySave, now: Millis) -> GameState {
    GameState {
        points: legacy.points,
        click_power: legacy.click_power,
        producer_owned: legacy
            .items
            .into_iter()
            .map(|item| (item.id, item.amount))
            .collect(),
        last_update: if legacy.last_tick.is_finite() && legacy.last_tick > 0.0 {
            legacy.last_tick as Millis
        } else {
            now
        },
    }
}

/// JSON 文字列をバージョンに応じて GameState に復元する（自己修復前）。
fn decode(json: &str, now: Millis) -> Result<GameState> {
    let header: VersionHeader = serde_json::from_str(json)?;
    let version = header.version.unwrap_or(1);

    if version < MIN_COMPATIBLE_VERSION || version > SAVE_VERSION {
        return Err(GameError::PersistenceUnavailable(format!(
            "incompatible save version (saved={}, supported={}..={})",
            version, MIN_COMPATIBLE_VERSION, SAVE_VERSION
        )));
    }

    if version == 1 {
        let legacy: LegacySave = serde_json::from_str(json)?;
        console::info(&format!(
            "旧バージョンのセーブデータをマイグレーション (saved=1, current={})。",
            SAVE_VERSION
        ));
        return Ok(migrate_legacy(legacy, now));
    }

    let data: SaveData = serde_json::from_str(json)?;
    Ok(apply_save(data.game))
}

fn encode(state: &GameState) -> Result<String> {
    Ok(serde_json::to_string(&extract_save(state))?)
}

/// ゲーム状態を保存する。
pub fn save_game(store: &dyn SaveStore, state: &GameState) -> Result<()> {
    let json = encode(state)?;
    store.write(&json)
}

/// セーブからゲーム状態を復元する。失敗しない。
///
/// セーブが無い・読めない・壊れている・互換性が無い場合は新規ゲームを返す。
/// 壊れたデータは削除する。
pub fn load_game(store: &dyn SaveStore, catalog: &Catalog, now: Millis) -> GameState {
    let json = match store.read() {
        Ok(Some(j)) => j,
        Ok(None) => return GameState::new(catalog, now),
        Err(e) => {
            console::warn(&format!("セーブの読み込みに失敗: {e}"));
            return GameState::new(catalog, now);
        }
    };

    let mut state = match decode(&json, now) {
        Ok(s) => s,
        Err(e) => {
            console::warn(&format!("セーブデータを破棄します: {e}"));
            if let Err(e) = store.remove() {
                console::warn(&format!("セーブの削除に失敗: {e}"));
            }
            return GameState::new(catalog, now);
        }
    };

    if state.normalize(catalog) {
        console::info("セーブデータを修復しました。");
    }
    state
}

/// セーブデータを削除する。
pub fn delete_save(store: &dyn SaveStore) -> Result<()> {
    store.remove()
}

/// メモリ上のセーブ先。ネイティブ実行とテストで使う。
#[derive(Default)]
pub struct MemoryStore {
    data: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_data(data: &str) -> Self {
        Self {
            data: RefCell::new(Some(data.to_string())),
        }
    }

    #[cfg(test)]
    pub fn contents(&self) -> Option<String> {
        self.data.borrow().clone()
    }
}

impl SaveStore for MemoryStore {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.data.borrow().clone())
    }

    fn write(&self, data: &str) -> Result<()> {
        *self.data.borrow_mut() = Some(data.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        *self.data.borrow_mut() = None;
        Ok(())
    }
}

/// localStorage のセーブ先。WASM 環境でのみ動作。
#[cfg(target_arch = "wasm32")]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| GameError::PersistenceUnavailable("localStorage が使えません".into()))
    }
}

#[cfg(target_arch = "wasm32")]
impl SaveStore for LocalStorageStore {
    fn read(&self) -> Result<Option<String>> {
        Self::storage()?
            .get_item(STORAGE_KEY)
            .map_err(|e| GameError::PersistenceUnavailable(format!("{e:?}")))
    }

    fn write(&self, data: &str) -> Result<()> {
        Self::storage()?
            .set_item(STORAGE_KEY, data)
            .map_err(|e| GameError::PersistenceUnavailable(format!("{e:?}")))
    }

    fn remove(&self) -> Result<()> {
        Self::storage()?
            .remove_item(STORAGE_KEY)
            .map_err(|e| GameError::PersistenceUnavailable(format!("{e:?}")))
    }
}
