//! Cat Clicker のエラー型。
//!
//! エンジン操作はパニックせず、失敗はすべてこの enum で返す。

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    /// カタログに存在しないプロデューサー ID が指定された（配線ミス）。
    #[error("unknown producer: {0}")]
    UnknownProducer(String),

    /// ポイント不足。状態は変更されない。
    #[error("insufficient funds: price {price}, have {points}")]
    InsufficientFunds { price: f64, points: f64 },

    /// セーブ/ロード先が使えない。ゲームはメモリ上で続行する。
    #[error("persistence unavailable: {0}")]
    PersistenceUnavailable(String),

    /// 起動時のカタログ設定が不正。
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::PersistenceUnavailable(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
