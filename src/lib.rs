// 経費明細（note de frais）提出モジュール
//
// 従業員が領収書を添付して経費を提出し、提出済みの明細を一覧で
// 確認するためのコア機能を提供する。画面のルーティングやセッションの
// ライフサイクルはホスト側のコラボレーターに委ねる。
pub mod features;
pub mod shared;

pub use shared::errors::{AppError, AppResult};
