/// 認証機能のモジュール
///
/// このモジュールが提供するのはセッションの読み取りサーフェスのみ。
/// ログイン・ログアウトなどセッションのライフサイクルはホスト側が管理する。
pub mod session;

pub use session::{SessionStore, SessionUser, USER_KEY};
