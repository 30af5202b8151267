use crate::shared::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

/// セッションストアでログイン中ユーザーを保持するキー
pub const USER_KEY: &str = "user";

/// ログイン中のユーザー情報
///
/// セッションストアの`"user"`キーにJSONとして格納されている。
/// セッションの作成（ログイン処理）はこのモジュールの対象外。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    /// 提出者のメールアドレス
    pub email: String,
    /// ユーザー種別（例: "Employee"）
    #[serde(rename = "type")]
    pub user_type: String,
}

/// 文字列キー/値のセッションストア
///
/// ホスト環境のセッションストレージに相当するコラボレーター。
/// このモジュールからは読み取りのみ行う。
#[derive(Debug, Default)]
pub struct SessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl SessionStore {
    /// 新しい空のセッションストアを作成する
    pub fn new() -> Self {
        Self::default()
    }

    /// 値を保存する
    ///
    /// # 引数
    /// * `key` - キー
    /// * `value` - 保存する文字列値
    pub fn set_item(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    /// 値を取得する
    ///
    /// # 引数
    /// * `key` - キー
    ///
    /// # 戻り値
    /// 保存されている値、または存在しない場合はNone
    pub fn get_item(&self, key: &str) -> Option<String> {
        self.entries.lock().ok().and_then(|e| e.get(key).cloned())
    }

    /// 値を削除する
    ///
    /// # 引数
    /// * `key` - キー
    pub fn remove_item(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }

    /// ログイン中のユーザー情報を取得する
    ///
    /// # 戻り値
    /// セッションのユーザー情報、または未ログイン・不正な形式の場合はエラー
    pub fn current_user(&self) -> AppResult<SessionUser> {
        let raw = self
            .get_item(USER_KEY)
            .ok_or_else(|| AppError::not_found("Utilisateur"))?;

        let user: SessionUser = serde_json::from_str(&raw)?;
        Ok(user)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// 従業員としてログインした状態のストアを作成する
    pub(crate) fn employee_session(email: &str) -> SessionStore {
        let store = SessionStore::new();
        store.set_item(
            USER_KEY,
            &format!(r#"{{"email":"{email}","type":"Employee"}}"#),
        );
        store
    }

    #[test]
    fn test_set_get_remove_item() {
        let store = SessionStore::new();

        store.set_item("jwt", "abc123");
        assert_eq!(store.get_item("jwt"), Some("abc123".to_string()));

        store.remove_item("jwt");
        assert_eq!(store.get_item("jwt"), None);
    }

    #[test]
    fn test_current_user() {
        let store = employee_session("a@a");

        let user = store.current_user().unwrap();
        assert_eq!(user.email, "a@a");
        assert_eq!(user.user_type, "Employee");
    }

    #[test]
    fn test_current_user_without_session() {
        // 未ログインの場合はリソース未発見エラー
        let store = SessionStore::new();
        let result = store.current_user();
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_current_user_with_malformed_json() {
        // 壊れたJSONはJSON解析エラーとして伝播する
        let store = SessionStore::new();
        store.set_item(USER_KEY, "{pas du json");

        let result = store.current_user();
        assert!(matches!(result, Err(AppError::Json(_))));
    }
}
