/// 画面遷移用のルート定数
pub mod routes {
    /// 経費一覧画面
    pub const BILLS: &str = "#employee/bills";
    /// 経費作成画面
    pub const NEW_BILL: &str = "#employee/bill/new";
}

/// 画面遷移を行うコラボレーター
///
/// ルーティングの実装は外部（ホスト側）にあり、このモジュールは
/// ルートパス文字列を渡すだけで遷移を依頼する。
pub trait Navigator: Send + Sync {
    /// 指定されたルートに遷移する
    ///
    /// # 引数
    /// * `route` - 遷移先のルートパス（`routes`モジュールの定数）
    fn navigate(&self, route: &str);
}
