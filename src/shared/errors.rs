use thiserror::Error;

/// アプリケーション全体で使用される統一エラー型
///
/// ユーザー向けメッセージはフランス語（製品の表示言語）で保持する。
#[derive(Debug, Error)]
pub enum AppError {
    /// バリデーション関連のエラー
    #[error("Erreur de validation: {0}")]
    Validation(String),

    /// ローカルデータベース関連のエラー
    #[error("Erreur de base de données: {0}")]
    Database(String),

    /// リソースが見つからない場合のエラー
    #[error("{0}")]
    NotFound(String),

    /// APIサーバーなど外部サービス連携でのエラー
    ///
    /// メッセージはそのまま画面に表示できる形式（例: "Erreur 404"）で保持する。
    #[error("{0}")]
    ExternalService(String),

    /// 設定関連のエラー
    #[error("Erreur de configuration: {0}")]
    Configuration(String),

    /// JSON解析エラー
    #[error("Format de données invalide: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// ユーザーに表示するためのメッセージを取得
    ///
    /// # 戻り値
    /// 画面にそのまま表示可能なエラーメッセージ
    pub fn user_message(&self) -> &str {
        match self {
            AppError::Validation(msg) => msg,
            AppError::Database(_) => "Une erreur est survenue lors de l'accès aux données",
            AppError::NotFound(msg) => msg,
            AppError::ExternalService(msg) => msg,
            AppError::Configuration(_) => "Erreur de configuration de l'application",
            AppError::Json(_) => "Format de données invalide",
        }
    }

    /// エラーの詳細情報を取得（ログ出力用）
    pub fn details(&self) -> String {
        format!("{self}")
    }

    /// バリデーションエラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `message` - バリデーションエラーメッセージ
    pub fn validation<S: Into<String>>(message: S) -> Self {
        AppError::Validation(message.into())
    }

    /// データベースエラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `message` - データベースエラーメッセージ
    pub fn database<S: Into<String>>(message: S) -> Self {
        AppError::Database(message.into())
    }

    /// リソース未発見エラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `resource` - 見つからなかったリソース名（フランス語）
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        AppError::NotFound(format!("{} introuvable", resource.into()))
    }

    /// 外部サービスエラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `message` - 表示用エラーメッセージ（例: "Erreur 500"）
    pub fn external_service<S: Into<String>>(message: S) -> Self {
        AppError::ExternalService(message.into())
    }

    /// 設定エラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `message` - 設定エラーメッセージ
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }
}

/// rusqlite::ErrorからAppErrorへの変換
impl From<rusqlite::Error> for AppError {
    fn from(error: rusqlite::Error) -> Self {
        AppError::Database(error.to_string())
    }
}

/// Result型のエイリアス（アプリケーション全体で使用）
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        // バリデーションエラーはメッセージをそのまま表示する
        let validation_error = AppError::validation("Le montant est invalide");
        assert_eq!(validation_error.user_message(), "Le montant est invalide");

        // 外部サービスエラーはAPIのエラーメッセージをそのまま表示する
        let api_error = AppError::external_service("Erreur 404");
        assert_eq!(api_error.user_message(), "Erreur 404");

        let not_found_error = AppError::not_found("Utilisateur");
        assert_eq!(not_found_error.user_message(), "Utilisateur introuvable");

        // データベースエラーは内部詳細を隠す
        let db_error = AppError::database("no such table: bills");
        assert_eq!(
            db_error.user_message(),
            "Une erreur est survenue lors de l'accès aux données"
        );
    }

    #[test]
    fn test_helper_functions() {
        // ヘルパー関数が対応するバリアントを生成することを確認
        assert!(matches!(
            AppError::validation("test"),
            AppError::Validation(_)
        ));
        assert!(matches!(AppError::not_found("test"), AppError::NotFound(_)));
        assert!(matches!(
            AppError::external_service("Erreur 500"),
            AppError::ExternalService(_)
        ));
        assert!(matches!(
            AppError::configuration("test"),
            AppError::Configuration(_)
        ));
    }

    #[test]
    fn test_error_details() {
        // エラー詳細のテスト
        let error = AppError::validation("détail");
        assert!(error.details().contains("détail"));
    }

    #[test]
    fn test_json_conversion() {
        // serde_jsonのエラーがJsonバリアントに変換されることを確認
        let parse_error = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        let error: AppError = parse_error.into();
        assert!(matches!(error, AppError::Json(_)));
        assert_eq!(error.user_message(), "Format de données invalide");
    }
}
