use crate::features::receipts::error_indicator::ErrorIndicator;
use once_cell::sync::Lazy;
use regex::Regex;

/// 領収書として受け付けるメディアサブタイプの一覧
///
/// 宣言されたサブタイプと大文字小文字を区別して照合する（正規化しない）。
pub const ALLOWED_SUBTYPES: [&str; 3] = ["jpg", "jpeg", "png"];

/// `"<kind>/<subtype>"` 形式のメディアタイプにマッチするパターン
static MEDIA_TYPE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^/]+)/([^/]+)$").expect("メディアタイプの正規表現が不正"));

/// ファイル入力で選択されたファイルの情報（一時的）
///
/// 選択イベントからアップロード解決または拒否までの間だけ存在する。
#[derive(Debug, Clone, PartialEq)]
pub struct FileSelection {
    /// 入力欄の生の値（入力元によってはパス形式になる）
    pub value: String,
    /// 宣言されたメディアタイプ（例: "image/png"）
    pub media_type: String,
}

/// ファイル検証の結果
#[derive(Debug, Clone, PartialEq)]
pub enum FileValidation {
    /// 受理。表示用ファイル名を保持する
    Accepted {
        /// パス部分を除いたファイル名
        file_name: String,
    },
    /// 拒否。選択は破棄され、エラーインジケーターが一時表示される
    Rejected,
}

/// 領収書ファイルの検証器
///
/// 宣言されたメディアタイプのサブタイプを許可リストと照合し、
/// エラーインジケーターの表示状態を駆動する。
#[derive(Debug, Clone, Default)]
pub struct ReceiptFileValidator {
    indicator: ErrorIndicator,
}

impl ReceiptFileValidator {
    /// 新しい検証器を作成する
    pub fn new() -> Self {
        Self::default()
    }

    /// エラーインジケーターへの参照を取得する
    pub fn indicator(&self) -> &ErrorIndicator {
        &self.indicator
    }

    /// 選択されたファイルを検証する
    ///
    /// # 引数
    /// * `selection` - 選択されたファイルの情報
    ///
    /// # 戻り値
    /// 受理の場合は表示用ファイル名付きの`Accepted`、拒否の場合は`Rejected`
    ///
    /// # 副作用
    /// - 受理: エラーインジケーターを非表示にする
    /// - 拒否: エラーインジケーターを一時表示する（2秒後に自動非表示）。
    ///   同じファイルの再選択で検証が再実行されるよう、呼び出し側は
    ///   選択値を破棄する
    pub fn validate(&self, selection: &FileSelection) -> FileValidation {
        match declared_subtype(&selection.media_type) {
            Some(subtype) if ALLOWED_SUBTYPES.contains(&subtype) => {
                self.indicator.hide();
                FileValidation::Accepted {
                    file_name: display_file_name(&selection.value),
                }
            }
            _ => {
                log::warn!(
                    "許可されていないファイル形式が選択されました: media_type={}",
                    selection.media_type
                );
                self.indicator.show_transient();
                FileValidation::Rejected
            }
        }
    }
}

/// 宣言されたメディアタイプからサブタイプを取り出す
///
/// # 引数
/// * `media_type` - `"<kind>/<subtype>"` 形式の文字列
///
/// # 戻り値
/// サブタイプ部分、または形式が不正な場合はNone
pub fn declared_subtype(media_type: &str) -> Option<&str> {
    MEDIA_TYPE_PATTERN
        .captures(media_type)
        .and_then(|captures| captures.get(2))
        .map(|matched| matched.as_str())
}

/// 入力欄の値から表示用ファイル名を導出する
///
/// 一部の入力元はバックスラッシュ区切りのパス形式の値を返すため、
/// 最後のセグメントのみを使用する。
pub fn display_file_name(value: &str) -> String {
    value.rsplit('\\').next().unwrap_or(value).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_subtype() {
        assert_eq!(declared_subtype("image/png"), Some("png"));
        assert_eq!(declared_subtype("document/txt"), Some("txt"));
        // 形式が不正な場合はNone
        assert_eq!(declared_subtype("png"), None);
        assert_eq!(declared_subtype("image/sub/type"), None);
        assert_eq!(declared_subtype(""), None);
    }

    #[test]
    fn test_display_file_name() {
        assert_eq!(display_file_name("image.png"), "image.png");
        // パス形式の値は最後のセグメントのみ使用する
        assert_eq!(
            display_file_name(r"C:\fakepath\facture.jpg"),
            "facture.jpg"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_accepts_allowed_subtypes() {
        let validator = ReceiptFileValidator::new();

        for media_type in ["image/jpg", "image/jpeg", "image/png"] {
            let outcome = validator.validate(&FileSelection {
                value: "image.png".to_string(),
                media_type: media_type.to_string(),
            });
            assert!(matches!(outcome, FileValidation::Accepted { .. }));
            assert!(!validator.indicator().is_visible());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejects_wrong_subtype_and_shows_indicator() {
        let validator = ReceiptFileValidator::new();

        let outcome = validator.validate(&FileSelection {
            value: "document.txt".to_string(),
            media_type: "document/txt".to_string(),
        });

        assert_eq!(outcome, FileValidation::Rejected);
        // エラーインジケーターが表示されている
        assert!(validator.indicator().is_visible());

        // 2秒後に自動で非表示になる
        tokio::time::sleep(std::time::Duration::from_millis(2100)).await;
        assert!(!validator.indicator().is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_subtype_match_is_case_sensitive() {
        let validator = ReceiptFileValidator::new();

        // 大文字のサブタイプは正規化せずそのまま照合するため拒否される
        let outcome = validator.validate(&FileSelection {
            value: "image.PNG".to_string(),
            media_type: "image/PNG".to_string(),
        });
        assert_eq!(outcome, FileValidation::Rejected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_valid_pick_racing_pending_auto_hide() {
        let validator = ReceiptFileValidator::new();

        // 拒否でタイマーが起動する
        validator.validate(&FileSelection {
            value: "document.txt".to_string(),
            media_type: "document/txt".to_string(),
        });

        // タイマー満了前に正常なファイルを選択してもタイマーは残り続けるが、
        // 受理時点で非表示化されるため表示上の状態は変わらない
        tokio::time::sleep(std::time::Duration::from_millis(1000)).await;
        let outcome = validator.validate(&FileSelection {
            value: "image.png".to_string(),
            media_type: "image/png".to_string(),
        });
        assert!(matches!(outcome, FileValidation::Accepted { .. }));
        assert!(!validator.indicator().is_visible());

        // 残っていたタイマーが満了しても非表示のまま（表示上の問題なし）
        tokio::time::sleep(std::time::Duration::from_millis(1200)).await;
        assert!(!validator.indicator().is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_accepted_file_keeps_derived_name() {
        let validator = ReceiptFileValidator::new();

        let outcome = validator.validate(&FileSelection {
            value: r"C:\fakepath\image.png".to_string(),
            media_type: "image/png".to_string(),
        });

        assert_eq!(
            outcome,
            FileValidation::Accepted {
                file_name: "image.png".to_string()
            }
        );
    }
}
