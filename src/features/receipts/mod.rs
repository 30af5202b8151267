// 領収書機能モジュール

pub mod error_indicator;
pub mod validator;

// 公開インターフェース
pub use error_indicator::{ErrorIndicator, AUTO_HIDE_DELAY};
pub use validator::{
    declared_subtype, display_file_name, FileSelection, FileValidation, ReceiptFileValidator,
    ALLOWED_SUBTYPES,
};
