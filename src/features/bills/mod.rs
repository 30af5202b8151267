/// 経費明細機能モジュール
///
/// このモジュールは経費明細の提出と一覧表示に関連する機能を提供します：
/// - フォーム入力からの経費明細の構築と登録
/// - 領収書アップロードのワークフロー
/// - 提出済み明細の一覧表示（日付ラベルの降順）
/// - 永続化の抽象化（ローカルストア / APIサーバー）
// サブモジュールの宣言
pub mod api_repository;
pub mod controller;
pub mod form;
pub mod models;
pub mod presenter;
pub mod repository;

// 公開インターフェース：外部から使用可能な型をエクスポート

// モデル
pub use models::{Bill, BillStatus, ReceiptRef, EXPENSE_TYPES};

// フォーム
pub use form::{BillForm, DEFAULT_PCT};

// リポジトリ
pub use api_repository::ApiBillRepository;
pub use repository::{BillRepository, SqliteBillRepository, UploadedReceipt};

// コントローラーとプレゼンター
pub use controller::NewBillController;
pub use presenter::{BillRow, BillsPresenter, BillsView, ReceiptPreview};
