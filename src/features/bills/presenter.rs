use crate::features::bills::models::Bill;
use crate::features::bills::repository::BillRepository;
use crate::shared::utils::format_date;
use std::sync::Arc;

/// 一覧の1行分の表示データ
#[derive(Debug, Clone, PartialEq)]
pub struct BillRow {
    /// 経費の名称
    pub name: String,
    /// 費目
    pub bill_type: String,
    /// 表示用の日付ラベル（例: "4 Avr. 04"）
    pub date: String,
    /// 金額（解析できなかった入力はNone）
    pub amount: Option<i64>,
    /// 表示用のステータスラベル
    pub status: String,
    /// 領収書プレビュー用のURL
    pub file_url: Option<String>,
    /// 領収書のファイル名
    pub file_name: Option<String>,
}

impl BillRow {
    /// 経費明細から表示行を構築する
    fn from_bill(bill: &Bill) -> Self {
        Self {
            name: bill.name.clone(),
            bill_type: bill.bill_type.clone(),
            date: format_date(&bill.date).unwrap_or_default(),
            amount: bill.amount,
            status: bill.status.label().to_string(),
            file_url: bill.file_url.clone(),
            file_name: bill.file_name.clone(),
        }
    }

    /// 領収書プレビューを開く
    ///
    /// # 戻り値
    /// モーダルに表示するプレビュー。領収書がない行はNone
    pub fn open_preview(&self) -> Option<ReceiptPreview> {
        self.file_url.as_ref().map(|url| ReceiptPreview {
            file_url: url.clone(),
        })
    }
}

/// 領収書プレビューモーダルの表示データ
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptPreview {
    /// 表示する領収書画像のURL
    pub file_url: String,
}

/// 経費一覧画面の表示データ
///
/// 成功時は行の集合、失敗時はエラーメッセージのどちらか一方を持つ。
/// 空のデータでも構造は保たれる（行が0件になるだけ）。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BillsView {
    /// 表示する行（日付ラベルの降順）
    pub rows: Vec<BillRow>,
    /// 取得失敗時にそのまま表示するエラーメッセージ
    pub error: Option<String>,
}

impl BillsView {
    /// 経費明細の集合から一覧画面を構築する
    ///
    /// # 引数
    /// * `bills` - 表示する経費明細
    ///
    /// # 並び順
    /// 表示用の日付ラベル文字列の辞書順で降順に並べる。ISO形式の
    /// 元の日付ではなく整形後の文字列を比較する既存の表示挙動を
    /// 意図的に維持している（2桁年の境界での並びの癖も含む）。
    pub fn from_bills(bills: &[Bill]) -> Self {
        let mut rows: Vec<BillRow> = bills.iter().map(BillRow::from_bill).collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));

        Self { rows, error: None }
    }

    /// エラーメッセージのみの一覧画面を構築する
    ///
    /// # 引数
    /// * `message` - 画面にそのまま表示するメッセージ（例: "Erreur 404"）
    pub fn from_error<S: Into<String>>(message: S) -> Self {
        Self {
            rows: Vec::new(),
            error: Some(message.into()),
        }
    }
}

/// 経費一覧画面のプレゼンター
pub struct BillsPresenter {
    repository: Arc<dyn BillRepository>,
}

impl BillsPresenter {
    /// 新しいプレゼンターを作成する
    ///
    /// # 引数
    /// * `repository` - 経費リポジトリ
    pub fn new(repository: Arc<dyn BillRepository>) -> Self {
        Self { repository }
    }

    /// 経費一覧を取得して表示データを構築する
    ///
    /// 取得の失敗はここで捕捉し、エラーメッセージの画面として返す
    /// （リトライは行わない）。
    pub async fn load(&self) -> BillsView {
        match self.repository.list_bills().await {
            Ok(bills) => {
                log::debug!("経費一覧を表示します: count={}", bills.len());
                BillsView::from_bills(&bills)
            }
            Err(e) => {
                log::warn!("経費一覧の取得に失敗しました: {e}");
                BillsView::from_error(e.user_message())
            }
        }
    }
}
