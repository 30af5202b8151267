use crate::features::bills::models::{Bill, BillStatus, ReceiptRef};
use crate::shared::utils::parse_int_prefix;
use serde::Deserialize;

/// 税率欄が空・数値以外の場合に使用するデフォルト税率（%）
pub const DEFAULT_PCT: u32 = 20;

/// 経費フォームのスナップショット
///
/// すべてのフィールドを画面から読み取ったままの文字列で保持する。
/// 数値への解釈は`to_bill`で一括して行う。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BillForm {
    /// 費目（セレクトボックスの値）
    pub expense_type: String,
    /// 経費の名称
    pub name: String,
    /// 金額（生入力）
    pub amount: String,
    /// 提出日（YYYY-MM-DD形式）
    pub date: String,
    /// 付加価値税額（生入力、空の場合あり）
    pub vat: String,
    /// 付加価値税率（生入力）
    pub pct: String,
    /// コメント
    pub commentary: String,
}

impl BillForm {
    /// フォーム内容から経費明細を構築する
    ///
    /// # 引数
    /// * `email` - セッションから取得した提出者のメールアドレス
    /// * `receipt` - アップロード済み領収書への参照（未解決の場合はNone）
    ///
    /// # 戻り値
    /// ステータスがpendingの新規経費明細
    ///
    /// # 解釈規則
    /// - `amount`: 整数として解析し、解析不能な場合はNoneのまま通す
    /// - `pct`: 整数として解析し、空・非数値・負数の場合はデフォルトの20
    pub fn to_bill(&self, email: &str, receipt: Option<ReceiptRef>) -> Bill {
        let (file_url, file_name) = match receipt {
            Some(receipt) => (Some(receipt.file_url), Some(receipt.file_name)),
            None => (None, None),
        };

        Bill {
            email: email.to_string(),
            bill_type: self.expense_type.clone(),
            name: self.name.clone(),
            amount: parse_int_prefix(&self.amount),
            date: self.date.clone(),
            vat: self.vat.clone(),
            pct: parse_pct(&self.pct),
            commentary: self.commentary.clone(),
            file_url,
            file_name,
            status: BillStatus::Pending,
        }
    }
}

/// 税率欄の生入力を解釈する
///
/// # 引数
/// * `raw` - フォームの生入力値
///
/// # 戻り値
/// 非負整数の税率。空・非数値・負数の場合は`DEFAULT_PCT`
pub fn parse_pct(raw: &str) -> u32 {
    parse_int_prefix(raw)
        .and_then(|value| u32::try_from(value).ok())
        .unwrap_or(DEFAULT_PCT)
}
