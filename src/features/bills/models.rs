use serde::{Deserialize, Serialize};

/// 経費フォームで選択できる費目の一覧
pub const EXPENSE_TYPES: [&str; 7] = [
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "IT et électronique",
    "Equipement et matériel",
    "Fournitures de bureau",
];

/// 経費明細のライフサイクル状態
///
/// 既知の3状態のみを許可する閉じた列挙型。未知のコードは
/// デシリアライズの時点でエラーになる（暗黙のundefinedを返さない）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    /// 承認待ち
    Pending,
    /// 承認済み
    Accepted,
    /// 却下
    Refused,
}

impl BillStatus {
    /// 表示用ラベルに変換する
    ///
    /// # 戻り値
    /// 画面に表示するステータスラベル
    pub fn label(&self) -> &'static str {
        match self {
            BillStatus::Pending => "En attente",
            BillStatus::Accepted => "Accepté",
            BillStatus::Refused => "Refused",
        }
    }

    /// 永続化用のコード文字列を取得する
    pub fn as_code(&self) -> &'static str {
        match self {
            BillStatus::Pending => "pending",
            BillStatus::Accepted => "accepted",
            BillStatus::Refused => "refused",
        }
    }

    /// 永続化されたコード文字列から復元する
    ///
    /// # 引数
    /// * `code` - コード文字列（"pending" / "accepted" / "refused"）
    ///
    /// # 戻り値
    /// 対応するステータス、未知のコードはNone（呼び出し側で明示的に失敗させる）
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "pending" => Some(BillStatus::Pending),
            "accepted" => Some(BillStatus::Accepted),
            "refused" => Some(BillStatus::Refused),
            _ => None,
        }
    }
}

/// アップロード済み領収書への参照
///
/// URLとファイル名は必ず対で保持する（片方だけが設定された
/// 中途半端な参照を型として作れないようにする）。
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptRef {
    /// アップロード先のURL
    pub file_url: String,
    /// 領収書ファイル名（パスを除いたベース名）
    pub file_name: String,
}

/// 経費明細データモデル
///
/// 提出時にコントローラーがメモリ上で構築し、一度だけ永続化される。
/// 以降は一覧画面からの読み取り専用。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    /// 提出者のメールアドレス（セッション由来、フォームからは編集不可）
    pub email: String,
    /// 費目（EXPENSE_TYPESのいずれか）
    #[serde(rename = "type")]
    pub bill_type: String,
    /// 経費の名称
    pub name: String,
    /// 金額。解析できなかった入力はNoneのまま保持される
    pub amount: Option<i64>,
    /// 提出日（YYYY-MM-DD形式、並び順の基準）
    pub date: String,
    /// 付加価値税額（テキストのまま保持、空の場合あり）
    pub vat: String,
    /// 付加価値税率（%）
    pub pct: u32,
    /// コメント（任意）
    pub commentary: String,
    /// 領収書のURL（アップロード完了までnull）
    #[serde(rename = "fileUrl")]
    pub file_url: Option<String>,
    /// 領収書のファイル名
    #[serde(rename = "fileName")]
    pub file_name: Option<String>,
    /// ライフサイクル状態（新規作成時は常にpending）
    pub status: BillStatus,
}

impl Bill {
    /// 領収書参照を取得する（URLとファイル名が揃っている場合のみ）
    pub fn receipt(&self) -> Option<ReceiptRef> {
        match (&self.file_url, &self.file_name) {
            (Some(url), Some(name)) => Some(ReceiptRef {
                file_url: url.clone(),
                file_name: name.clone(),
            }),
            _ => None,
        }
    }
}
