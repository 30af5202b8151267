use crate::features::bills::models::{Bill, BillStatus};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::current_paris_timestamp;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Mutex;

/// アップロード完了した領収書ファイルの情報
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedReceipt {
    /// 保存先のURL
    pub url: String,
}

/// 経費明細の永続化を抽象化するリポジトリ
///
/// 一覧取得・作成・領収書ファイルの保存のみを公開する。
/// 失敗は表示可能なメッセージ（例: "Erreur 404"）を持つ`AppError`として
/// 伝播する。
#[async_trait]
pub trait BillRepository: Send + Sync {
    /// 経費明細の一覧を取得する
    async fn list_bills(&self) -> AppResult<Vec<Bill>>;

    /// 経費明細を作成する
    ///
    /// # 引数
    /// * `bill` - 保存する経費明細（ステータスはpending）
    async fn create_bill(&self, bill: &Bill) -> AppResult<()>;

    /// 領収書ファイルを保存する
    ///
    /// # 引数
    /// * `path` - 保存先パス（例: "justificatifs/facture.jpg"）
    /// * `file` - ファイルの内容
    ///
    /// # 戻り値
    /// 保存先URLを含むアップロード結果
    async fn upload_receipt(&self, path: &str, file: Vec<u8>) -> AppResult<UploadedReceipt>;
}

/// SQLiteベースの経費リポジトリ
///
/// テスト・オフラインプレビュー用のローカルストア。領収書ファイルは
/// BLOBとして保存し、`local://`スキームのURLを返す。
pub struct SqliteBillRepository {
    conn: Mutex<Connection>,
}

impl SqliteBillRepository {
    /// 既存の接続からリポジトリを作成する（スキーマを初期化する）
    ///
    /// # 引数
    /// * `conn` - データベース接続
    pub fn new(conn: Connection) -> AppResult<Self> {
        // URLとファイル名は必ず対で保存される（片方のみの参照を拒否する）
        conn.execute(
            "CREATE TABLE IF NOT EXISTS bills (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL,
                type TEXT NOT NULL,
                name TEXT NOT NULL,
                amount INTEGER,
                date TEXT NOT NULL,
                vat TEXT NOT NULL,
                pct INTEGER NOT NULL,
                commentary TEXT NOT NULL,
                file_url TEXT,
                file_name TEXT,
                status TEXT NOT NULL CHECK(status IN ('pending', 'accepted', 'refused')),
                created_at TEXT NOT NULL,
                CHECK ((file_url IS NULL) = (file_name IS NULL))
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS receipt_files (
                path TEXT PRIMARY KEY,
                data BLOB NOT NULL,
                uploaded_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// インメモリデータベースでリポジトリを作成する
    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::new(conn)
    }

    /// ファイルベースのデータベースでリポジトリを作成する
    ///
    /// # 引数
    /// * `path` - データベースファイルのパス
    pub fn open<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let conn = Connection::open(path)?;
        Self::new(conn)
    }

    /// 保存済み領収書ファイルの内容を取得する（プレビュー用）
    ///
    /// # 引数
    /// * `path` - 保存時のパス
    ///
    /// # 戻り値
    /// ファイルの内容、または存在しない場合はエラー
    pub fn receipt_file(&self, path: &str) -> AppResult<Vec<u8>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| AppError::database(format!("verrou de connexion: {e}")))?;

        conn.query_row(
            "SELECT data FROM receipt_files WHERE path = ?1",
            params![path],
            |row| row.get(0),
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => AppError::not_found("Justificatif"),
            _ => AppError::Database(e.to_string()),
        })
    }
}

#[async_trait]
impl BillRepository for SqliteBillRepository {
    async fn list_bills(&self) -> AppResult<Vec<Bill>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| AppError::database(format!("verrou de connexion: {e}")))?;

        let mut stmt = conn.prepare(
            "SELECT email, type, name, amount, date, vat, pct, commentary,
                    file_url, file_name, status
             FROM bills ORDER BY date DESC",
        )?;

        let bills = stmt.query_map([], |row| {
            let status_code: String = row.get(10)?;
            let status = BillStatus::from_code(&status_code).ok_or_else(|| {
                rusqlite::Error::InvalidColumnType(
                    10,
                    "status".to_string(),
                    rusqlite::types::Type::Text,
                )
            })?;

            Ok(Bill {
                email: row.get(0)?,
                bill_type: row.get(1)?,
                name: row.get(2)?,
                amount: row.get(3)?,
                date: row.get(4)?,
                vat: row.get(5)?,
                pct: row.get(6)?,
                commentary: row.get(7)?,
                file_url: row.get(8)?,
                file_name: row.get(9)?,
                status,
            })
        })?;

        bills
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn create_bill(&self, bill: &Bill) -> AppResult<()> {
        let now = current_paris_timestamp();

        let conn = self
            .conn
            .lock()
            .map_err(|e| AppError::database(format!("verrou de connexion: {e}")))?;

        conn.execute(
            "INSERT INTO bills (email, type, name, amount, date, vat, pct, commentary,
                                file_url, file_name, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                bill.email,
                bill.bill_type,
                bill.name,
                bill.amount,
                bill.date,
                bill.vat,
                bill.pct,
                bill.commentary,
                bill.file_url,
                bill.file_name,
                bill.status.as_code(),
                now,
            ],
        )?;

        log::info!("経費明細を保存しました: name={}, date={}", bill.name, bill.date);
        Ok(())
    }

    async fn upload_receipt(&self, path: &str, file: Vec<u8>) -> AppResult<UploadedReceipt> {
        let now = current_paris_timestamp();

        let conn = self
            .conn
            .lock()
            .map_err(|e| AppError::database(format!("verrou de connexion: {e}")))?;

        conn.execute(
            "INSERT OR REPLACE INTO receipt_files (path, data, uploaded_at)
             VALUES (?1, ?2, ?3)",
            params![path, file, now],
        )?;

        log::info!("領収書ファイルを保存しました: path={path}");
        Ok(UploadedReceipt {
            url: format!("local://{path}"),
        })
    }
}
