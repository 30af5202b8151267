// APIサーバー経由で経費明細を管理するリポジトリ実装

use crate::features::bills::models::Bill;
use crate::features::bills::repository::{BillRepository, UploadedReceipt};
use crate::shared::config::environment::ApiConfig;
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use log::{info, warn};
use reqwest::{multipart, Client, StatusCode};
use std::time::Duration;

/// APIサーバーを使用する経費リポジトリ
pub struct ApiBillRepository {
    client: Client,
    config: ApiConfig,
}

impl ApiBillRepository {
    /// 環境変数の設定でリポジトリを作成する
    pub fn new() -> AppResult<Self> {
        Self::with_config(ApiConfig::from_env())
    }

    /// 設定を指定してリポジトリを作成する
    ///
    /// # 引数
    /// * `config` - API設定
    pub fn with_config(config: ApiConfig) -> AppResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("HTTPクライアント初期化失敗: {e}")))?;

        Ok(Self { client, config })
    }

    /// HTTPステータスコードを表示用エラーに変換する
    ///
    /// エラーメッセージに構造化コードは持たせず、画面にそのまま
    /// 表示できる "Erreur <code>" 形式のテキストのみを保持する。
    fn status_error(status: StatusCode) -> AppError {
        AppError::external_service(format!("Erreur {}", status.as_u16()))
    }

    /// リトライ機能付きでリクエストを送信する
    ///
    /// リトライ対象は接続などのトランスポート層の失敗のみ。HTTPの
    /// エラーステータスは即座にエラーとして返す。
    async fn send_with_retry(
        &self,
        request: reqwest::RequestBuilder,
        method: &str,
        endpoint: &str,
    ) -> AppResult<reqwest::Response> {
        let mut attempts = 0;
        loop {
            match request.try_clone() {
                Some(cloned_request) => match cloned_request.send().await {
                    Ok(response) => {
                        if response.status().is_success() {
                            info!("{method}リクエスト成功: endpoint={endpoint}");
                            return Ok(response);
                        }
                        warn!(
                            "APIサーバーがエラーステータスを返しました: endpoint={endpoint}, status={}",
                            response.status()
                        );
                        return Err(Self::status_error(response.status()));
                    }
                    Err(e) => {
                        if attempts < self.config.max_retries {
                            attempts += 1;
                            let delay = Duration::from_secs(2_u64.pow(attempts));
                            warn!(
                                "APIリクエスト失敗、リトライします: attempt={attempts}/{}, delay={delay:?}",
                                self.config.max_retries
                            );
                            tokio::time::sleep(delay).await;
                            continue;
                        }
                        return Err(AppError::external_service(format!(
                            "Erreur de connexion au serveur: {e}"
                        )));
                    }
                },
                None => {
                    return Err(AppError::external_service(
                        "Erreur de communication avec le serveur",
                    ));
                }
            }
        }
    }

    /// 保存パスからファイル名部分を取り出す
    fn file_name_of(path: &str) -> &str {
        path.rsplit('/').next().unwrap_or(path)
    }

    /// ファイル名からContent-Typeを取得
    fn content_type_of(file_name: &str) -> &'static str {
        let extension = std::path::Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            _ => "application/octet-stream",
        }
    }
}

#[async_trait]
impl BillRepository for ApiBillRepository {
    async fn list_bills(&self) -> AppResult<Vec<Bill>> {
        let url = format!("{}/bills", self.config.base_url);
        let request = self.client.get(&url);

        let response = self.send_with_retry(request, "GET", "/bills").await?;
        let bills: Vec<Bill> = response
            .json()
            .await
            .map_err(|e| AppError::external_service(format!("Réponse invalide du serveur: {e}")))?;

        info!("経費一覧を取得しました: count={}", bills.len());
        Ok(bills)
    }

    async fn create_bill(&self, bill: &Bill) -> AppResult<()> {
        let url = format!("{}/bills", self.config.base_url);
        let request = self.client.post(&url).json(bill);

        self.send_with_retry(request, "POST", "/bills").await?;
        info!("経費明細を登録しました: name={}", bill.name);
        Ok(())
    }

    async fn upload_receipt(&self, path: &str, file: Vec<u8>) -> AppResult<UploadedReceipt> {
        let file_name = Self::file_name_of(path);
        let url = format!(
            "{}/storage?path={}",
            self.config.base_url,
            urlencoding::encode(path)
        );

        info!("領収書アップロード開始: path={path}");

        // マルチパートフォームはクローンできないためリトライごとに再構築する
        let mut attempts = 0;
        loop {
            let part = multipart::Part::bytes(file.clone())
                .file_name(file_name.to_string())
                .mime_str(Self::content_type_of(file_name))
                .map_err(|e| AppError::validation(format!("Type de fichier invalide: {e}")))?;
            let form = multipart::Form::new().part("file", part);

            match self.client.post(&url).multipart(form).send().await {
                Ok(response) => {
                    if !response.status().is_success() {
                        return Err(Self::status_error(response.status()));
                    }

                    let uploaded: UploadedReceipt = response.json().await.map_err(|e| {
                        AppError::external_service(format!("Réponse invalide du serveur: {e}"))
                    })?;

                    info!("領収書アップロード成功: path={path}, url={}", uploaded.url);
                    return Ok(uploaded);
                }
                Err(e) => {
                    if attempts < self.config.max_retries {
                        attempts += 1;
                        let delay = Duration::from_secs(2_u64.pow(attempts));
                        warn!(
                            "APIリクエスト失敗、リトライします: attempt={attempts}/{}, delay={delay:?}",
                            self.config.max_retries
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(AppError::external_service(format!(
                        "Erreur de connexion au serveur: {e}"
                    )));
                }
            }
        }
    }
}
