use crate::features::auth::session::SessionStore;
use crate::features::bills::form::BillForm;
use crate::features::bills::models::{Bill, ReceiptRef};
use crate::features::bills::repository::BillRepository;
use crate::features::receipts::error_indicator::ErrorIndicator;
use crate::features::receipts::validator::{FileSelection, FileValidation, ReceiptFileValidator};
use crate::shared::errors::AppResult;
use crate::shared::navigation::{routes, Navigator};
use std::sync::{Arc, Mutex};

/// 領収書の保存先ディレクトリ
const RECEIPT_STORAGE_DIR: &str = "justificatifs";

/// 経費提出フォームのコントローラー
///
/// ファイル選択からアップロード、フォーム提出から明細の登録までの
/// ワークフローを所有する。リポジトリが設定されていない場合
/// （プレビュー専用の文脈）でも、ファイル検証と名前の導出は行う。
pub struct NewBillController {
    session: Arc<SessionStore>,
    repository: Option<Arc<dyn BillRepository>>,
    navigator: Arc<dyn Navigator>,
    validator: ReceiptFileValidator,
    /// アップロード解決時に書き込まれる領収書参照のキャッシュ。
    /// 提出時に読み取られる。
    receipt: Arc<Mutex<Option<ReceiptRef>>>,
}

impl NewBillController {
    /// 新しいコントローラーを作成する
    ///
    /// # 引数
    /// * `session` - セッションストア（提出者のメールアドレスの取得元）
    /// * `repository` - 経費リポジトリ（未設定の場合はアップロード・登録を行わない）
    /// * `navigator` - 画面遷移コラボレーター
    pub fn new(
        session: Arc<SessionStore>,
        repository: Option<Arc<dyn BillRepository>>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            session,
            repository,
            navigator,
            validator: ReceiptFileValidator::new(),
            receipt: Arc::new(Mutex::new(None)),
        }
    }

    /// エラーインジケーターへの参照を取得する
    pub fn error_indicator(&self) -> &ErrorIndicator {
        self.validator.indicator()
    }

    /// キャッシュ済みの領収書参照を取得する
    pub fn cached_receipt(&self) -> Option<ReceiptRef> {
        self.receipt.lock().ok().and_then(|cached| cached.clone())
    }

    /// ファイル選択イベントを処理する
    ///
    /// # 引数
    /// * `selection` - 選択されたファイルの情報
    /// * `file` - ファイルの内容
    ///
    /// # 戻り値
    /// 検証結果。拒否の場合、選択は破棄され既存のキャッシュは変更されない
    ///
    /// # 並行性
    /// アップロードは待たずにバックグラウンドで実行される。進行中の
    /// アップロードがある状態での再選択は妨げない（排他なし）。複数の
    /// アップロードが進行した場合、後に解決したものがキャッシュに残る。
    pub fn handle_file_change(&self, selection: FileSelection, file: Vec<u8>) -> FileValidation {
        let outcome = self.validator.validate(&selection);

        if let FileValidation::Accepted { file_name } = &outcome {
            // リポジトリ未設定の文脈では検証と名前導出のみ行う
            if let Some(repository) = &self.repository {
                let repository = Arc::clone(repository);
                let receipt = Arc::clone(&self.receipt);
                let file_name = file_name.clone();
                let path = format!("{RECEIPT_STORAGE_DIR}/{file_name}");

                tokio::spawn(async move {
                    match repository.upload_receipt(&path, file).await {
                        Ok(uploaded) => {
                            log::info!("領収書アップロード完了: file_name={file_name}");
                            if let Ok(mut cached) = receipt.lock() {
                                *cached = Some(ReceiptRef {
                                    file_url: uploaded.url,
                                    file_name,
                                });
                            }
                        }
                        Err(e) => {
                            // アップロード失敗時のリカバリーは行わない
                            log::error!("領収書アップロード失敗: {e}");
                        }
                    }
                });
            }
        }

        outcome
    }

    /// フォーム提出イベントを処理する
    ///
    /// セッションから提出者のメールアドレスを読み取り、フォームの
    /// スナップショットとキャッシュ済み領収書参照から明細を構築して
    /// 登録する。アップロードが未解決のまま提出された場合、領収書
    /// 参照なしの明細になる（既知の競合で、ここでは補正しない）。
    ///
    /// # 引数
    /// * `form` - フォームのスナップショット
    ///
    /// # 戻り値
    /// セッションが読み取れた場合はOk(())
    ///
    /// # 並行性
    /// 登録の完了は待たず、呼び出しの直後に一覧画面へ遷移する
    /// （楽観的遷移。意図された挙動であり、永続化の完了は保証しない）。
    pub fn handle_submit(&self, form: &BillForm) -> AppResult<()> {
        let user = self.session.current_user()?;

        let bill = form.to_bill(&user.email, self.cached_receipt());
        log::debug!(
            "経費明細を提出します: name={}, date={}, email={}",
            bill.name,
            bill.date,
            bill.email
        );

        self.create_bill(bill);
        self.navigator.navigate(routes::BILLS);

        Ok(())
    }

    /// 明細の登録をバックグラウンドで開始する
    ///
    /// 成功時は一覧画面へ遷移する。失敗はログに残すのみで破棄される
    /// （利用者への通知はこの層の責務外）。
    fn create_bill(&self, bill: Bill) {
        if let Some(repository) = &self.repository {
            let repository = Arc::clone(repository);
            let navigator = Arc::clone(&self.navigator);

            tokio::spawn(async move {
                match repository.create_bill(&bill).await {
                    Ok(()) => navigator.navigate(routes::BILLS),
                    Err(e) => log::warn!("経費明細の登録に失敗しました: {e}"),
                }
            });
        }
    }
}
