use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// エラー表示を自動で消すまでの遅延
pub const AUTO_HIDE_DELAY: Duration = Duration::from_secs(2);

/// ファイル形式エラーの表示インジケーター
///
/// 画面上のエラーメッセージ要素の表示/非表示状態に相当する。
/// `show_transient`で表示した場合、固定の2秒後に無条件で非表示になる。
/// このタイマーは後続の操作でキャンセルされない。非表示化が後から
/// 選ばれた正常ファイルの表示状態と競合し得るが、表示上の問題に
/// とどまるため許容する。
#[derive(Debug, Clone, Default)]
pub struct ErrorIndicator {
    visible: Arc<AtomicBool>,
}

impl ErrorIndicator {
    /// 非表示状態のインジケーターを作成する
    pub fn new() -> Self {
        Self::default()
    }

    /// 現在表示中かどうか
    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    /// エラー表示を消す
    pub fn hide(&self) {
        self.visible.store(false, Ordering::SeqCst);
    }

    /// エラーを表示し、固定遅延の後に自動で非表示にする
    ///
    /// 遅延タイマーはキャンセル不可。タイマー起動後の`hide`や再表示とは
    /// 独立して、満了時に必ず非表示化する。
    pub fn show_transient(&self) {
        self.visible.store(true, Ordering::SeqCst);

        let visible = Arc::clone(&self.visible);
        tokio::spawn(async move {
            tokio::time::sleep(AUTO_HIDE_DELAY).await;
            visible.store(false, Ordering::SeqCst);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_show_transient_auto_hides() {
        let indicator = ErrorIndicator::new();

        indicator.show_transient();
        assert!(indicator.is_visible());

        // 固定遅延の経過後に自動で非表示になる
        tokio::time::sleep(AUTO_HIDE_DELAY + Duration::from_millis(100)).await;
        assert!(!indicator.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_is_not_cancelled_by_later_show() {
        let indicator = ErrorIndicator::new();

        indicator.show_transient();

        // 満了直前に再表示しても、最初のタイマーが満了した時点で消える
        tokio::time::sleep(AUTO_HIDE_DELAY - Duration::from_millis(100)).await;
        indicator.show_transient();
        assert!(indicator.is_visible());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!indicator.is_visible());
    }

    #[test]
    fn test_hide_and_visibility() {
        let indicator = ErrorIndicator::new();
        assert!(!indicator.is_visible());

        indicator.visible.store(true, Ordering::SeqCst);
        assert!(indicator.is_visible());

        indicator.hide();
        assert!(!indicator.is_visible());
    }
}
