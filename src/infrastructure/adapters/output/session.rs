//! Threaded Session - 由独立线程驱动的输出会话句柄

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::OutputSession;

/// 播放线程的控制句柄
///
/// stop() 只发送信号，不等待线程退出
pub struct ThreadedSession {
    stop_tx: Option<Sender<()>>,
    active: Arc<AtomicBool>,
}

impl ThreadedSession {
    pub fn new(stop_tx: Sender<()>, active: Arc<AtomicBool>) -> Self {
        Self {
            stop_tx: Some(stop_tx),
            active,
        }
    }
}

impl OutputSession for ThreadedSession {
    fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            // 线程已自然结束时接收端已关闭，忽略发送失败
            let _ = tx.send(());
        }
        self.active.store(false, Ordering::SeqCst);
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

impl Drop for ThreadedSession {
    fn drop(&mut self) {
        self.stop();
    }
}

/// 在播放线程上等待结束
///
/// 每隔 `poll` 检查一次 `is_drained`。收到停止信号或句柄被丢弃时返回 false，
/// 自然播放完毕时返回 true。
pub(super) fn wait_for_finish(
    stop_rx: &Receiver<()>,
    poll: Duration,
    mut is_drained: impl FnMut() -> bool,
) -> bool {
    loop {
        match stop_rx.recv_timeout(poll) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => return false,
            Err(RecvTimeoutError::Timeout) => {
                if is_drained() {
                    return true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    const POLL: Duration = Duration::from_millis(5);

    #[test]
    fn test_drained_buffer_finishes_naturally() {
        let (_stop_tx, stop_rx) = mpsc::channel();
        let mut polls = 0;

        let finished = wait_for_finish(&stop_rx, POLL, || {
            polls += 1;
            polls == 3
        });

        assert!(finished);
        assert_eq!(polls, 3);
    }

    #[test]
    fn test_stop_signal_wins_over_playback() {
        let (stop_tx, stop_rx) = mpsc::channel();
        stop_tx.send(()).unwrap();

        assert!(!wait_for_finish(&stop_rx, POLL, || false));
    }

    #[test]
    fn test_dropped_session_counts_as_stop() {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let active = Arc::new(AtomicBool::new(true));
        let mut session = ThreadedSession::new(stop_tx, active.clone());
        session.stop();
        drop(session);

        assert!(!active.load(Ordering::SeqCst));
        assert!(!wait_for_finish(&stop_rx, POLL, || false));
    }
}
