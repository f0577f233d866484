//! Playback Controller - 播放控制器
//!
//! 持有唯一的音频输出会话，驱动播放状态机:
//! Idle → Requesting → Decoding → Playing → Idle
//!
//! 状态锁从不跨越 `.await` 持有；合成请求与打开输出设备都在锁外执行。

use std::sync::{Arc, Mutex, MutexGuard};

use crate::application::error::PlaybackError;
use crate::application::ports::{
    AudioDecoderPort, AudioOutputPort, CompletionCallback, OutputError, OutputSession,
    PlaybackEventPort, SpeechSynthesizerPort,
};
use crate::domain::playback::{PlaybackMachine, PlaybackPhase, PlaybackSnapshot};

/// 当前输出会话
struct ActiveSession {
    id: u64,
    handle: Box<dyn OutputSession>,
}

#[derive(Default)]
struct ControllerInner {
    machine: PlaybackMachine,
    session: Option<ActiveSession>,
    next_session_id: u64,
    /// 正在打开设备的会话 id
    opening: Option<u64>,
    /// 打开期间已收到该会话的完成回调
    finished_while_opening: bool,
}

/// 播放控制器
///
/// 同一时刻至多存在一个输出会话：旧会话在预留新会话 id 的同一把锁内拆除，
/// 打开期间状态停留在 Decoding，toggle 一律返回 Busy，不会有第二个会话被打开。
pub struct PlaybackController {
    text: String,
    synthesizer: Arc<dyn SpeechSynthesizerPort>,
    decoder: Arc<dyn AudioDecoderPort>,
    output: Arc<dyn AudioOutputPort>,
    events: Arc<dyn PlaybackEventPort>,
    inner: Mutex<ControllerInner>,
}

impl PlaybackController {
    pub fn new(
        text: impl Into<String>,
        synthesizer: Arc<dyn SpeechSynthesizerPort>,
        decoder: Arc<dyn AudioDecoderPort>,
        output: Arc<dyn AudioOutputPort>,
        events: Arc<dyn PlaybackEventPort>,
    ) -> Self {
        Self {
            text: text.into(),
            synthesizer,
            decoder,
            output,
            events,
            inner: Mutex::new(ControllerInner::default()),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.lock().machine.snapshot()
    }

    pub fn has_active_session(&self) -> bool {
        self.lock().session.is_some()
    }

    /// 播放/停止切换
    ///
    /// - Playing: 立即停止并释放输出会话
    /// - Requesting / Decoding: 拒绝（`PlaybackError::Busy`），状态不变
    /// - Idle: 开始新的播放周期
    ///
    /// 周期内的错误会写入状态（供错误横幅显示）并同时返回给调用方。
    pub async fn toggle(self: &Arc<Self>) -> Result<PlaybackSnapshot, PlaybackError> {
        {
            let mut inner = self.lock();
            match inner.machine.phase() {
                PlaybackPhase::Playing => {
                    tracing::info!("Stopping playback on toggle");
                    self.stop_locked(&mut inner);
                    return Ok(self.publish(&inner));
                }
                phase @ (PlaybackPhase::Requesting | PlaybackPhase::Decoding) => {
                    tracing::warn!(phase = %phase, "Toggle rejected: request already in progress");
                    return Err(PlaybackError::Busy);
                }
                PlaybackPhase::Idle => {
                    inner.machine.begin_request()?;
                    self.publish(&inner);
                }
            }
        }

        tracing::info!(text_len = self.text.len(), "Starting playback cycle");

        match self.run_cycle().await {
            Ok(snapshot) => Ok(snapshot),
            Err(err) => {
                tracing::error!(error = %err, "Playback cycle failed");
                let mut inner = self.lock();
                if let Err(e) = inner.machine.fail(err.user_message()) {
                    tracing::error!(error = %e, "Failed to record playback error");
                }
                self.publish(&inner);
                Err(err)
            }
        }
    }

    /// 停止播放（幂等）
    ///
    /// 只影响播放会话和 is_playing；进行中的请求不会被取消，
    /// 其加载状态由该请求结束时自行清除。
    pub fn stop(&self) {
        let mut inner = self.lock();
        if self.stop_locked(&mut inner) {
            self.publish(&inner);
        }
    }

    async fn run_cycle(self: &Arc<Self>) -> Result<PlaybackSnapshot, PlaybackError> {
        let result = self.synthesizer.synthesize(&self.text).await?;

        tracing::debug!(
            payload_len = result.audio_base64.len(),
            mime_type = ?result.mime_type,
            "Synthesis completed"
        );

        {
            let mut inner = self.lock();
            inner.machine.begin_decode()?;
            self.publish(&inner);
        }

        let audio = self.decoder.decode(&result.audio_base64)?;

        tracing::debug!(
            frames = audio.frames(),
            sample_rate = audio.sample_rate,
            channels = audio.channels,
            duration_ms = audio.duration().as_millis() as u64,
            "Audio decoded"
        );

        let (session_id, on_finished) = {
            let mut inner = self.lock();

            // 创建新会话前先拆除任何残留会话
            self.teardown_session(&mut inner);

            let session_id = inner.next_session_id;
            inner.next_session_id += 1;
            inner.opening = Some(session_id);
            inner.finished_while_opening = false;
            (session_id, self.completion_callback(session_id))
        };

        // 打开设备可能阻塞（等待音频线程握手），放到阻塞线程池执行
        let output = self.output.clone();
        let opened = tokio::task::spawn_blocking(move || output.open(audio, on_finished))
            .await
            .map_err(|e| OutputError::Playback(format!("Output task failed: {}", e)))
            .and_then(|result| result);

        let mut inner = self.lock();
        inner.opening = None;
        let finished_early = std::mem::take(&mut inner.finished_while_opening);

        let mut handle = opened?;
        if let Err(e) = inner.machine.start_playing() {
            handle.stop();
            return Err(e.into());
        }
        inner.session = Some(ActiveSession {
            id: session_id,
            handle,
        });

        tracing::info!(session_id, "Playback started");

        if finished_early {
            tracing::info!(session_id, "Playback finished while the output was opening");
            self.stop_locked(&mut inner);
        }

        Ok(self.publish(&inner))
    }

    fn completion_callback(self: &Arc<Self>, session_id: u64) -> CompletionCallback {
        let controller = Arc::downgrade(self);
        Box::new(move || {
            if let Some(controller) = controller.upgrade() {
                controller.on_session_finished(session_id);
            }
        })
    }

    /// 自然播放结束回调
    fn on_session_finished(&self, session_id: u64) {
        let mut inner = self.lock();

        let is_current = inner
            .session
            .as_ref()
            .map(|s| s.id == session_id)
            .unwrap_or(false);
        if !is_current {
            if inner.opening == Some(session_id) {
                tracing::debug!(session_id, "Session finished before it was installed");
                inner.finished_while_opening = true;
            } else {
                tracing::debug!(session_id, "Ignoring completion of superseded session");
            }
            return;
        }

        tracing::info!(session_id, "Playback finished");
        self.stop_locked(&mut inner);
        self.publish(&inner);
    }

    /// 返回状态是否发生变化
    fn stop_locked(&self, inner: &mut ControllerInner) -> bool {
        let had_session = self.teardown_session(inner);
        let was_playing = inner.machine.phase() == PlaybackPhase::Playing;
        if was_playing {
            if let Err(e) = inner.machine.finish() {
                tracing::error!(error = %e, "Failed to leave playing state");
            }
        }
        had_session || was_playing
    }

    fn teardown_session(&self, inner: &mut ControllerInner) -> bool {
        match inner.session.take() {
            Some(mut session) => {
                tracing::debug!(session_id = session.id, "Tearing down output session");
                session.handle.stop();
                true
            }
            None => false,
        }
    }

    fn publish(&self, inner: &ControllerInner) -> PlaybackSnapshot {
        let snapshot = inner.machine.snapshot();
        self.events.state_changed(&snapshot);
        snapshot
    }

    fn lock(&self) -> MutexGuard<'_, ControllerInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        let inner = self
            .inner
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(mut session) = inner.session.take() {
            session.handle.stop();
        }
    }
}
