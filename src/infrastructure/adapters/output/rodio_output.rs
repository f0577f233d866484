//! Rodio Audio Output - 通过 rodio 播放到默认输出设备
//!
//! 每个会话在独立线程上创建 OutputStream + Sink，
//! 播放结束或收到停止信号后在同一线程内释放设备

use rodio::buffer::SamplesBuffer;
use rodio::{OutputStreamBuilder, Sink};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::Arc;
use std::time::Duration;

use super::session::wait_for_finish;
use super::ThreadedSession;
use crate::application::ports::{
    AudioOutputPort, CompletionCallback, DecodedAudio, OutputError, OutputSession,
};

/// 播放结束检测间隔
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Rodio 输出
#[derive(Debug, Default)]
pub struct RodioAudioOutput;

impl RodioAudioOutput {
    pub fn new() -> Self {
        Self
    }
}

impl AudioOutputPort for RodioAudioOutput {
    fn open(
        &self,
        audio: DecodedAudio,
        on_finished: CompletionCallback,
    ) -> Result<Box<dyn OutputSession>, OutputError> {
        let (stop_tx, stop_rx) = mpsc::channel();
        let (ready_tx, ready_rx) = mpsc::sync_channel(1);
        let active = Arc::new(AtomicBool::new(true));
        let thread_active = active.clone();

        std::thread::Builder::new()
            .name("rulecast-playback".to_string())
            .spawn(move || run_session(audio, stop_rx, ready_tx, thread_active, on_finished))
            .map_err(|e| OutputError::Playback(format!("Failed to spawn playback thread: {}", e)))?;

        // 等待设备打开结果
        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Box::new(ThreadedSession::new(stop_tx, active))),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(OutputError::Playback(
                "Playback thread exited before opening the device".to_string(),
            )),
        }
    }
}

fn run_session(
    audio: DecodedAudio,
    stop_rx: Receiver<()>,
    ready_tx: SyncSender<Result<(), OutputError>>,
    active: Arc<AtomicBool>,
    on_finished: CompletionCallback,
) {
    let stream = match OutputStreamBuilder::open_default_stream() {
        Ok(stream) => stream,
        Err(e) => {
            active.store(false, Ordering::SeqCst);
            let _ = ready_tx.send(Err(OutputError::DeviceUnavailable(e.to_string())));
            return;
        }
    };

    let sink = Sink::connect_new(stream.mixer());
    let duration_ms = audio.duration().as_millis() as u64;
    sink.append(SamplesBuffer::new(
        audio.channels,
        audio.sample_rate,
        audio.samples,
    ));

    tracing::debug!(duration_ms, "Output stream opened");
    let _ = ready_tx.send(Ok(()));

    let finished_naturally = wait_for_finish(&stop_rx, POLL_INTERVAL, || sink.empty());
    if !finished_naturally {
        sink.stop();
    }

    drop(sink);
    drop(stream);
    active.store(false, Ordering::SeqCst);
    tracing::debug!(finished_naturally, "Output stream closed");

    if finished_naturally {
        on_finished();
    }
}
