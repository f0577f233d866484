//! Simulated Audio Output - 无声模拟输出
//!
//! 用于没有音频设备的主机：按解码后音频的时长计时，
//! 到时后触发完成回调

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::session::wait_for_finish;
use super::ThreadedSession;
use crate::application::ports::{
    AudioOutputPort, CompletionCallback, DecodedAudio, OutputError, OutputSession,
};

/// 与设备输出相同的结束检测间隔
const POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Debug, Default)]
pub struct SimulatedAudioOutput;

impl SimulatedAudioOutput {
    pub fn new() -> Self {
        Self
    }
}

impl AudioOutputPort for SimulatedAudioOutput {
    fn open(
        &self,
        audio: DecodedAudio,
        on_finished: CompletionCallback,
    ) -> Result<Box<dyn OutputSession>, OutputError> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let active = Arc::new(AtomicBool::new(true));
        let thread_active = active.clone();
        let duration = audio.duration();

        tracing::debug!(
            duration_ms = duration.as_millis() as u64,
            "Simulated output session opened"
        );

        std::thread::Builder::new()
            .name("rulecast-simulated-playback".to_string())
            .spawn(move || {
                let deadline = Instant::now() + duration;
                let finished_naturally =
                    wait_for_finish(&stop_rx, POLL_INTERVAL, || Instant::now() >= deadline);
                thread_active.store(false, Ordering::SeqCst);
                if finished_naturally {
                    on_finished();
                }
            })
            .map_err(|e| OutputError::Playback(format!("Failed to spawn playback thread: {}", e)))?;

        Ok(Box::new(ThreadedSession::new(stop_tx, active)))
    }
}
