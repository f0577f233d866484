//! Playback Context - Aggregate Root

use super::{PlaybackPhase, PlaybackSnapshot, TransitionError};

/// 播放状态机
///
/// 不变量:
/// - is_loading 仅在 Requesting / Decoding 阶段为真
/// - is_playing 仅在 Playing 阶段为真
/// - 每次新的请求开始时清除上一次的错误
#[derive(Debug, Clone, Default)]
pub struct PlaybackMachine {
    phase: PlaybackPhase,
    error: Option<String>,
}

impl PlaybackMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            phase: self.phase,
            is_loading: self.phase.is_loading(),
            is_playing: self.phase.is_playing(),
            error: self.error.clone(),
        }
    }

    /// Idle → Requesting
    pub fn begin_request(&mut self) -> Result<(), TransitionError> {
        self.transition(&[PlaybackPhase::Idle], PlaybackPhase::Requesting)?;
        self.error = None;
        Ok(())
    }

    /// Requesting → Decoding
    pub fn begin_decode(&mut self) -> Result<(), TransitionError> {
        self.transition(&[PlaybackPhase::Requesting], PlaybackPhase::Decoding)
    }

    /// Decoding → Playing
    pub fn start_playing(&mut self) -> Result<(), TransitionError> {
        self.transition(&[PlaybackPhase::Decoding], PlaybackPhase::Playing)
    }

    /// Playing → Idle（显式停止或自然结束）
    pub fn finish(&mut self) -> Result<(), TransitionError> {
        self.transition(&[PlaybackPhase::Playing], PlaybackPhase::Idle)
    }

    /// Requesting | Decoding → Idle，记录错误信息
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), TransitionError> {
        self.transition(
            &[PlaybackPhase::Requesting, PlaybackPhase::Decoding],
            PlaybackPhase::Idle,
        )?;
        self.error = Some(message.into());
        Ok(())
    }

    fn transition(
        &mut self,
        allowed: &[PlaybackPhase],
        to: PlaybackPhase,
    ) -> Result<(), TransitionError> {
        if !allowed.contains(&self.phase) {
            return Err(TransitionError {
                from: self.phase,
                to,
            });
        }
        self.phase = to;
        Ok(())
    }
}
