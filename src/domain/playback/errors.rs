//! Playback Context - Errors

use thiserror::Error;

use super::PlaybackPhase;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid playback transition: {from} -> {to}")]
pub struct TransitionError {
    pub from: PlaybackPhase,
    pub to: PlaybackPhase,
}
