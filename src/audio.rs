//! Collision sound playback
//!
//! One output stream, fire-and-forget sinks. Finished sinks are pruned once
//! per frame via [`AudioOutput::update`]. No audio device at startup means
//! the game runs silently.

use std::io::Cursor;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    NoDevice(String),
    #[error("playback failed: {0}")]
    Playback(String),
}

pub struct AudioOutput {
    /// Must stay alive for the duration of playback
    _stream: OutputStream,
    handle: OutputStreamHandle,
    active: Vec<Sink>,
    volume: f32,
}

impl AudioOutput {
    pub fn new(volume: f32) -> Result<Self, AudioError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| AudioError::NoDevice(e.to_string()))?;
        log::info!("Audio output initialized");
        Ok(Self {
            _stream: stream,
            handle,
            active: Vec::new(),
            volume,
        })
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Play an encoded sound (WAV/OGG/FLAC) to completion
    pub fn play(&mut self, data: &[u8]) -> Result<(), AudioError> {
        let sink =
            Sink::try_new(&self.handle).map_err(|e| AudioError::Playback(e.to_string()))?;
        let source = Decoder::new(Cursor::new(data.to_vec()))
            .map_err(|e| AudioError::Playback(e.to_string()))?;
        sink.set_volume(self.volume);
        sink.append(source);
        self.active.push(sink);
        Ok(())
    }

    /// Drop finished sinks; call once per frame
    pub fn update(&mut self) {
        self.active.retain(|sink| !sink.empty());
    }
}
