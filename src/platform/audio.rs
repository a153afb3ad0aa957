//! Audio playback capability.
//!
//! [`AudioTrack`] is the seam the timer talks to. [`SinkTrack`] decodes a file
//! with rodio and plays it through a [`Sink`] on the default output device.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::error::MindfulError;

/// A single loadable sound.
#[cfg_attr(test, mockall::automock)]
pub trait AudioTrack {
    /// Start (or resume) playback.
    ///
    /// # Errors
    ///
    /// Returns `MindfulError::Playback` when the sound cannot be started.
    fn play(&mut self) -> Result<(), MindfulError>;

    /// Stop playback, keeping the position.
    fn pause(&mut self);

    /// Reset the playback position to the start.
    fn rewind(&mut self);

    /// Set the output volume (0.0 - 1.0).
    fn set_volume(&mut self, volume: f32);

    /// Restart automatically when the end is reached.
    fn set_looping(&mut self, looping: bool);

    /// Whether sound is coming out right now.
    fn is_playing(&self) -> bool;

    /// Give the track a chance to notice it ran dry.
    ///
    /// # Errors
    ///
    /// Returns `MindfulError::Playback` when a looping track could not be
    /// reloaded.
    fn poll(&mut self) -> Result<(), MindfulError>;
}

/// A sound file decoded by rodio and played through its own [`Sink`].
///
/// The output device is opened on the first `play`, so a machine without
/// audio only fails when sound is asked for.
pub struct SinkTrack {
    path: PathBuf,
    volume: f32,
    looping: bool,
    output: Option<(OutputStream, OutputStreamHandle)>,
    sink: Option<Sink>,
}

impl SinkTrack {
    /// Load a track. Nothing is checked until the first `play`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            volume: 1.0,
            looping: false,
            output: None,
            sink: None,
        }
    }

    fn decode(&self) -> Result<Decoder<BufReader<File>>, MindfulError> {
        let file = File::open(&self.path)
            .map_err(|e| MindfulError::Playback(format!("{}: {e}", self.path.display())))?;
        Decoder::new(BufReader::new(file))
            .map_err(|e| MindfulError::Playback(format!("{}: {e}", self.path.display())))
    }

    fn handle(&mut self) -> Result<&OutputStreamHandle, MindfulError> {
        if self.output.is_none() {
            let output = OutputStream::try_default()
                .map_err(|e| MindfulError::Playback(format!("no audio output: {e}")))?;
            self.output = Some(output);
        }
        self.output
            .as_ref()
            .map(|(_, handle)| handle)
            .ok_or_else(|| MindfulError::Playback("no audio output".to_string()))
    }

    /// A fresh sink holding the whole file, paused at the start.
    fn load(&mut self) -> Result<Sink, MindfulError> {
        let source = self.decode()?;
        let sink = Sink::try_new(self.handle()?)
            .map_err(|e| MindfulError::Playback(format!("no audio output: {e}")))?;
        sink.pause();
        sink.set_volume(self.volume);
        if self.looping {
            sink.append(source.repeat_infinite());
        } else {
            sink.append(source);
        }
        tracing::debug!(path = %self.path.display(), looping = self.looping, "track loaded");
        Ok(sink)
    }
}

impl AudioTrack for SinkTrack {
    fn play(&mut self) -> Result<(), MindfulError> {
        let sink = match self.sink.take() {
            Some(sink) if !sink.empty() => sink,
            _ => self.load()?,
        };
        sink.play();
        self.sink = Some(sink);
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            sink.pause();
        }
    }

    fn rewind(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(self.volume);
        }
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn is_playing(&self) -> bool {
        self.sink
            .as_ref()
            .is_some_and(|sink| !sink.is_paused() && !sink.empty())
    }

    fn poll(&mut self) -> Result<(), MindfulError> {
        let ran_dry = self
            .sink
            .as_ref()
            .is_some_and(|sink| !sink.is_paused() && sink.empty());
        if !ran_dry || !self.looping {
            return Ok(());
        }

        // A decode error mid-file ends even an infinite repeat
        self.sink = None;
        let sink = self.load().inspect_err(|e| {
            tracing::error!(error = %e, "ambient loop could not restart");
        })?;
        sink.play();
        self.sink = Some(sink);
        Ok(())
    }
}

impl Drop for SinkTrack {
    fn drop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }
}
