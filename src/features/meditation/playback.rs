//! Ambient loop and completion chime.

use std::fmt;

use crate::error::MindfulError;
use crate::platform::audio::AudioTrack;

/// Output volume in 0.0 - 1.0, kept to hundredths.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Volume(f32);

impl Volume {
    /// Clamp and round to the nearest hundredth.
    #[must_use]
    pub fn new(level: f32) -> Self {
        if level.is_nan() {
            return Self(0.0);
        }
        Self(((level.clamp(0.0, 1.0)) * 100.0).round() / 100.0)
    }

    /// The level.
    #[must_use]
    pub const fn get(self) -> f32 {
        self.0
    }

    /// This volume moved by `delta`.
    #[must_use]
    pub fn nudged(self, delta: f32) -> Self {
        Self::new(self.0 + delta)
    }

    /// Whether playback would be inaudible.
    #[must_use]
    pub fn is_muted(self) -> bool {
        self.0 <= 0.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(0.5)
    }
}

impl fmt::Display for Volume {
    #[allow(clippy::cast_possible_truncation)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", (self.0 * 100.0).round() as i32)
    }
}

/// The two sound handles and what the screen knows about them.
pub struct Playback {
    ambient: Option<Box<dyn AudioTrack>>,
    chime: Option<Box<dyn AudioTrack>>,
    ambient_playing: bool,
    volume: Volume,
}

impl Playback {
    /// Load both tracks. The ambient track loops at `volume`.
    #[must_use]
    pub fn new(
        ambient: Option<Box<dyn AudioTrack>>,
        chime: Option<Box<dyn AudioTrack>>,
        volume: Volume,
    ) -> Self {
        let mut playback = Self {
            ambient,
            chime,
            ambient_playing: false,
            volume,
        };
        if let Some(track) = playback.ambient.as_mut() {
            track.set_looping(true);
            track.set_volume(volume.get());
        }
        playback
    }

    /// Whether the ambient loop is playing.
    #[must_use]
    pub const fn ambient_playing(&self) -> bool {
        self.ambient_playing
    }

    /// Ambient volume.
    #[must_use]
    pub const fn volume(&self) -> Volume {
        self.volume
    }

    /// Start or stop the ambient loop. Returns whether it is now playing.
    ///
    /// # Errors
    ///
    /// Returns the track's rejection; the loop is then left stopped.
    pub fn toggle_ambient(&mut self) -> Result<bool, MindfulError> {
        let track = self
            .ambient
            .as_mut()
            .ok_or_else(|| MindfulError::Playback("no ambient track loaded".to_string()))?;

        if self.ambient_playing {
            track.pause();
            self.ambient_playing = false;
        } else {
            track.set_volume(self.volume.get());
            track.play()?;
            self.ambient_playing = true;
        }
        Ok(self.ambient_playing)
    }

    /// Stop the ambient loop if it is playing. Returns whether it was.
    pub fn stop_ambient(&mut self) -> bool {
        if !self.ambient_playing {
            return false;
        }
        if let Some(track) = self.ambient.as_mut() {
            track.pause();
        }
        self.ambient_playing = false;
        true
    }

    /// Change the ambient volume, applied to the loop right away.
    ///
    /// # Errors
    ///
    /// Returns a playback error if the loop was found to have stopped; it is
    /// then marked off.
    pub fn set_volume(&mut self, volume: Volume) -> Result<(), MindfulError> {
        self.volume = volume;
        if let Some(track) = self.ambient.as_mut() {
            track.set_volume(volume.get());
        }
        self.check_ambient()
    }

    /// Start the chime from the top.
    ///
    /// # Errors
    ///
    /// Returns the track's rejection, or a playback error if none is loaded.
    pub fn play_chime(&mut self) -> Result<(), MindfulError> {
        let track = self
            .chime
            .as_mut()
            .ok_or_else(|| MindfulError::Playback("no chime loaded".to_string()))?;
        track.rewind();
        track.play()
    }

    /// Stop the chime and reset it to the start.
    pub fn silence_chime(&mut self) {
        if let Some(track) = self.chime.as_mut() {
            track.pause();
            track.rewind();
        }
    }

    /// Let the ambient loop restart if it ran out.
    ///
    /// # Errors
    ///
    /// Returns a playback error if the loop could not be kept going; it is
    /// then marked off.
    pub fn poll(&mut self) -> Result<(), MindfulError> {
        if !self.ambient_playing {
            return Ok(());
        }
        if let Some(track) = self.ambient.as_mut() {
            if let Err(e) = track.poll() {
                self.ambient_playing = false;
                return Err(e);
            }
        }
        self.check_ambient()
    }

    /// Mark the loop off if the track went quiet on its own.
    fn check_ambient(&mut self) -> Result<(), MindfulError> {
        let alive = self.ambient.as_ref().is_some_and(|track| track.is_playing());
        if !self.ambient_playing || alive {
            return Ok(());
        }
        self.ambient_playing = false;
        Err(MindfulError::Playback("ambient sound stopped".to_string()))
    }

    /// Stop both tracks and drop them.
    pub fn release(&mut self) {
        self.stop_ambient();
        self.silence_chime();
        self.ambient = None;
        self.chime = None;
    }
}
