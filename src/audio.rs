//! Best-effort sound cues. Everything here is allowed to fail silently: a
//! machine without an audio device just plays a quiet game.

use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle, Sink};
use std::time::Duration;

const VOLUME: f32 = 0.2;

/// Fire-and-forget tone player with a mutable on/off switch.
pub struct AudioCues {
    // Dropping the stream kills playback, so it rides along with the handle.
    output: Option<(OutputStream, OutputStreamHandle)>,
    enabled: bool,
}

impl AudioCues {
    pub fn new(enabled: bool) -> Self {
        let output = OutputStream::try_default().ok();
        Self { output, enabled }
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Short blip when the snake eats.
    pub fn on_food(&self) {
        self.play(&[(880.0, 90)]);
    }

    /// Descending pair when a session ends in a crash.
    pub fn on_game_over(&self) {
        self.play(&[(392.0, 160), (262.0, 260)]);
    }

    /// Ascending fanfare for the rare full-board win.
    pub fn on_win(&self) {
        self.play(&[(523.0, 140), (659.0, 140), (784.0, 260)]);
    }

    fn play(&self, notes: &[(f32, u64)]) {
        if !self.enabled {
            return;
        }
        let Some((_, handle)) = &self.output else {
            return;
        };
        let Ok(sink) = Sink::try_new(handle) else {
            return;
        };
        for &(freq, ms) in notes {
            let tone = SineWave::new(freq)
                .take_duration(Duration::from_millis(ms))
                .amplify(VOLUME);
            sink.append(tone);
        }
        sink.detach();
    }
}
