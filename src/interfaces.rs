//! Seams to the host: sampled input in, fire-and-forget sound cues out.

/// Keys held during one tick.  Sampled once per tick; presses are not queued.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub fire: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    Laser,
    AsteroidExplosion,
    PlayerExplosion,
}

/// Plays sound effects.  The simulation never reads anything back.
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Discards every cue.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Remembers every cue in order.  Handy for tests and replays.
#[derive(Clone, Debug, Default)]
pub struct RecordingAudio {
    pub cues: Vec<SoundCue>,
}

impl RecordingAudio {
    pub fn count(&self, cue: SoundCue) -> usize {
        self.cues.iter().filter(|&&c| c == cue).count()
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }
}
