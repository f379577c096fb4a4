pub mod synth;

use crate::game::GameEvent;
use log::{debug, warn};
use rodio::{buffer::SamplesBuffer, OutputStream, OutputStreamHandle, Sink, Source};
use std::io::Write;
use thiserror::Error;

use self::synth::SAMPLE_RATE;

/// Audio effects the presentation layer asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Click,
    Clear,
    Submit,
    Success,
    Fail,
    CountdownBeep { last: bool },
    Milestone,
    GameOver,
}

impl Cue {
    pub fn from_event(event: &GameEvent) -> Option<Cue> {
        match event {
            GameEvent::Correct { .. } => Some(Cue::Success),
            GameEvent::Incorrect { .. } => Some(Cue::Fail),
            GameEvent::CountdownBeep { remaining } => Some(Cue::CountdownBeep {
                last: *remaining == 1,
            }),
            GameEvent::Milestone { .. } => Some(Cue::Milestone),
            GameEvent::GameOver { .. } => Some(Cue::GameOver),
            GameEvent::RoundStarted { .. } | GameEvent::Bonus { .. } | GameEvent::Abandoned => {
                None
            }
        }
    }

    /// A terminal only has one sound, so save it for the cues that matter
    pub fn rings_bell(self) -> bool {
        matches!(
            self,
            Cue::Fail | Cue::CountdownBeep { last: true } | Cue::Milestone | Cue::GameOver
        )
    }
}

pub trait CueSink {
    fn play(&mut self, cue: Cue);

    /// Background melody on or off; sinks without music ignore it
    fn set_music(&mut self, _on: bool) {}
}

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("no audio output: {0}")]
    Stream(#[from] rodio::StreamError),
    #[error("cannot open audio sink: {0}")]
    Play(#[from] rodio::PlayError),
}

/// Synthesised tones through the default output device
pub struct RodioSink {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    music: Sink,
}

impl RodioSink {
    pub fn try_new() -> Result<Self, AudioError> {
        let (stream, handle) = OutputStream::try_default()?;
        let music = Sink::try_new(&handle)?;
        music.pause();
        let melody = SamplesBuffer::new(1, SAMPLE_RATE, synth::melody());
        music.append(melody.repeat_infinite());
        Ok(Self {
            _stream: stream,
            handle,
            music,
        })
    }

    fn play_samples(&self, samples: Vec<f32>) {
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
                sink.detach();
            }
            Err(e) => warn!("failed to play tone: {e}"),
        }
    }
}

impl CueSink for RodioSink {
    fn play(&mut self, cue: Cue) {
        self.play_samples(cue.tone().render());
    }

    fn set_music(&mut self, on: bool) {
        if on == !self.music.is_paused() {
            return;
        }
        debug!("background music {}", if on { "on" } else { "off" });
        if on {
            self.music.play();
        } else {
            self.music.pause();
        }
    }
}

/// Rings the terminal bell (BEL) on the writer; used when there is no audio device
pub struct BellSink<W: Write> {
    out: W,
}

impl<W: Write> BellSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl BellSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> CueSink for BellSink<W> {
    fn play(&mut self, cue: Cue) {
        if !cue.rings_bell() {
            return;
        }
        if let Err(e) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
            warn!("failed to ring bell for {cue:?}: {e}");
        }
    }
}
