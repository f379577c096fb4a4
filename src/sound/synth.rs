use std::f32::consts::TAU;

use super::Cue;

pub const SAMPLE_RATE: u32 = 44_100;

/// C4 E4 G4 A4 G4 E4
pub const MELODY: [f32; 6] = [261.63, 329.63, 392.0, 440.0, 392.0, 329.63];
pub const MELODY_STEP_SECS: f32 = 0.6;
/// Background loop sits well under the effects
pub const MUSIC_VOLUME: f32 = 0.03;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Triangle,
    Saw,
}

impl Wave {
    /// `phase` is in `[0, 1)`
    fn sample(self, phase: f32) -> f32 {
        match self {
            Wave::Sine => (TAU * phase).sin(),
            Wave::Triangle => 4.0 * (phase - 0.5).abs() - 1.0,
            Wave::Saw => 2.0 * phase - 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    Linear,
    Exponential,
}

/// Moves from `from` to `to` over `secs`, then holds `to`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    pub from: f32,
    pub to: f32,
    pub secs: f32,
    pub curve: Curve,
}

impl Ramp {
    pub const fn hold(value: f32) -> Self {
        Self {
            from: value,
            to: value,
            secs: 0.0,
            curve: Curve::Linear,
        }
    }

    pub fn at(&self, t: f32) -> f32 {
        if self.secs <= 0.0 || t >= self.secs {
            return self.to;
        }
        let k = (t / self.secs).max(0.0);
        match self.curve {
            Curve::Linear => self.from + (self.to - self.from) * k,
            Curve::Exponential => self.from * (self.to / self.from).powf(k),
        }
    }
}

/// Linear attack up to `peak`, then `decay` from the peak
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub attack: f32,
    pub decay: Ramp,
}

impl Envelope {
    /// Starts at `from` and decays straight away
    pub fn falling(from: f32, to: f32, secs: f32, curve: Curve) -> Self {
        Self {
            attack: 0.0,
            decay: Ramp {
                from,
                to,
                secs,
                curve,
            },
        }
    }

    /// Swells from silence to `peak` in `attack`, then decays to `floor` by `end`
    pub fn swell(peak: f32, attack: f32, floor: f32, end: f32) -> Self {
        Self {
            attack,
            decay: Ramp {
                from: peak,
                to: floor,
                secs: end - attack,
                curve: Curve::Exponential,
            },
        }
    }

    pub fn at(&self, t: f32) -> f32 {
        if t < self.attack {
            self.decay.from * t / self.attack
        } else {
            self.decay.at(t - self.attack)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub wave: Wave,
    pub pitch: Ramp,
    pub gain: Envelope,
    pub secs: f32,
}

impl Tone {
    pub fn render(&self) -> Vec<f32> {
        let rate = SAMPLE_RATE as f32;
        let count = (rate * self.secs) as usize;
        let mut phase = 0.0f32;
        (0..count)
            .map(|i| {
                let t = i as f32 / rate;
                let s = self.wave.sample(phase) * self.gain.at(t);
                phase = (phase + self.pitch.at(t) / rate).fract();
                s
            })
            .collect()
    }
}

fn countdown_beep(hz: f32) -> Tone {
    Tone {
        wave: Wave::Sine,
        pitch: Ramp::hold(hz),
        gain: Envelope::swell(0.05, 0.02, 0.001, 0.15),
        secs: 0.15,
    }
}

fn success(from_hz: f32) -> Tone {
    Tone {
        wave: Wave::Triangle,
        pitch: Ramp {
            from: from_hz,
            to: from_hz * 2.0,
            secs: 0.2,
            curve: Curve::Exponential,
        },
        gain: Envelope::falling(0.1, 0.01, 0.3, Curve::Exponential),
        secs: 0.3,
    }
}

fn fail(secs: f32) -> Tone {
    Tone {
        wave: Wave::Saw,
        pitch: Ramp {
            from: 220.0,
            to: 110.0,
            secs,
            curve: Curve::Linear,
        },
        gain: Envelope::falling(0.1, 0.01, secs, Curve::Linear),
        secs,
    }
}

fn blip(from_hz: f32, to_hz: f32) -> Tone {
    Tone {
        wave: Wave::Sine,
        pitch: Ramp {
            from: from_hz,
            to: to_hz,
            secs: 0.1,
            curve: Curve::Exponential,
        },
        gain: Envelope::falling(0.05, 0.01, 0.1, Curve::Exponential),
        secs: 0.1,
    }
}

impl Cue {
    pub fn tone(self) -> Tone {
        match self {
            Cue::Click => blip(600.0, 600.0),
            Cue::Clear => blip(400.0, 200.0),
            Cue::Submit => blip(800.0, 1200.0),
            Cue::Success => success(440.0),
            Cue::Fail => fail(0.4),
            Cue::CountdownBeep { last: true } => countdown_beep(1200.0),
            Cue::CountdownBeep { last: false } => countdown_beep(800.0),
            // an octave above the normal success sweep
            Cue::Milestone => success(880.0),
            Cue::GameOver => fail(0.8),
        }
    }
}

/// One pass of the background melody, ready to loop
pub fn melody() -> Vec<f32> {
    MELODY
        .iter()
        .flat_map(|&hz| {
            let note = Tone {
                wave: Wave::Sine,
                pitch: Ramp::hold(hz),
                gain: Envelope::swell(0.2, 0.1, 0.001, 0.5),
                secs: MELODY_STEP_SECS,
            };
            note.render().into_iter().map(|s| s * MUSIC_VOLUME)
        })
        .collect()
}
