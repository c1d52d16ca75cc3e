use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

const SAMPLE_RATE: i32 = 44_100;
const TONE_HZ: f32 = 440.0;
const VOLUME: f32 = 0.1;

/// Something that can play the Chip-8's single tone.
pub trait Sound {
    /// Starts or stops the tone; called once per frame.
    fn set_active(&mut self, active: bool);
}

struct SquareWave {
    phase_inc: f32,
    phase: f32,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = if self.phase < 0.5 { VOLUME } else { -VOLUME };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// A square wave played through SDL2, paused whenever the sound timer is 0.
pub struct Beeper {
    device: AudioDevice<SquareWave>,
    is_beeping: bool,
}

impl Beeper {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, String> {
        let audio = sdl.audio()?;
        let desired = AudioSpecDesired {
            freq: Some(SAMPLE_RATE),
            channels: Some(1),
            samples: None,
        };
        let device = audio.open_playback(None, &desired, |spec| SquareWave {
            phase_inc: TONE_HZ / spec.freq as f32,
            phase: 0.0,
        })?;
        Ok(Beeper {
            device,
            is_beeping: false,
        })
    }
}

impl Sound for Beeper {
    fn set_active(&mut self, active: bool) {
        if active == self.is_beeping {
            return;
        }
        if active {
            self.device.resume();
        } else {
            self.device.pause();
        }
        self.is_beeping = active;
    }
}

pub struct Mute;

impl Sound for Mute {
    fn set_active(&mut self, _active: bool) {}
}
