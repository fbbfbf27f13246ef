//! Procedural tone feedback.
//!
//! Short sine sequences are synthesized into stereo frame buffers and played
//! through an `oddio` mixer feeding a `cpal` output stream. The stream lives
//! on a dedicated thread because `cpal::Stream` cannot cross await points;
//! the rest of the client only holds a cheap sender.
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use thiserror::Error;

/// Seconds between note onsets within a sequence.
const NOTE_SPACING: f32 = 0.1;
/// Seconds each note sounds.
const NOTE_LENGTH: f32 = 0.1;
/// Linear attack ramp, seconds.
const ATTACK: f32 = 0.01;
/// Gain floor the exponential decay runs down to.
const DECAY_FLOOR: f32 = 0.001;

/// Feedback cue, one tone sequence each.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundKind {
    Start,
    Correct,
    Incorrect,
    Victory,
    GameOver,
    TimeUp,
}

impl SoundKind {
    /// Note frequencies, in Hz.
    fn tones(self) -> &'static [f32] {
        match self {
            // A-C#-E
            SoundKind::Start => &[440.0, 554.37, 659.25],
            // C-E-G major chord
            SoundKind::Correct => &[523.25, 659.25, 783.99],
            // Lower, dissonant
            SoundKind::Incorrect => &[220.0, 185.0, 165.0],
            // C major with octave
            SoundKind::Victory => &[523.25, 659.25, 783.99, 1046.5],
            // Descending minor
            SoundKind::GameOver => &[220.0, 196.0, 174.61],
            // High-low warning
            SoundKind::TimeUp => &[880.0, 440.0],
        }
    }

    fn gain(self) -> f32 {
        match self {
            SoundKind::Victory => 0.3,
            _ => 0.15,
        }
    }
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device available")]
    NoOutputDevice,

    #[error("failed to spawn audio thread")]
    Thread(#[from] std::io::Error),
}

/// Cheap, cloneable sender towards the audio thread.
#[derive(Clone)]
pub struct AudioHandle {
    tx: Sender<SoundKind>,
}

impl AudioHandle {
    pub fn play(&self, kind: SoundKind) {
        if self.tx.send(kind).is_err() {
            tracing::trace!("audio thread gone, dropping {kind:?}");
        }
    }
}

/// Starts the audio thread. Fails fast if the host has no output device;
/// later stream errors are logged and tones silently stop.
pub fn spawn() -> Result<AudioHandle, AudioError> {
    if cpal::default_host().default_output_device().is_none() {
        return Err(AudioError::NoOutputDevice);
    }

    let (tx, rx) = channel();
    std::thread::Builder::new()
        .name("drill-audio".into())
        .spawn(move || run_output(rx))?;

    Ok(AudioHandle { tx })
}

fn run_output(rx: Receiver<SoundKind>) {
    let host = cpal::default_host();
    let Some(device) = host.default_output_device() else {
        tracing::warn!("audio device disappeared before the stream started");
        return;
    };
    let sample_rate = match device.default_output_config() {
        Ok(config) => config.sample_rate(),
        Err(err) => {
            tracing::warn!("no usable audio output config: {err}");
            return;
        }
    };
    let config = cpal::StreamConfig {
        channels: 2,
        sample_rate,
        buffer_size: cpal::BufferSize::Default,
    };

    let (mut mixer_handle, mixer) = oddio::split(oddio::Mixer::new());

    let stream = match device.build_output_stream(
        &config,
        move |out_flat: &mut [f32], _: &cpal::OutputCallbackInfo| {
            let out_stereo = oddio::frame_stereo(out_flat);
            oddio::run(&mixer, sample_rate.0, out_stereo);
        },
        |err| tracing::warn!("audio stream error: {err}"),
        None,
    ) {
        Ok(stream) => stream,
        Err(err) => {
            tracing::warn!("failed to build audio stream: {err}");
            return;
        }
    };
    if let Err(err) = stream.play() {
        tracing::warn!("failed to start audio stream: {err}");
        return;
    }

    while let Ok(kind) = rx.recv() {
        let frames = render_sequence(kind.tones(), kind.gain(), sample_rate.0);
        let _ = mixer_handle
            .control()
            .play(oddio::FramesSignal::from(frames));
    }
    // Sender dropped: client is shutting down, stream drops with us.
}

/// Renders a tone sequence into one stereo buffer: notes offset by
/// [`NOTE_SPACING`], each a sine with a linear attack and exponential decay.
fn render_sequence(freqs: &[f32], gain: f32, sample_rate: u32) -> Arc<oddio::Frames<[f32; 2]>> {
    let rate = sample_rate as f32;
    let total_seconds = NOTE_SPACING * freqs.len().saturating_sub(1) as f32 + NOTE_LENGTH;
    let mut samples = vec![[0.0f32; 2]; (total_seconds * rate).ceil() as usize];

    let note_len = (NOTE_LENGTH * rate) as usize;
    for (index, freq) in freqs.iter().enumerate() {
        let offset = (NOTE_SPACING * index as f32 * rate) as usize;
        for n in 0..note_len {
            let Some(frame) = samples.get_mut(offset + n) else {
                break;
            };
            let t = n as f32 / rate;
            let envelope = if t < ATTACK {
                gain * t / ATTACK
            } else {
                gain * (DECAY_FLOOR / gain).powf((t - ATTACK) / (NOTE_LENGTH - ATTACK))
            };
            let value = envelope * (std::f32::consts::TAU * freq * t).sin();
            frame[0] += value;
            frame[1] += value;
        }
    }

    oddio::Frames::from_slice(sample_rate, &samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_length_matches_note_count() {
        let frames = render_sequence(SoundKind::Correct.tones(), 0.15, 44_100);
        // Three notes: two spacings plus one note length.
        let expected = ((0.1_f32 * 2.0 + 0.1) * 44_100.0).ceil() as usize;
        assert_eq!(frames.len(), expected);
    }

    #[test]
    fn samples_stay_within_gain() {
        for kind in [
            SoundKind::Start,
            SoundKind::Correct,
            SoundKind::Incorrect,
            SoundKind::Victory,
            SoundKind::GameOver,
            SoundKind::TimeUp,
        ] {
            let gain = kind.gain();
            let frames = render_sequence(kind.tones(), gain, 48_000);
            // Notes never overlap (spacing == length), so the peak is one
            // note's envelope.
            for frame in frames.iter() {
                assert!(frame[0].abs() <= gain + f32::EPSILON);
                assert!(frame[1].abs() <= gain + f32::EPSILON);
            }
        }
    }
}
