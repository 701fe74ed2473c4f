//! Sound port: game cues behind an audio capability trait.
//!
//! The terminal loop forwards session events here; sinks decide how (or
//! whether) to make noise. Real synthesis is out of scope for a terminal
//! build, so the shipped sink is a best-effort bell.

use std::io::{self, Write};

use crate::core::GameEvent;

/// Low-level audio output capability.
///
/// Frequencies are in hertz, durations in seconds, volume 0.0..=1.0.
pub trait AudioSink {
    fn play_tone(&mut self, freq_hz: f32, duration_s: f32, volume: f32);
    fn play_tone_sweep(&mut self, start_hz: f32, end_hz: f32, duration_s: f32, volume: f32);
    fn play_noise_burst(&mut self, duration_s: f32, volume: f32);
}

/// Maps game moments onto the cue table.
pub struct SoundCues<S: AudioSink> {
    sink: S,
}

impl<S: AudioSink> SoundCues<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Cue for any attempted swap, including ones that bounce back.
    pub fn play_swap(&mut self) {
        self.sink.play_tone(420.0, 0.08, 0.30);
    }

    /// Two-tone chirp for a cleared group.
    pub fn play_match(&mut self) {
        self.sink.play_tone(720.0, 0.08, 0.40);
        self.sink.play_tone(860.0, 0.08, 0.24);
    }

    /// Low thud when refilled pieces land.
    pub fn play_drop(&mut self) {
        self.sink.play_tone(300.0, 0.06, 0.22);
    }

    /// Rising sweep for a line special firing.
    pub fn play_line(&mut self) {
        self.sink.play_tone_sweep(520.0, 920.0, 0.18, 0.32);
        self.sink.play_noise_burst(0.10, 0.10);
    }

    /// Boom for a bomb special firing.
    pub fn play_bomb(&mut self) {
        self.sink.play_tone(220.0, 0.18, 0.45);
        self.sink.play_noise_burst(0.18, 0.22);
    }

    /// Fire the cues implied by one session event.
    ///
    /// The swap cue is not event-driven (rejected swaps emit no event but
    /// still chirp); the loop calls [`play_swap`](Self::play_swap) directly.
    pub fn on_event(&mut self, event: &GameEvent) {
        if let GameEvent::MatchCleared {
            lines_fired,
            bombs_fired,
            dropped,
            ..
        } = event
        {
            self.play_match();
            if *lines_fired > 0 {
                self.play_line();
            }
            if *bombs_fired > 0 {
                self.play_bomb();
            }
            if *dropped > 0 {
                self.play_drop();
            }
        }
    }
}

/// Best-effort terminal bell.
///
/// Louder cues (volume >= 0.3) ring BEL once; quiet layers stay silent so
/// a single match does not ring two or three times. Write failures are
/// ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct BellSink;

impl BellSink {
    fn ring(&self) {
        let mut out = io::stdout();
        let _ = out.write_all(b"\x07");
        let _ = out.flush();
    }
}

impl AudioSink for BellSink {
    fn play_tone(&mut self, _freq_hz: f32, _duration_s: f32, volume: f32) {
        if volume >= 0.3 {
            self.ring();
        }
    }

    fn play_tone_sweep(&mut self, _start_hz: f32, _end_hz: f32, _duration_s: f32, volume: f32) {
        if volume >= 0.3 {
            self.ring();
        }
    }

    fn play_noise_burst(&mut self, _duration_s: f32, _volume: f32) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Played {
        Tone { freq: u32, ms: u32, vol: u32 },
        Sweep { from: u32, to: u32, ms: u32, vol: u32 },
        Noise { ms: u32, vol: u32 },
    }

    #[derive(Debug, Default)]
    struct RecordingSink {
        played: Vec<Played>,
    }

    impl AudioSink for RecordingSink {
        fn play_tone(&mut self, freq_hz: f32, duration_s: f32, volume: f32) {
            self.played.push(Played::Tone {
                freq: freq_hz as u32,
                ms: (duration_s * 1000.0) as u32,
                vol: (volume * 100.0) as u32,
            });
        }

        fn play_tone_sweep(&mut self, start_hz: f32, end_hz: f32, duration_s: f32, volume: f32) {
            self.played.push(Played::Sweep {
                from: start_hz as u32,
                to: end_hz as u32,
                ms: (duration_s * 1000.0) as u32,
                vol: (volume * 100.0) as u32,
            });
        }

        fn play_noise_burst(&mut self, duration_s: f32, volume: f32) {
            self.played.push(Played::Noise {
                ms: (duration_s * 1000.0) as u32,
                vol: (volume * 100.0) as u32,
            });
        }
    }

    fn cues() -> SoundCues<RecordingSink> {
        SoundCues::new(RecordingSink::default())
    }

    #[test]
    fn swap_cue_parameters() {
        let mut cues = cues();
        cues.play_swap();
        assert_eq!(
            cues.sink.played,
            vec![Played::Tone {
                freq: 420,
                ms: 80,
                vol: 30
            }]
        );
    }

    #[test]
    fn match_cue_layers_two_tones() {
        let mut cues = cues();
        cues.play_match();
        assert_eq!(
            cues.sink.played,
            vec![
                Played::Tone {
                    freq: 720,
                    ms: 80,
                    vol: 40
                },
                Played::Tone {
                    freq: 860,
                    ms: 80,
                    vol: 24
                },
            ]
        );
    }

    #[test]
    fn line_cue_sweeps_and_hisses() {
        let mut cues = cues();
        cues.play_line();
        assert_eq!(
            cues.sink.played,
            vec![
                Played::Sweep {
                    from: 520,
                    to: 920,
                    ms: 180,
                    vol: 32
                },
                Played::Noise { ms: 100, vol: 10 },
            ]
        );
    }

    #[test]
    fn bomb_cue_booms() {
        let mut cues = cues();
        cues.play_bomb();
        assert_eq!(
            cues.sink.played,
            vec![
                Played::Tone {
                    freq: 220,
                    ms: 180,
                    vol: 45
                },
                Played::Noise { ms: 180, vol: 22 },
            ]
        );
    }

    #[test]
    fn match_event_fires_follow_up_cues_in_order() {
        let mut cues = cues();
        cues.on_event(&GameEvent::MatchCleared {
            cleared: 4,
            combo: 1,
            lines_fired: 1,
            bombs_fired: 0,
            dropped: 8,
        });

        let freqs: Vec<_> = cues
            .sink
            .played
            .iter()
            .map(|p| match p {
                Played::Tone { freq, .. } => *freq,
                Played::Sweep { from, .. } => *from,
                Played::Noise { .. } => 0,
            })
            .collect();
        // Match chirp, line sweep + hiss, then the landing thud.
        assert_eq!(freqs, vec![720, 860, 520, 0, 300]);
    }

    #[test]
    fn quiet_events_stay_silent() {
        let mut cues = cues();
        cues.on_event(&GameEvent::ScoreChanged(100));
        cues.on_event(&GameEvent::FeverStarted);
        assert!(cues.sink.played.is_empty());
    }
}
