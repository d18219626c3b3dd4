//! Audio and visual feedback
//!
//! Turns simulation events into sound, music, particle and shake requests.
//! Sounds are procedural: each effect is a short list of tones the host
//! synthesizes however it likes.

use glam::Vec2;

use crate::settings::Settings;
use crate::sim::{GameEvent, MusicCue};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Jump,
    /// Coin or heart picked up
    Coin,
    Key,
    Hurt,
    /// Enemy stomped, or the boss winding up a leap
    EnemyHit,
    LevelComplete,
    Death,
    MenuSelect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Square,
    Sawtooth,
    Triangle,
}

/// One oscillator note with an exponential fade-out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    pub duration: f32,
    pub wave: Waveform,
    /// Peak gain before the master/sfx volume is applied
    pub gain: f32,
    /// Linear pitch ramp target, if any
    pub ramp_to: Option<f32>,
    /// Start offset from the trigger, in seconds
    pub delay: f32,
}

const fn tone(freq: f32, duration: f32, wave: Waveform, gain: f32, ramp_to: Option<f32>, delay: f32) -> Tone {
    Tone {
        freq,
        duration,
        wave,
        gain,
        ramp_to,
        delay,
    }
}

use Waveform::{Sawtooth, Square, Triangle};

const JUMP: [Tone; 1] = [tone(250.0, 0.15, Square, 0.1, Some(500.0), 0.0)];
const COIN: [Tone; 2] = [
    tone(800.0, 0.1, Square, 0.1, None, 0.0),
    tone(1200.0, 0.15, Square, 0.1, None, 0.06),
];
const KEY: [Tone; 3] = [
    tone(600.0, 0.1, Square, 0.1, None, 0.0),
    tone(900.0, 0.1, Square, 0.1, None, 0.08),
    tone(1200.0, 0.15, Square, 0.1, None, 0.16),
];
const HURT: [Tone; 1] = [tone(150.0, 0.2, Sawtooth, 0.15, Some(50.0), 0.0)];
const ENEMY_HIT: [Tone; 1] = [tone(100.0, 0.15, Square, 0.12, Some(50.0), 0.0)];
const LEVEL_COMPLETE: [Tone; 4] = [
    tone(523.0, 0.2, Square, 0.12, None, 0.0),
    tone(659.0, 0.2, Square, 0.12, None, 0.12),
    tone(784.0, 0.2, Square, 0.12, None, 0.24),
    tone(1047.0, 0.2, Square, 0.12, None, 0.36),
];
const DEATH: [Tone; 2] = [
    tone(400.0, 0.1, Sawtooth, 0.15, Some(200.0), 0.0),
    tone(200.0, 0.3, Sawtooth, 0.12, Some(50.0), 0.1),
];
const MENU_SELECT: [Tone; 1] = [tone(600.0, 0.08, Square, 0.08, None, 0.0)];

/// Bass line for the background loop, one note every `MUSIC_NOTE_SECS`
pub const MUSIC_BASS: [f32; 4] = [130.0, 165.0, 110.0, 146.0];
pub const MUSIC_NOTE_SECS: f32 = 0.4;

/// The two voices played for bass note `index` (root triangle, octave square)
pub fn music_note(index: usize) -> [Tone; 2] {
    let freq = MUSIC_BASS[index % MUSIC_BASS.len()];
    [
        tone(freq, 0.3, Triangle, 0.06, None, 0.0),
        tone(freq * 2.0, 0.15, Square, 0.03, None, 0.0),
    ]
}

impl SoundEffect {
    pub fn tones(self) -> &'static [Tone] {
        match self {
            SoundEffect::Jump => &JUMP,
            SoundEffect::Coin => &COIN,
            SoundEffect::Key => &KEY,
            SoundEffect::Hurt => &HURT,
            SoundEffect::EnemyHit => &ENEMY_HIT,
            SoundEffect::LevelComplete => &LEVEL_COMPLETE,
            SoundEffect::Death => &DEATH,
            SoundEffect::MenuSelect => &MENU_SELECT,
        }
    }
}

/// Cosmetic particle bursts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleBurst {
    /// Kicked up at the feet on jump
    Dust,
    /// Gold sparkle from coins and keys
    Sparkle,
    /// Sparks from a hit or a heart
    Hit,
    /// Large burst for deaths
    Death,
}

impl ParticleBurst {
    pub fn count(self) -> usize {
        match self {
            ParticleBurst::Dust => 4,
            ParticleBurst::Sparkle => 8,
            ParticleBurst::Hit => 6,
            ParticleBurst::Death => 15,
        }
    }

    /// Lifetime range in ticks
    pub fn lifetime(self) -> (u32, u32) {
        match self {
            ParticleBurst::Dust => (10, 20),
            ParticleBurst::Sparkle => (15, 25),
            ParticleBurst::Hit => (8, 15),
            ParticleBurst::Death => (20, 40),
        }
    }
}

/// Host side of feedback: audio device, particle system, camera shake
pub trait Feedback {
    fn play(&mut self, effect: SoundEffect, volume: f32);
    fn music(&mut self, cue: MusicCue, volume: f32);
    fn particles(&mut self, burst: ParticleBurst, pos: Vec2);
    fn shake(&mut self, magnitude: f32, duration: u32);
    /// A level was (re)built; drop particles and recenter the camera
    fn level_loaded(&mut self, _level: usize) {}
}

fn reaction(event: &GameEvent) -> (Option<SoundEffect>, Option<(ParticleBurst, Vec2)>) {
    match *event {
        GameEvent::Jump { pos } => (Some(SoundEffect::Jump), Some((ParticleBurst::Dust, pos))),
        GameEvent::CoinCollected { pos } => (Some(SoundEffect::Coin), Some((ParticleBurst::Sparkle, pos))),
        GameEvent::HeartCollected { pos } => (Some(SoundEffect::Coin), Some((ParticleBurst::Hit, pos))),
        GameEvent::KeyCollected { pos } => (Some(SoundEffect::Key), Some((ParticleBurst::Sparkle, pos))),
        GameEvent::PlayerHurt { pos } => (Some(SoundEffect::Hurt), Some((ParticleBurst::Hit, pos))),
        GameEvent::PlayerDied { pos } => (Some(SoundEffect::Death), Some((ParticleBurst::Death, pos))),
        GameEvent::EnemyHit { pos } => (Some(SoundEffect::EnemyHit), Some((ParticleBurst::Hit, pos))),
        GameEvent::EnemyDefeated { pos } => (None, Some((ParticleBurst::Death, pos))),
        GameEvent::BossLeap { .. } => (Some(SoundEffect::EnemyHit), None),
        GameEvent::LevelComplete { .. } => (Some(SoundEffect::LevelComplete), None),
        GameEvent::MenuSelect => (Some(SoundEffect::MenuSelect), None),
        GameEvent::ScreenShake { .. } | GameEvent::Music(_) | GameEvent::LevelLoaded { .. } => (None, None),
    }
}

/// Forward drained events to the host, honoring the player's settings
pub fn dispatch(events: &[GameEvent], sink: &mut dyn Feedback, settings: &Settings) {
    let sfx_volume = settings.effective_sfx_volume();
    for event in events {
        match *event {
            GameEvent::ScreenShake { magnitude, duration } => {
                if settings.effective_screen_shake() {
                    sink.shake(magnitude, duration);
                }
            }
            GameEvent::Music(cue) => {
                // Stop always goes through so a mute mid-song silences it
                if cue == MusicCue::Stop || settings.effective_music() {
                    sink.music(cue, settings.master_volume * settings.music_volume);
                }
            }
            GameEvent::LevelLoaded { level } => sink.level_loaded(level),
            _ => {
                let (sound, burst) = reaction(event);
                if let Some(effect) = sound
                    && sfx_volume > 0.0
                {
                    sink.play(effect, sfx_volume);
                }
                if let Some((burst, pos)) = burst
                    && settings.particles
                {
                    sink.particles(burst, pos);
                }
            }
        }
    }
}

/// Feedback sink for headless runs: logs everything, tracks music state
#[derive(Debug, Default)]
pub struct LogFeedback {
    pub music_playing: bool,
    pub sounds_played: usize,
}

impl Feedback for LogFeedback {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        self.sounds_played += 1;
        log::debug!("sfx {:?} at {:.2} ({} tones)", effect, volume, effect.tones().len());
    }

    fn music(&mut self, cue: MusicCue, volume: f32) {
        let playing = cue == MusicCue::Start;
        if playing != self.music_playing {
            log::debug!("music {:?} at {:.2}", cue, volume);
        }
        self.music_playing = playing;
    }

    fn particles(&mut self, burst: ParticleBurst, pos: Vec2) {
        log::debug!("{} {:?} particles at {}", burst.count(), burst, pos);
    }

    fn shake(&mut self, magnitude: f32, duration: u32) {
        log::debug!("shake {magnitude} for {duration} ticks");
    }

    fn level_loaded(&mut self, level: usize) {
        log::debug!("level {} loaded, resetting effects", level + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Call {
        Play(SoundEffect),
        Music(MusicCue),
        Particles(ParticleBurst),
        Shake(u32),
        Loaded(usize),
    }

    #[derive(Default)]
    struct Recorder(Vec<Call>);

    impl Feedback for Recorder {
        fn play(&mut self, effect: SoundEffect, _volume: f32) {
            self.0.push(Call::Play(effect));
        }
        fn music(&mut self, cue: MusicCue, _volume: f32) {
            self.0.push(Call::Music(cue));
        }
        fn particles(&mut self, burst: ParticleBurst, _pos: Vec2) {
            self.0.push(Call::Particles(burst));
        }
        fn shake(&mut self, _magnitude: f32, duration: u32) {
            self.0.push(Call::Shake(duration));
        }
        fn level_loaded(&mut self, level: usize) {
            self.0.push(Call::Loaded(level));
        }
    }

    fn sample() -> Vec<GameEvent> {
        vec![
            GameEvent::Jump { pos: Vec2::ZERO },
            GameEvent::PlayerHurt { pos: Vec2::ZERO },
            GameEvent::ScreenShake {
                magnitude: 3.0,
                duration: 10,
            },
            GameEvent::Music(MusicCue::Start),
            GameEvent::LevelLoaded { level: 2 },
        ]
    }

    #[test]
    fn test_default_settings_forward_everything() {
        let mut rec = Recorder::default();
        dispatch(&sample(), &mut rec, &Settings::default());
        assert_eq!(
            rec.0,
            vec![
                Call::Play(SoundEffect::Jump),
                Call::Particles(ParticleBurst::Dust),
                Call::Play(SoundEffect::Hurt),
                Call::Particles(ParticleBurst::Hit),
                Call::Shake(10),
                Call::Music(MusicCue::Start),
                Call::Loaded(2),
            ]
        );
    }

    #[test]
    fn test_muted_and_reduced_motion() {
        let settings = Settings {
            muted: true,
            reduced_motion: true,
            ..Default::default()
        };
        let mut rec = Recorder::default();
        let mut events = sample();
        events.push(GameEvent::Music(MusicCue::Stop));
        dispatch(&events, &mut rec, &settings);
        assert_eq!(
            rec.0,
            vec![
                Call::Particles(ParticleBurst::Dust),
                Call::Particles(ParticleBurst::Hit),
                Call::Loaded(2),
                Call::Music(MusicCue::Stop),
            ]
        );
    }

    #[test]
    fn test_particles_can_be_disabled() {
        let settings = Settings {
            particles: false,
            ..Default::default()
        };
        let mut rec = Recorder::default();
        dispatch(&[GameEvent::EnemyDefeated { pos: Vec2::ZERO }], &mut rec, &settings);
        assert!(rec.0.is_empty());
    }

    #[test]
    fn test_every_effect_has_tones() {
        use SoundEffect::*;
        for effect in [Jump, Coin, Key, Hurt, EnemyHit, LevelComplete, Death, MenuSelect] {
            let tones = effect.tones();
            assert!(!tones.is_empty());
            assert_eq!(tones[0].delay, 0.0);
            assert!(tones.windows(2).all(|w| w[0].delay <= w[1].delay));
        }
        assert_eq!(music_note(5)[0].freq, 165.0);
        assert_eq!(music_note(5)[1].freq, 330.0);
    }

    #[test]
    fn test_log_feedback_tracks_music() {
        let mut sink = LogFeedback::default();
        let events = [GameEvent::Music(MusicCue::Start), GameEvent::MenuSelect];
        dispatch(&events, &mut sink, &Settings::default());
        assert!(sink.music_playing);
        assert_eq!(sink.sounds_played, 1);
        dispatch(&[GameEvent::Music(MusicCue::Stop)], &mut sink, &Settings::default());
        assert!(!sink.music_playing);
    }
}
