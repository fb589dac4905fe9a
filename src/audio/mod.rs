use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use kira::{
    manager::{AudioManager, AudioManagerSettings, backend::DefaultBackend},
    sound::static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings},
    tween::Tween,
    Volume,
};

/// Every sound the game plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    Shotgun,
    PlayerPain,
    NpcAttack,
    NpcPain,
    NpcDeath,
    Theme,
}

impl Sound {
    pub const ALL: [Sound; 6] = [
        Sound::Shotgun,
        Sound::PlayerPain,
        Sound::NpcAttack,
        Sound::NpcPain,
        Sound::NpcDeath,
        Sound::Theme,
    ];

    /// File stem under the sound directory.
    pub fn file_stem(self) -> &'static str {
        match self {
            Sound::Shotgun => "shotgun",
            Sound::PlayerPain => "player_pain",
            Sound::NpcAttack => "npc_attack",
            Sound::NpcPain => "npc_pain",
            Sound::NpcDeath => "npc_death",
            Sound::Theme => "theme",
        }
    }

    fn volume(self) -> f64 {
        match self {
            Sound::Theme => 0.3,
            Sound::NpcAttack => 0.2,
            _ => 1.0,
        }
    }
}

const EXTENSIONS: [&str; 2] = ["wav", "ogg"];

/// Fire-and-forget audio sink. Every failure only disables the affected sound.
pub struct AudioContext {
    /// `None` when audio hardware is unavailable (headless / CI / no audio device).
    manager: Option<AudioManager>,
    sounds: HashMap<Sound, StaticSoundData>,
    active_music: Option<StaticSoundHandle>,
}

impl AudioContext {
    pub fn new() -> Self {
        let manager = match AudioManager::<DefaultBackend>::new(AudioManagerSettings::default()) {
            Ok(m) => Some(m),
            Err(e) => {
                tracing::warn!("failed to initialize audio manager: {e}; audio disabled");
                None
            }
        };
        Self { manager, sounds: HashMap::new(), active_music: None }
    }

    /// A context that never plays anything.
    pub fn disabled() -> Self {
        Self { manager: None, sounds: HashMap::new(), active_music: None }
    }

    /// Returns true if audio hardware is available.
    pub fn is_available(&self) -> bool { self.manager.is_some() }

    /// Load every [`Sound`] from `dir`, trying each supported extension.
    pub fn load_dir<P: AsRef<Path>>(&mut self, dir: P) {
        let dir = dir.as_ref();
        for sound in Sound::ALL {
            let found = EXTENSIONS
                .iter()
                .map(|ext| dir.join(format!("{}.{ext}", sound.file_stem())))
                .find(|p| p.is_file());
            match found {
                Some(path) => self.load_sound(sound, path),
                None => tracing::warn!(sound = sound.file_stem(), dir = %dir.display(), "sound file not found"),
            }
        }
    }

    /// Load a sound file into memory. Logs a warning and returns if the file
    /// cannot be read.
    pub fn load_sound<P: AsRef<Path>>(&mut self, sound: Sound, path: P) {
        let path = path.as_ref();
        match StaticSoundData::from_file(path) {
            Ok(data) => {
                self.sounds.insert(sound, data);
            }
            Err(e) => tracing::warn!("failed to load '{}' from '{}': {e}", sound.file_stem(), path.display()),
        }
    }

    pub fn play(&mut self, sound: Sound) {
        let Some(manager) = self.manager.as_mut() else { return };
        let Some(data) = self.sounds.get(&sound) else { return };
        let mut settings = StaticSoundSettings::new();
        settings.volume = Volume::Amplitude(sound.volume()).into();
        if let Err(e) = manager.play(data.clone().with_settings(settings)) {
            tracing::debug!("failed to play '{}': {e}", sound.file_stem());
        }
    }

    /// Start the theme looping indefinitely, fading out any previous track.
    pub fn play_music(&mut self, sound: Sound, fade_in_secs: f32) {
        let Some(manager) = self.manager.as_mut() else { return };
        let Some(data) = self.sounds.get(&sound) else { return };

        if let Some(mut handle) = self.active_music.take() {
            let _ = handle.stop(Tween { duration: Duration::from_secs_f32(0.5), ..Default::default() });
        }

        let mut settings = StaticSoundSettings::new().loop_region(0.0..);
        settings.volume = Volume::Amplitude(0.0).into();

        match manager.play(data.clone().with_settings(settings)) {
            Ok(mut handle) => {
                let _ = handle.set_volume(
                    Volume::Amplitude(sound.volume()),
                    Tween { duration: Duration::from_secs_f32(fade_in_secs), ..Default::default() },
                );
                self.active_music = Some(handle);
            }
            Err(e) => tracing::warn!("failed to play music '{}': {e}", sound.file_stem()),
        }
    }
}

impl Default for AudioContext {
    fn default() -> Self { Self::new() }
}
