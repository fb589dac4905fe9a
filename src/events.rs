use crate::audio::Sound;
use crate::npc::NpcKind;

/// Things that happened during one simulation step.
///
/// The session returns these from `update`; the engine turns them into audio
/// and logs. The simulation never calls the audio sink itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    PlayerFired,
    PlayerDamaged { amount: i32 },
    PlayerDied,
    /// An NPC attacked. `damage` is zero when the accuracy roll missed.
    NpcFired { npc: u32, kind: NpcKind, damage: i32 },
    NpcPained { npc: u32 },
    NpcKilled { npc: u32, kind: NpcKind },
    Victory,
}

impl GameEvent {
    pub fn sound(self) -> Option<Sound> {
        match self {
            GameEvent::PlayerFired => Some(Sound::Shotgun),
            GameEvent::PlayerDamaged { .. } => Some(Sound::PlayerPain),
            GameEvent::NpcFired { .. } => Some(Sound::NpcAttack),
            GameEvent::NpcPained { .. } => Some(Sound::NpcPain),
            GameEvent::NpcKilled { .. } => Some(Sound::NpcDeath),
            GameEvent::PlayerDied | GameEvent::Victory => None,
        }
    }
}
