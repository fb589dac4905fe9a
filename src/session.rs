// =============================================================================
// SESSION.RS: One play-through
//
// Per-step order:
//   1. player movement, look, regeneration
//   2. depth buffer from the new viewpoint
//   3. weapon reload and shot resolution
//   4. decoration animation
//   5. path table (when due)
//   6. NPC state machines
//   7. damage to the player, then game-over / win checks
// =============================================================================

use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::camera::Projection;
use crate::config::Settings;
use crate::error::ConfigError;
use crate::events::GameEvent;
use crate::geometry::cell_of;
use crate::input::FrameInput;
use crate::level::Level;
use crate::map::GridMap;
use crate::npc::{DamageOutcome, NpcContext};
use crate::objects::ObjectHandler;
use crate::pathfinding::PathFinder;
use crate::player::Player;
use crate::raycast::RayCaster;
use crate::weapon::Weapon;

/// Pixels of sky scroll per pixel of mouse motion.
const SKY_SCROLL: f32 = 4.5;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Playing,
    GameOver,
    Won,
}

pub struct Session {
    map: GridMap,
    projection: Projection,
    player: Player,
    raycaster: RayCaster,
    pathfinder: PathFinder,
    objects: ObjectHandler,
    weapon: Weapon,
    rng: StdRng,
    status: SessionStatus,
    /// Seconds since the session stopped playing.
    ended_for: f32,
    anim_tick: f32,
    flash_duration: f32,
    flash_left: f32,
    sky_offset: f32,
}

impl Session {
    /// Build a session from validated settings and a level.
    ///
    /// Fails when the resolved player start or any placed entity is inside a
    /// wall.
    pub fn new(settings: &Settings, level: &Level, seed: u64) -> Result<Self, ConfigError> {
        let start = level
            .player_start
            .unwrap_or_else(|| Vec2::from(settings.player_start));
        level.validate(start)?;

        let mut rng = StdRng::seed_from_u64(seed);
        let mut objects = ObjectHandler::new();
        objects.populate(level, cell_of(start), settings.enemies, settings.spawn_exclusion, &mut rng);

        let projection = Projection::new(settings);
        let player = Player::new(settings, start);
        let mut raycaster = RayCaster::new(projection);
        raycaster.update(&level.map, player.pos, player.angle);

        tracing::info!(
            seed,
            cols = level.map.cols(),
            rows = level.map.rows(),
            npcs = objects.alive_count(),
            "session started"
        );

        Ok(Self {
            map: level.map.clone(),
            projection,
            player,
            raycaster,
            pathfinder: PathFinder::new(settings.path_interval),
            objects,
            weapon: Weapon::shotgun(),
            rng,
            status: SessionStatus::Playing,
            ended_for: 0.0,
            anim_tick: settings.anim_tick,
            flash_duration: settings.damage_flash,
            flash_left: 0.0,
            sky_offset: 0.0,
        })
    }

    /// Advance the simulation by `dt` seconds.
    pub fn update(&mut self, input: &FrameInput, dt: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.status != SessionStatus::Playing {
            self.ended_for += dt;
            return events;
        }
        self.flash_left = (self.flash_left - dt).max(0.0);

        self.player.move_by(&self.map, input.movement, dt);
        self.player.look(input.mouse_dx, dt);
        self.player.recover_health(dt);
        self.sky_offset = (self.sky_offset + SKY_SCROLL * self.player.rel()).rem_euclid(self.projection.width);

        self.raycaster.update(&self.map, self.player.pos, self.player.angle);

        self.weapon.update(dt);
        if input.fire && self.weapon.fire() {
            events.push(GameEvent::PlayerFired);
            self.resolve_shot(&mut events);
        }

        self.objects.update_sprites(dt);

        let mut occupied = self.objects.alive_cells();
        self.pathfinder.tick(dt, &self.map, self.player.cell(), &occupied);

        let mut npc_events = Vec::new();
        let mut ctx = NpcContext {
            map: &self.map,
            paths: self.pathfinder.table(),
            player_pos: self.player.pos,
            occupied: &mut occupied,
            anim_tick: self.anim_tick,
            rng: &mut self.rng,
            events: &mut npc_events,
        };
        self.objects.update_npcs(dt, &mut ctx);

        for event in npc_events {
            events.push(event);
            if let GameEvent::NpcFired { damage, .. } = event {
                if damage > 0 {
                    self.player.take_damage(damage);
                    self.flash_left = self.flash_duration;
                    events.push(GameEvent::PlayerDamaged { amount: damage });
                }
            }
        }

        if self.player.is_dead() {
            self.status = SessionStatus::GameOver;
            events.push(GameEvent::PlayerDied);
            tracing::info!("player died; game over");
        } else if self.objects.check_win() {
            self.status = SessionStatus::Won;
            events.push(GameEvent::Victory);
            tracing::info!("all enemies defeated");
        }

        events
    }

    fn resolve_shot(&mut self, events: &mut Vec<GameEvent>) {
        let hit = self.objects.resolve_shot(
            &self.map,
            &self.projection,
            self.player.pos,
            self.player.angle,
            self.weapon.damage,
        );
        let Some(hit) = hit else { return };
        match hit.outcome {
            DamageOutcome::Pained => events.push(GameEvent::NpcPained { npc: hit.npc }),
            DamageOutcome::Killed => {
                tracing::debug!(npc = hit.npc, kind = ?hit.kind, "npc killed");
                self.player.gain_health_on_kill();
                events.push(GameEvent::NpcKilled { npc: hit.npc, kind: hit.kind });
            }
            DamageOutcome::Ignored => {}
        }
    }

    pub fn status(&self) -> SessionStatus { self.status }
    /// Seconds spent in game-over or win state.
    pub fn ended_for(&self) -> f32 { self.ended_for }
    pub fn map(&self) -> &GridMap { &self.map }
    pub fn projection(&self) -> &Projection { &self.projection }
    pub fn player(&self) -> &Player { &self.player }
    pub fn player_mut(&mut self) -> &mut Player { &mut self.player }
    pub fn raycaster(&self) -> &RayCaster { &self.raycaster }
    pub fn pathfinder(&self) -> &PathFinder { &self.pathfinder }
    pub fn objects(&self) -> &ObjectHandler { &self.objects }
    pub fn objects_mut(&mut self) -> &mut ObjectHandler { &mut self.objects }
    pub fn weapon(&self) -> &Weapon { &self.weapon }
    pub fn is_flashing(&self) -> bool { self.flash_left > 0.0 }
    /// Horizontal sky scroll in pixels, in `[0, width)`.
    pub fn sky_offset(&self) -> f32 { self.sky_offset }
}
