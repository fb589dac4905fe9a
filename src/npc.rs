// =============================================================================
// NPC.RS: Data-driven enemy kinds and the shared behaviour state machine
//
//   Idle ──sees player──▶ Chase ──in range──▶ Attack
//     ▲                     ▲  ◀──out of range──┘
//     └──(never alerted)    └──── Pain (one animation interval)
//
//   any live state ──health < 1──▶ Dying ──death frames──▶ Dead
// =============================================================================

use std::collections::HashSet;

use glam::Vec2;
use rand::Rng;

use crate::camera::BillboardShape;
use crate::events::GameEvent;
use crate::geometry::{Cell, cell_center, cell_of};
use crate::map::GridMap;
use crate::pathfinding::PathTable;
use crate::raycast::has_line_of_sight;
use crate::sprite::AnimationClock;

/// Look-ahead used for NPC wall collision.
pub const NPC_RADIUS: f32 = 0.2;

// ── Kinds ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NpcKind {
    Soldier,
    CacoDemon,
    CyberDemon,
}

/// One row of the NPC stats table.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NpcStats {
    pub health: i32,
    pub damage: i32,
    /// Cells per second.
    pub speed: f32,
    /// Inclusive range the attack distance is rolled from at spawn.
    pub attack_range: (u32, u32),
    /// Probability that an attack hits.
    pub accuracy: f64,
    /// Seconds per animation frame; also the attack cooldown and pain length.
    pub anim_interval: f32,
    pub scale: f32,
    pub height_shift: f32,
    pub death_frames: u32,
    pub spawn_weight: u32,
    /// Sprite width over height, used for the hit-scan box.
    pub aspect: f32,
}

const SOLDIER: NpcStats = NpcStats {
    health: 100,
    damage: 10,
    speed: 1.8,
    attack_range: (3, 6),
    accuracy: 0.15,
    anim_interval: 0.18,
    scale: 0.6,
    height_shift: 0.38,
    death_frames: 9,
    spawn_weight: 70,
    aspect: 0.6,
};

const CACO_DEMON: NpcStats = NpcStats {
    health: 150,
    damage: 25,
    speed: 3.0,
    attack_range: (1, 1),
    accuracy: 0.35,
    anim_interval: 0.25,
    scale: 0.7,
    height_shift: 0.27,
    death_frames: 6,
    spawn_weight: 20,
    aspect: 1.0,
};

const CYBER_DEMON: NpcStats = NpcStats {
    health: 350,
    damage: 15,
    speed: 3.3,
    attack_range: (6, 6),
    accuracy: 0.25,
    anim_interval: 0.21,
    scale: 1.0,
    height_shift: 0.04,
    death_frames: 9,
    spawn_weight: 10,
    aspect: 0.8,
};

impl NpcKind {
    pub const ALL: [NpcKind; 3] = [NpcKind::Soldier, NpcKind::CacoDemon, NpcKind::CyberDemon];

    pub fn stats(self) -> &'static NpcStats {
        match self {
            NpcKind::Soldier => &SOLDIER,
            NpcKind::CacoDemon => &CACO_DEMON,
            NpcKind::CyberDemon => &CYBER_DEMON,
        }
    }

    pub fn from_marker(ch: char) -> Option<Self> {
        match ch {
            's' => Some(NpcKind::Soldier),
            'c' => Some(NpcKind::CacoDemon),
            'y' => Some(NpcKind::CyberDemon),
            _ => None,
        }
    }

    /// Texture directory holding this kind's animation sequences.
    pub fn texture_dir(self) -> &'static str {
        match self {
            NpcKind::Soldier => "sprites/npc/soldier",
            NpcKind::CacoDemon => "sprites/npc/caco_demon",
            NpcKind::CyberDemon => "sprites/npc/cyber_demon",
        }
    }

    /// Pick a kind by spawn weight.
    pub fn pick_weighted<R: Rng>(rng: &mut R) -> Self {
        let total: u32 = Self::ALL.iter().map(|k| k.stats().spawn_weight).sum();
        let mut roll = rng.gen_range(0..total);
        for kind in Self::ALL {
            let w = kind.stats().spawn_weight;
            if roll < w {
                return kind;
            }
            roll -= w;
        }
        NpcKind::Soldier
    }
}

// ── State ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NpcState {
    Idle,
    Chase,
    Attack,
    Pain,
    Dying,
    Dead,
}

/// Animation sequence names under [`NpcKind::texture_dir`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NpcAnim {
    Idle,
    Walk,
    Attack,
    Pain,
    Death,
}

impl NpcAnim {
    pub const ALL: [NpcAnim; 5] = [NpcAnim::Idle, NpcAnim::Walk, NpcAnim::Attack, NpcAnim::Pain, NpcAnim::Death];

    pub fn name(self) -> &'static str {
        match self {
            NpcAnim::Idle => "idle",
            NpcAnim::Walk => "walk",
            NpcAnim::Attack => "attack",
            NpcAnim::Pain => "pain",
            NpcAnim::Death => "death",
        }
    }
}

/// Result of [`Npc::take_damage`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Already dying or dead; nothing changed.
    Ignored,
    Pained,
    Killed,
}

/// Everything an NPC reads from the world during one update.
pub struct NpcContext<'a, R: Rng> {
    pub map: &'a GridMap,
    pub paths: &'a PathTable,
    pub player_pos: Vec2,
    /// Cells holding alive NPCs, this one included. Kept current as NPCs
    /// change cell during the step.
    pub occupied: &'a mut HashSet<Cell>,
    /// Interval of the global tick that drives death animations.
    pub anim_tick: f32,
    pub rng: &'a mut R,
    pub events: &'a mut Vec<GameEvent>,
}

// ── Npc ───────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Npc {
    pub id: u32,
    pub kind: NpcKind,
    pub pos: Vec2,
    pub health: i32,
    state: NpcState,
    alerted: bool,
    sees_player: bool,
    last_dir: Option<(i32, i32)>,
    attack_range: f32,
    pain_timer: f32,
    clock: AnimationClock,
    frame: usize,
    death_clock: Option<AnimationClock>,
    death_frame: u32,
}

impl Npc {
    pub fn spawn<R: Rng>(id: u32, kind: NpcKind, pos: Vec2, rng: &mut R) -> Self {
        let stats = kind.stats();
        let (lo, hi) = stats.attack_range;
        Self {
            id,
            kind,
            pos,
            health: stats.health,
            state: NpcState::Idle,
            alerted: false,
            sees_player: false,
            last_dir: None,
            attack_range: rng.gen_range(lo..=hi) as f32,
            pain_timer: 0.0,
            clock: AnimationClock::new(stats.anim_interval),
            frame: 0,
            death_clock: None,
            death_frame: 0,
        }
    }

    pub fn stats(&self) -> &'static NpcStats { self.kind.stats() }

    pub fn shape(&self) -> BillboardShape {
        let s = self.stats();
        BillboardShape { scale: s.scale, aspect: s.aspect, height_shift: s.height_shift }
    }

    pub fn state(&self) -> NpcState { self.state }
    pub fn cell(&self) -> Cell { cell_of(self.pos) }
    pub fn attack_range(&self) -> f32 { self.attack_range }
    pub fn is_alerted(&self) -> bool { self.alerted }
    /// Line-of-sight result from the most recent update.
    pub fn sees_player(&self) -> bool { self.sees_player }
    /// Direction last read from the path table.
    pub fn last_dir(&self) -> Option<(i32, i32)> { self.last_dir }

    /// Alive NPCs take part in pathfinding, collision, targeting and win
    /// accounting.
    pub fn is_alive(&self) -> bool {
        !matches!(self.state, NpcState::Dying | NpcState::Dead)
    }

    /// Animation sequence and frame counter to draw.
    pub fn animation(&self) -> (NpcAnim, usize) {
        match self.state {
            NpcState::Idle => (NpcAnim::Idle, self.frame),
            NpcState::Chase => (NpcAnim::Walk, self.frame),
            NpcState::Attack => (NpcAnim::Attack, self.frame),
            NpcState::Pain => (NpcAnim::Pain, 0),
            NpcState::Dying | NpcState::Dead => {
                let last = self.stats().death_frames.saturating_sub(1);
                (NpcAnim::Death, self.death_frame.min(last) as usize)
            }
        }
    }

    /// Apply damage from the player.
    pub fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        if !self.is_alive() {
            return DamageOutcome::Ignored;
        }
        self.health -= amount;
        self.alerted = true;
        if self.health < 1 {
            self.state = NpcState::Dying;
            self.death_frame = 0;
            self.death_clock = None;
            DamageOutcome::Killed
        } else {
            self.set_state(NpcState::Pain);
            self.pain_timer = self.stats().anim_interval;
            DamageOutcome::Pained
        }
    }

    fn set_state(&mut self, state: NpcState) {
        if self.state != state {
            self.state = state;
            self.frame = 0;
            self.clock.reset();
        }
    }

    pub fn update<R: Rng>(&mut self, dt: f32, ctx: &mut NpcContext<'_, R>) {
        match self.state {
            NpcState::Dead => return,
            NpcState::Dying => {
                let clock = self.death_clock.get_or_insert_with(|| AnimationClock::new(ctx.anim_tick));
                self.death_frame += clock.tick(dt);
                if self.death_frame >= self.stats().death_frames {
                    self.state = NpcState::Dead;
                }
                return;
            }
            NpcState::Pain => {
                self.pain_timer -= dt;
                if self.pain_timer > 0.0 {
                    return;
                }
            }
            _ => {}
        }

        let same_cell = self.cell() == cell_of(ctx.player_pos);
        self.sees_player = same_cell || has_line_of_sight(ctx.map, self.pos, ctx.player_pos);
        if self.sees_player {
            self.alerted = true;
        }

        let dist = self.pos.distance(ctx.player_pos);
        if self.sees_player && dist < self.attack_range {
            self.set_state(NpcState::Attack);
            if self.clock.tick(dt) > 0 {
                self.frame += 1;
                self.attack(ctx);
            }
        } else if self.alerted {
            self.set_state(NpcState::Chase);
            self.frame += self.clock.tick(dt) as usize;
            self.chase(dt, ctx);
        } else {
            self.set_state(NpcState::Idle);
            self.frame += self.clock.tick(dt) as usize;
        }
    }

    fn attack<R: Rng>(&mut self, ctx: &mut NpcContext<'_, R>) {
        let stats = self.stats();
        let hit = ctx.rng.gen_bool(stats.accuracy.clamp(0.0, 1.0));
        ctx.events.push(GameEvent::NpcFired {
            npc: self.id,
            kind: self.kind,
            damage: if hit { stats.damage } else { 0 },
        });
    }

    fn chase<R: Rng>(&mut self, dt: f32, ctx: &mut NpcContext<'_, R>) {
        let here = self.cell();
        self.last_dir = ctx.paths.direction(here);
        let target = match ctx.paths.next_cell(here) {
            Some(next) if next != cell_of(ctx.player_pos) && ctx.occupied.contains(&next) => return,
            Some(next) => cell_center(next),
            None if self.sees_player => ctx.player_pos,
            None => return,
        };
        self.step_toward(target, dt, ctx);
    }

    /// Slide toward `target`. A step that would cross into a cell held by
    /// another alive NPC is refused, except into the player's cell.
    fn step_toward<R: Rng>(&mut self, target: Vec2, dt: f32, ctx: &mut NpcContext<'_, R>) {
        let to = target - self.pos;
        let len = to.length();
        if len < 1e-4 {
            return;
        }
        let step = (self.stats().speed * dt).min(len);
        let moved = ctx.map.slide(self.pos, to / len * step, NPC_RADIUS);

        let (from, into) = (self.cell(), cell_of(moved));
        if into != from {
            if into != cell_of(ctx.player_pos) && ctx.occupied.contains(&into) {
                return;
            }
            ctx.occupied.remove(&from);
            ctx.occupied.insert(into);
        }
        self.pos = moved;
    }
}
