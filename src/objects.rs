use std::collections::HashSet;

use glam::Vec2;
use rand::Rng;

use crate::camera::Projection;
use crate::geometry::{Cell, cell_center};
use crate::level::Level;
use crate::map::GridMap;
use crate::npc::{DamageOutcome, Npc, NpcContext, NpcKind};
use crate::raycast::has_line_of_sight;
use crate::sprite::{SpriteKind, SpriteObject};

/// A shot that landed on an NPC.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ShotHit {
    pub npc: u32,
    pub kind: NpcKind,
    pub outcome: DamageOutcome,
}

/// Owns every sprite and NPC in a session.
#[derive(Debug, Default)]
pub struct ObjectHandler {
    sprites: Vec<SpriteObject>,
    npcs: Vec<Npc>,
    next_id: u32,
    alive_prev: usize,
}

impl ObjectHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place the level's decorations and NPCs, then `enemies` random NPCs.
    pub fn populate<R: Rng>(
        &mut self,
        level: &Level,
        player_cell: Cell,
        enemies: usize,
        exclusion: i32,
        rng: &mut R,
    ) {
        for &(kind, pos) in &level.sprites {
            self.add_sprite(kind, pos);
        }
        for &(kind, pos) in &level.npcs {
            self.add_npc(kind, pos, rng);
        }
        self.spawn_random(&level.map, player_cell, enemies, exclusion, rng);
        self.alive_prev = self.alive_count();
        tracing::info!(
            sprites = self.sprites.len(),
            npcs = self.npcs.len(),
            "objects placed"
        );
    }

    /// Spawn up to `count` NPCs on free cells outside the exclusion square
    /// `x < exclusion && y < exclusion`, never sharing a cell with another NPC
    /// or the player. Kinds are picked by spawn weight.
    pub fn spawn_random<R: Rng>(
        &mut self,
        map: &GridMap,
        player_cell: Cell,
        count: usize,
        exclusion: i32,
        rng: &mut R,
    ) -> usize {
        let taken = self.alive_cells();
        let mut candidates: Vec<Cell> = map
            .free_cells()
            .filter(|&(x, y)| !(x < exclusion && y < exclusion))
            .filter(|c| *c != player_cell && !taken.contains(c))
            .collect();

        let mut spawned = 0;
        while spawned < count && !candidates.is_empty() {
            let cell = candidates.swap_remove(rng.gen_range(0..candidates.len()));
            let kind = NpcKind::pick_weighted(rng);
            self.add_npc(kind, cell_center(cell), rng);
            spawned += 1;
        }
        if spawned < count {
            tracing::warn!(requested = count, spawned, "not enough free cells for random spawns");
        }
        spawned
    }

    pub fn add_npc<R: Rng>(&mut self, kind: NpcKind, pos: Vec2, rng: &mut R) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.npcs.push(Npc::spawn(id, kind, pos, rng));
        id
    }

    pub fn add_sprite(&mut self, kind: SpriteKind, pos: Vec2) {
        self.sprites.push(SpriteObject::new(kind, pos));
    }

    pub fn sprites(&self) -> &[SpriteObject] { &self.sprites }
    pub fn npcs(&self) -> &[Npc] { &self.npcs }

    pub fn npc(&self, id: u32) -> Option<&Npc> {
        self.npcs.iter().find(|n| n.id == id)
    }

    pub fn npc_mut(&mut self, id: u32) -> Option<&mut Npc> {
        self.npcs.iter_mut().find(|n| n.id == id)
    }

    /// Cells holding alive NPCs.
    pub fn alive_cells(&self) -> HashSet<Cell> {
        self.npcs.iter().filter(|n| n.is_alive()).map(Npc::cell).collect()
    }

    pub fn alive_count(&self) -> usize {
        self.npcs.iter().filter(|n| n.is_alive()).count()
    }

    pub fn update_sprites(&mut self, dt: f32) {
        for sprite in &mut self.sprites {
            sprite.update(dt);
        }
    }

    /// Run every NPC's state machine once, in spawn order.
    pub fn update_npcs<R: Rng>(&mut self, dt: f32, ctx: &mut NpcContext<'_, R>) {
        for npc in &mut self.npcs {
            npc.update(dt, ctx);
        }
    }

    /// Resolve a player shot fired from `eye` along `view_angle`.
    ///
    /// The target is the nearest alive NPC in line of sight whose projected
    /// sprite spans the screen centre. At most one NPC is hit.
    pub fn resolve_shot(
        &mut self,
        map: &GridMap,
        projection: &Projection,
        eye: Vec2,
        view_angle: f32,
        damage: i32,
    ) -> Option<ShotHit> {
        let target = self
            .npcs
            .iter_mut()
            .filter(|n| n.is_alive())
            .filter_map(|n| {
                let proj = projection.project(eye, view_angle, n.pos, n.shape())?;
                proj.spans(projection.half_width).then_some((proj.norm_dist, n))
            })
            .filter(|(_, n)| has_line_of_sight(map, eye, n.pos))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, n)| n)?;

        let outcome = target.take_damage(damage);
        Some(ShotHit { npc: target.id, kind: target.kind, outcome })
    }

    /// `true` exactly once: on the step where the alive count drops from
    /// above zero to zero.
    pub fn check_win(&mut self) -> bool {
        let alive = self.alive_count();
        let won = self.alive_prev > 0 && alive == 0;
        self.alive_prev = alive;
        won
    }
}
