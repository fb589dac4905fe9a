// =============================================================================
// LEVEL.RS: Grid map plus entity placements parsed from a text layout
//
// Layout characters:
//   `.` / space   free floor
//   `1`..`9`      wall with that texture id
//   `P`           player start
//   `s` `c` `y`   soldier, caco demon, cyber demon
//   `g` `r` `l`   green light, red light, candelabra
//
// Entity markers count as free floor; entities stand at the cell centre.
// =============================================================================

use std::path::Path;

use glam::Vec2;

use crate::error::{ConfigError, MapError};
use crate::geometry::{cell_center, cell_of};
use crate::map::GridMap;
use crate::npc::NpcKind;
use crate::sprite::SpriteKind;

/// The built-in level.
pub const DEFAULT_LAYOUT: [&str; 32] = [
    "1111111111111111",
    "1g............g1",
    "1..3333g..222..1",
    "1....g4...l.2..1",
    "1....g4....s2.g1",
    "1P.3333g......r1",
    "1............s.1",
    "1g..4...4r..r.r1",
    "1113131113..3111",
    "1111111111..1111",
    "1..........1...1",
    "1..........1...1",
    "1..3..........r1",
    "1..3.......1...1",
    "1..r.c.....1...1",
    "11111.11111111.1",
    "1....c.....1...1",
    "1..........1...1",
    "1..r.......2...1",
    "1..2...2...s...1",
    "1.s2...2.rr....1",
    "1..............1",
    "1111111.11111111",
    "1..............1",
    "1g..4......4..g1",
    "1.............y1",
    "1..3333..3333..1",
    "1..............1",
    "1...4......4...1",
    "1...s..........1",
    "1g............g1",
    "1111111111111111",
];

#[derive(Clone, Debug)]
pub struct Level {
    pub map: GridMap,
    /// `None` when the layout has no `P`; the session falls back to
    /// `Settings::player_start`.
    pub player_start: Option<Vec2>,
    pub npcs: Vec<(NpcKind, Vec2)>,
    pub sprites: Vec<(SpriteKind, Vec2)>,
}

impl Level {
    /// Parse a layout given one row per line. Blank trailing lines are ignored.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let mut rows: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
        while rows.last().is_some_and(|l| l.trim().is_empty()) {
            rows.pop();
        }
        Self::from_rows(&rows)
    }

    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, MapError> {
        let mut player_start = None;
        let mut duplicate_start = false;
        let mut npcs = Vec::new();
        let mut sprites = Vec::new();

        let map = GridMap::parse_with(rows, |ch, col, row| {
            let at = cell_center((col as i32, row as i32));
            if ch == 'P' {
                duplicate_start |= player_start.replace(at).is_some();
                return true;
            }
            if let Some(kind) = NpcKind::from_marker(ch) {
                npcs.push((kind, at));
                return true;
            }
            if let Some(kind) = SpriteKind::from_marker(ch) {
                sprites.push((kind, at));
                return true;
            }
            false
        })?;

        if duplicate_start {
            return Err(MapError::DuplicatePlayerStart);
        }
        Ok(Self { map, player_start, npcs, sprites })
    }

    /// Read a layout file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text)?)
    }

    pub fn default_level() -> Self {
        // The built-in layout is covered by tests; parsing it cannot fail.
        match Self::from_rows(&DEFAULT_LAYOUT) {
            Ok(level) => level,
            Err(e) => unreachable!("built-in level is malformed: {e}"),
        }
    }

    /// Check that every placed entity and the resolved player start stand on
    /// free floor.
    pub fn validate(&self, player_start: Vec2) -> Result<(), ConfigError> {
        let start = cell_of(player_start);
        if self.map.is_wall(start) {
            return Err(ConfigError::PlayerStartBlocked(start.0, start.1));
        }
        let placed = self.npcs.iter().map(|(_, p)| *p).chain(self.sprites.iter().map(|(_, p)| *p));
        for pos in placed {
            let cell = cell_of(pos);
            if self.map.is_wall(cell) {
                return Err(ConfigError::EntityInWall(cell.0, cell.1));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_level_parses() {
        let level = Level::default_level();
        assert_eq!(level.map.cols(), 16);
        assert_eq!(level.map.rows(), 32);
        assert_eq!(level.player_start, Some(Vec2::new(1.5, 5.5)));
        assert!(level.validate(Vec2::new(1.5, 5.5)).is_ok());
        assert!(!level.npcs.is_empty());
        assert!(!level.sprites.is_empty());
    }

    #[test]
    fn markers_become_entities() {
        let level = Level::parse("1111\n1Ps1\n1gy1\n1111\n").unwrap();
        assert_eq!(level.player_start, Some(Vec2::new(1.5, 1.5)));
        assert_eq!(level.npcs, vec![
            (NpcKind::Soldier, Vec2::new(2.5, 1.5)),
            (NpcKind::CyberDemon, Vec2::new(2.5, 2.5)),
        ]);
        assert_eq!(level.sprites, vec![(SpriteKind::GreenLight, Vec2::new(1.5, 2.5))]);
        assert!(level.map.is_free((2, 1)));
    }

    #[test]
    fn two_player_starts_are_rejected() {
        let err = Level::parse("1111\n1PP1\n1111").unwrap_err();
        assert_eq!(err, MapError::DuplicatePlayerStart);
    }

    #[test]
    fn blocked_start_is_rejected() {
        let level = Level::parse("111\n1.1\n111").unwrap();
        assert!(matches!(
            level.validate(Vec2::new(0.5, 0.5)),
            Err(ConfigError::PlayerStartBlocked(0, 0))
        ));
    }
}
