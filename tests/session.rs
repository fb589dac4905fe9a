use glam::Vec2;

use jcaster::config::Settings;
use jcaster::error::ConfigError;
use jcaster::events::GameEvent;
use jcaster::input::FrameInput;
use jcaster::level::Level;
use jcaster::map::GridMap;
use jcaster::npc::{NpcKind, NpcState};
use jcaster::session::{Session, SessionStatus};

const DT: f32 = 1.0 / 60.0;

fn settings() -> Settings {
    Settings { enemies: 0, ..Settings::default() }
}

fn room(player: Vec2, npcs: Vec<(NpcKind, Vec2)>) -> Level {
    Level { map: GridMap::bordered(10, 10), player_start: Some(player), npcs, sprites: Vec::new() }
}

// ── End to end ───────────────────────────────────────────────────────────────

#[test]
fn npc_closes_distance_then_attacks() {
    let level = room(Vec2::new(5.5, 5.5), vec![(NpcKind::CacoDemon, Vec2::new(1.5, 2.5))]);
    let mut session = Session::new(&settings(), &level, 3).unwrap();
    let player = session.player().pos;

    let mut last = session.objects().npc(0).unwrap().pos.distance(player);
    assert!((last - 5.0).abs() < 1e-5);

    let mut attacked = false;
    for step in 0..600 {
        session.update(&FrameInput::default(), DT);
        let npc = session.objects().npc(0).unwrap();
        let dist = npc.pos.distance(player);
        match npc.state() {
            NpcState::Attack => {
                assert!(dist < npc.attack_range(), "attacking from {dist}");
                attacked = true;
                break;
            }
            NpcState::Chase => {
                assert!(dist < last, "step {step}: {dist} did not improve on {last}");
                last = dist;
            }
            other => panic!("unexpected state {other:?} at step {step}"),
        }
    }
    assert!(attacked, "never reached attack range");
}

// ── Shooting ─────────────────────────────────────────────────────────────────

#[test]
fn shot_pains_target_and_refire_waits_for_reload() {
    let level = room(Vec2::new(2.5, 5.5), vec![(NpcKind::Soldier, Vec2::new(6.5, 5.5))]);
    let mut session = Session::new(&settings(), &level, 1).unwrap();
    let fire = FrameInput { fire: true, ..Default::default() };

    let events = session.update(&fire, DT);
    assert_eq!(events, vec![GameEvent::PlayerFired, GameEvent::NpcPained { npc: 0 }]);
    assert_eq!(session.objects().npc(0).unwrap().health, 50);
    assert!(session.weapon().is_reloading());

    let events = session.update(&fire, DT);
    assert!(events.is_empty(), "{events:?}");
}

#[test]
fn kill_restores_player_health() {
    let level = room(Vec2::new(2.5, 5.5), vec![(NpcKind::Soldier, Vec2::new(6.5, 5.5))]);
    let mut session = Session::new(&settings(), &level, 1).unwrap();
    session.objects_mut().npc_mut(0).unwrap().health = 10;
    session.player_mut().take_damage(40);

    let events = session.update(&FrameInput { fire: true, ..Default::default() }, DT);
    assert!(events.contains(&GameEvent::NpcKilled { npc: 0, kind: NpcKind::Soldier }));
    assert_eq!(session.player().health, 70);
}

// ── End states ───────────────────────────────────────────────────────────────

#[test]
fn player_death_ends_the_session() {
    let mut session = Session::new(&settings(), &room(Vec2::new(5.5, 5.5), Vec::new()), 1).unwrap();
    session.player_mut().take_damage(100);

    let events = session.update(&FrameInput::default(), DT);
    assert_eq!(events, vec![GameEvent::PlayerDied]);
    assert_eq!(session.status(), SessionStatus::GameOver);

    assert!(session.update(&FrameInput::default(), 0.5).is_empty());
    assert!((session.ended_for() - 0.5).abs() < 1e-6);
}

#[test]
fn killing_the_last_npc_wins_once() {
    let level = room(Vec2::new(2.5, 2.5), vec![(NpcKind::CyberDemon, Vec2::new(7.5, 7.5))]);
    let mut session = Session::new(&settings(), &level, 1).unwrap();
    session.objects_mut().npc_mut(0).unwrap().take_damage(1000);

    let events = session.update(&FrameInput::default(), DT);
    assert!(events.contains(&GameEvent::Victory));
    assert_eq!(session.status(), SessionStatus::Won);

    assert!(session.update(&FrameInput::default(), DT).is_empty());
    assert!(session.ended_for() > 0.0);
}

#[test]
fn mouse_motion_turns_and_scrolls_the_sky() {
    let mut session = Session::new(&settings(), &room(Vec2::new(5.5, 5.5), Vec::new()), 1).unwrap();
    let before = session.player().angle;
    session.update(&FrameInput { mouse_dx: 10.0, ..Default::default() }, DT);
    assert!(session.player().angle > before);
    assert!(session.sky_offset() > 0.0);
    assert!(session.sky_offset() < session.projection().width);
}

// ── Construction ─────────────────────────────────────────────────────────────

#[test]
fn blocked_player_start_is_rejected() {
    let level = room(Vec2::new(0.5, 4.5), Vec::new());
    assert!(matches!(
        Session::new(&settings(), &level, 1),
        Err(ConfigError::PlayerStartBlocked(0, 4))
    ));
}

#[test]
fn entity_in_wall_is_rejected() {
    let level = room(Vec2::new(5.5, 5.5), vec![(NpcKind::Soldier, Vec2::new(9.5, 3.5))]);
    assert!(matches!(
        Session::new(&settings(), &level, 1),
        Err(ConfigError::EntityInWall(9, 3))
    ));
}

#[test]
fn missing_start_falls_back_to_settings() {
    let mut level = room(Vec2::ZERO, Vec::new());
    level.player_start = None;
    let session = Session::new(&settings(), &level, 1).unwrap();
    assert_eq!(session.player().pos, Vec2::new(1.5, 5.0));
}
