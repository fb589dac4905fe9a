pub mod audio;
pub mod camera;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod geometry;
pub mod input;
pub mod level;
pub mod map;
pub mod npc;
pub mod objects;
pub mod pathfinding;
pub mod player;
pub mod raycast;
pub mod renderer;
pub mod session;
pub mod sprite;
pub mod weapon;
pub mod window;
