pub mod assets;
pub mod boss;
pub mod compute;
pub mod config;
pub mod draw;
pub mod enemy;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod player;
pub mod projectile;
pub mod score;
