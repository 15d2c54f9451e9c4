// Game logic: car handling, coin pickup, skidmarks and the world tying them together

pub mod car;
pub mod coin;
pub mod config;
pub mod skidmarks;
pub mod world;

pub use config::GameConfig;
pub use world::{World, WorldTextures};
