// Engine modules: renderer, input, assets, frame timing

pub mod assets;
pub mod game_loop;
pub mod input;
pub mod renderer;
