pub mod camera;
pub mod collision;
pub mod config;
pub mod dialog;
pub mod engine;
pub mod error;
pub mod game;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod map;
pub mod player;
pub mod renderer;
pub mod window;
pub mod world;
