pub mod canvas;
pub mod components;
pub mod config;
pub mod system;
