pub mod debug;
pub mod engine;
pub mod figure;
pub mod frame;
pub mod scene;
pub mod settings;
