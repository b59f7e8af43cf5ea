//! 功能元件模組

pub mod scene_splitter;

pub use scene_splitter::SceneSplitter;
