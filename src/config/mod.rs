pub mod load;
pub mod types;

pub use load::SETTINGS_FILE;
pub use types::{Config, DEFAULT_OUTPUT_DIR, DEFAULT_SCENE_THRESHOLD, DEFAULT_VIDEO_PATH};
