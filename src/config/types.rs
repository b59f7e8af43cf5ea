use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_VIDEO_PATH: &str = "output.mp4";
pub const DEFAULT_OUTPUT_DIR: &str = "clips";
pub const DEFAULT_SCENE_THRESHOLD: f64 = 0.3;

/// 執行設定，缺少的欄位使用預設值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 來源影片
    pub video_path: PathBuf,
    /// 片段輸出資料夾
    pub output_dir: PathBuf,
    /// 場景變換閾值，越低越敏感（原樣傳給 ffmpeg）
    pub threshold: f64,
    /// 同時裁切的 ffmpeg 數量
    pub jobs: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            video_path: PathBuf::from(DEFAULT_VIDEO_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            threshold: DEFAULT_SCENE_THRESHOLD,
            jobs: 1,
        }
    }
}
