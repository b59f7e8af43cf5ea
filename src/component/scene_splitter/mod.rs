//! 場景切割元件
//!
//! 兩階段流程：
//! A. 場景變換偵測（select + showinfo）
//! B. 依相鄰變換點串流複製裁切片段

mod ffmpeg_command;
mod main;
mod scene_detector;
mod segment_splitter;

pub use ffmpeg_command::FfmpegCommand;
pub use main::{RunOutcome, SceneSplitter};
pub use scene_detector::{Timestamp, detect_scenes, parse_showinfo_output};
pub use segment_splitter::{
    Interval, SegmentResult, SegmentStatus, SegmentTask, SplitOptions, build_intervals,
    clip_extension, create_segment_tasks, split_segments, split_video, successful_clips,
    trim_segment,
};
