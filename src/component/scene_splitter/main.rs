use super::scene_detector::{Timestamp, detect_scenes};
use super::segment_splitter::{SegmentStatus, SplitOptions, split_segments, successful_clips};
use crate::config::Config;
use crate::tools::{CommandRunner, FfmpegRunner, validate_file_exists};
use anyhow::{Context, Result};
use console::style;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// 一次執行的結果
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// 沒有任何幀超過閾值，未進行裁切
    NoScenes,
    Split {
        timestamps: Vec<Timestamp>,
        clips: Vec<PathBuf>,
    },
}

/// 場景切割器
///
/// A. 以 ffmpeg 偵測場景變換點
/// B. 依相鄰變換點串流複製裁切，每個區段一個片段
pub struct SceneSplitter<R: CommandRunner = FfmpegRunner> {
    config: Config,
    runner: R,
    shutdown_signal: Arc<AtomicBool>,
}

impl SceneSplitter<FfmpegRunner> {
    #[must_use]
    pub const fn with_ffmpeg(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self::new(config, FfmpegRunner, shutdown_signal)
    }
}

impl<R: CommandRunner> SceneSplitter<R> {
    pub const fn new(config: Config, runner: R, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            runner,
            shutdown_signal,
        }
    }

    pub const fn runner(&self) -> &R {
        &self.runner
    }

    pub fn run(&self) -> Result<RunOutcome> {
        println!("{}", style("=== 場景切割 ===").cyan().bold());

        let video_path = &self.config.video_path;
        validate_file_exists(video_path)?;

        // Stage A: 場景變換偵測
        println!("{}", style("Detecting scene changes...").dim());
        let timestamps = detect_scenes(&self.runner, video_path, self.config.threshold)
            .context("場景偵測失敗")?;
        println!("Detected scene changes at: {timestamps:?}");

        if timestamps.is_empty() {
            println!(
                "{}",
                style("No scene changes detected. Try lowering the threshold.").yellow()
            );
            info!("未偵測到場景變換，threshold={}", self.config.threshold);
            return Ok(RunOutcome::NoScenes);
        }

        // Stage B: 裁切片段
        println!("{}", style("Splitting video into original shots...").cyan());
        let options = SplitOptions {
            jobs: self.config.jobs.max(1),
            shutdown_signal: Arc::clone(&self.shutdown_signal),
        };
        let results = split_segments(
            &self.runner,
            video_path,
            &timestamps,
            &self.config.output_dir,
            &options,
        )?;

        let clips = successful_clips(&results);
        println!("Saved clips: {clips:?}");

        let failed = results
            .iter()
            .filter(|r| r.status == SegmentStatus::Failed)
            .count();
        let cancelled = results
            .iter()
            .filter(|r| r.status == SegmentStatus::Cancelled)
            .count();
        self.print_summary(results.len(), clips.len(), failed, cancelled);

        Ok(RunOutcome::Split { timestamps, clips })
    }

    fn print_summary(&self, total: usize, successful: usize, failed: usize, cancelled: usize) {
        println!();
        println!("{}", style("=== 場景切割摘要 ===").cyan().bold());
        println!("  總計: {total} 個區段");
        println!("  成功: {} 個", style(successful).green());

        if failed > 0 {
            println!("  失敗: {} 個", style(failed).red());
        }

        if cancelled > 0 {
            println!("  取消: {} 個", style(cancelled).yellow());
        }

        info!(
            "場景切割完成 - 輸出: {}, 成功: {successful}, 失敗: {failed}, 取消: {cancelled}",
            self.config.output_dir.display()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{CommandOutput, ToolCommand};
    use std::sync::Mutex;

    /// 偵測回傳固定 stderr，裁切全部成功
    struct FakeFfmpeg {
        detect_stderr: String,
        calls: Mutex<Vec<ToolCommand>>,
    }

    impl FakeFfmpeg {
        fn new(detect_stderr: &str) -> Self {
            Self {
                detect_stderr: detect_stderr.to_string(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn trim_calls(&self) -> usize {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.args_lossy().iter().any(|a| a == "copy"))
                .count()
        }
    }

    impl CommandRunner for FakeFfmpeg {
        fn run(&self, command: &ToolCommand) -> Result<CommandOutput> {
            self.calls.lock().unwrap().push(command.clone());
            let is_detect = command.args_lossy().iter().any(|a| a.contains("showinfo"));

            Ok(CommandOutput {
                stderr: if is_detect {
                    self.detect_stderr.clone()
                } else {
                    String::new()
                },
                success: true,
                exit_code: Some(0),
                ..CommandOutput::default()
            })
        }
    }

    fn config_in(dir: &std::path::Path) -> Config {
        let video_path = dir.join("output.mp4");
        std::fs::write(&video_path, b"fake").unwrap();
        Config {
            video_path,
            output_dir: dir.join("clips"),
            ..Config::default()
        }
    }

    #[test]
    fn test_run_without_scenes_skips_splitting() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_in(temp.path());
        let splitter = SceneSplitter::new(
            config.clone(),
            FakeFfmpeg::new("frame=  240 fps=0.0\n"),
            Arc::new(AtomicBool::new(false)),
        );

        let outcome = splitter.run().unwrap();

        assert_eq!(outcome, RunOutcome::NoScenes);
        assert_eq!(splitter.runner().trim_calls(), 0);
        assert!(!config.output_dir.exists());
    }

    #[test]
    fn test_run_splits_on_detected_scenes() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_in(temp.path());
        let splitter = SceneSplitter::new(
            config.clone(),
            FakeFfmpeg::new("pts_time:1.0\npts_time:4.5\npts_time:9.2\n"),
            Arc::new(AtomicBool::new(false)),
        );

        let outcome = splitter.run().unwrap();

        assert_eq!(
            outcome,
            RunOutcome::Split {
                timestamps: vec![1.0, 4.5, 9.2],
                clips: vec![
                    config.output_dir.join("clip_0.mp4"),
                    config.output_dir.join("clip_1.mp4"),
                    config.output_dir.join("clip_2.mp4"),
                ],
            }
        );
        assert_eq!(splitter.runner().trim_calls(), 3);
    }

    struct CrashingFfmpeg;

    impl CommandRunner for CrashingFfmpeg {
        fn run(&self, _command: &ToolCommand) -> Result<CommandOutput> {
            Ok(CommandOutput {
                stderr: "output.mp4: Invalid data found when processing input\n".to_string(),
                success: false,
                exit_code: Some(1),
            })
        }
    }

    #[test]
    fn test_run_detection_failure_is_error() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_in(temp.path());
        let splitter = SceneSplitter::new(
            config.clone(),
            CrashingFfmpeg,
            Arc::new(AtomicBool::new(false)),
        );

        let err = splitter.run().unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.starts_with("場景偵測失敗: "), "{msg}");
        assert!(msg.contains("Invalid data found"), "{msg}");
        assert!(!config.output_dir.exists());
    }

    #[test]
    fn test_run_missing_video_is_error() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config {
            video_path: temp.path().join("missing.mp4"),
            ..Config::default()
        };
        let splitter = SceneSplitter::new(
            config,
            FakeFfmpeg::new(""),
            Arc::new(AtomicBool::new(false)),
        );

        assert!(splitter.run().is_err());
        assert!(splitter.runner().calls.lock().unwrap().is_empty());
    }
}
