use super::ffmpeg_command::FfmpegCommand;
use super::scene_detector::Timestamp;
use crate::tools::{CommandRunner, ensure_directory_exists};
use anyhow::{Context, Result, bail};
use console::style;
use log::{debug, error, info, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 來源沒有副檔名時使用的容器格式
const DEFAULT_EXTENSION: &str = "mp4";

/// 兩個相鄰場景變換點之間的區段，`end` 為 `None` 代表到影片結尾
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub index: usize,
    pub start: Timestamp,
    pub end: Option<Timestamp>,
}

/// 單一區段的裁切任務
#[derive(Debug, Clone)]
pub struct SegmentTask {
    pub video_path: PathBuf,
    pub interval: Interval,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentStatus {
    Completed,
    Failed,
    Cancelled,
}

/// 區段裁切結果
#[derive(Debug)]
pub struct SegmentResult {
    pub output_path: PathBuf,
    pub index: usize,
    pub status: SegmentStatus,
    pub error_message: Option<String>,
}

impl SegmentResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == SegmentStatus::Completed
    }
}

/// 分段設定
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// 同時執行的 ffmpeg 數量，1 為循序執行
    pub jobs: usize,
    pub shutdown_signal: Arc<AtomicBool>,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            jobs: 1,
            shutdown_signal: Arc::new(AtomicBool::new(false)),
        }
    }
}

/// 將時間點兩兩配對成區段，最後一段沒有結束時間
#[must_use]
pub fn build_intervals(timestamps: &[Timestamp]) -> Vec<Interval> {
    timestamps
        .iter()
        .enumerate()
        .map(|(index, &start)| Interval {
            index,
            start,
            end: timestamps.get(index + 1).copied(),
        })
        .collect()
}

/// 輸出檔的副檔名跟隨來源容器
#[must_use]
pub fn clip_extension(video_path: &Path) -> String {
    video_path
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .unwrap_or(DEFAULT_EXTENSION)
        .to_string()
}

/// 建立裁切任務列表，輸出檔名為 `clip_<i>.<ext>`
#[must_use]
pub fn create_segment_tasks(
    video_path: &Path,
    timestamps: &[Timestamp],
    output_dir: &Path,
) -> Vec<SegmentTask> {
    let extension = clip_extension(video_path);

    build_intervals(timestamps)
        .into_iter()
        .map(|interval| SegmentTask {
            video_path: video_path.to_path_buf(),
            output_path: output_dir.join(format!("clip_{}.{extension}", interval.index)),
            interval,
        })
        .collect()
}

/// 裁切單一區段（串流複製，不重新編碼）
#[must_use]
pub fn trim_segment(runner: &dyn CommandRunner, task: &SegmentTask) -> SegmentResult {
    match trim_segment_inner(runner, task) {
        Ok(()) => SegmentResult {
            output_path: task.output_path.clone(),
            index: task.interval.index,
            status: SegmentStatus::Completed,
            error_message: None,
        },
        Err(e) => SegmentResult {
            output_path: task.output_path.clone(),
            index: task.interval.index,
            status: SegmentStatus::Failed,
            error_message: Some(format!("{e:#}")),
        },
    }
}

fn trim_segment_inner(runner: &dyn CommandRunner, task: &SegmentTask) -> Result<()> {
    let Interval { index, start, end } = task.interval;

    debug!(
        "裁切區段 {index}: start={start}s, end={}",
        end.map_or_else(|| "EOF".to_string(), |e| format!("{e}s"))
    );

    let command = FfmpegCommand::trim(&task.video_path, start, end, &task.output_path);
    let output = runner
        .run(&command)
        .with_context(|| format!("無法執行 ffmpeg 裁切: {}", task.video_path.display()))?;

    if !output.success {
        bail!("{}", output.stderr.trim());
    }

    Ok(())
}

fn process_task(
    runner: &dyn CommandRunner,
    task: &SegmentTask,
    shutdown_signal: &AtomicBool,
) -> SegmentResult {
    if shutdown_signal.load(Ordering::SeqCst) {
        warn!("收到中斷訊號，略過區段 {}", task.interval.index);
        return SegmentResult {
            output_path: task.output_path.clone(),
            index: task.interval.index,
            status: SegmentStatus::Cancelled,
            error_message: Some("操作已取消".to_string()),
        };
    }

    let result = trim_segment(runner, task);

    if let Some(msg) = result.error_message.as_ref().filter(|_| !result.is_success()) {
        error!("區段裁切失敗 [{}]: {msg}", result.index);
        println!(
            "{} {msg}",
            style(format!("Error processing clip {}:", result.index)).red()
        );
    }

    result
}

/// 依序（或以有限的執行緒池平行）裁切所有區段
///
/// 回傳結果一律依區段索引排序，與完成順序無關。
/// 只有輸出資料夾無法建立時才回傳錯誤，單一區段失敗只會被記錄並略過。
pub fn split_segments(
    runner: &dyn CommandRunner,
    video_path: &Path,
    timestamps: &[Timestamp],
    output_dir: &Path,
    options: &SplitOptions,
) -> Result<Vec<SegmentResult>> {
    ensure_directory_exists(output_dir)
        .with_context(|| format!("無法建立輸出資料夾: {}", output_dir.display()))?;

    let tasks = create_segment_tasks(video_path, timestamps, output_dir);
    info!("開始裁切，共 {} 個區段", tasks.len());

    let shutdown_signal = &*options.shutdown_signal;

    let results = if options.jobs > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.jobs)
            .build()
            .context("無法建立執行緒池")?;

        // par_iter + collect 保留原始索引順序
        pool.install(|| {
            tasks
                .par_iter()
                .map(|task| process_task(runner, task, shutdown_signal))
                .collect::<Vec<_>>()
        })
    } else {
        tasks
            .iter()
            .map(|task| process_task(runner, task, shutdown_signal))
            .collect()
    };

    Ok(results)
}

/// 裁切影片並回傳成功產生的片段路徑（依區段順序）
pub fn split_video(
    runner: &dyn CommandRunner,
    video_path: &Path,
    timestamps: &[Timestamp],
    output_dir: &Path,
    options: &SplitOptions,
) -> Result<Vec<PathBuf>> {
    let results = split_segments(runner, video_path, timestamps, output_dir, options)?;
    Ok(successful_clips(&results))
}

#[must_use]
pub fn successful_clips(results: &[SegmentResult]) -> Vec<PathBuf> {
    results
        .iter()
        .filter(|r| r.is_success())
        .map(|r| r.output_path.clone())
        .collect()
}
