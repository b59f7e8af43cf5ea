use super::ffmpeg_command::FfmpegCommand;
use crate::tools::CommandRunner;
use anyhow::{Context, Result, bail};
use log::{debug, info};
use regex::Regex;
use std::path::Path;

/// 影片中的秒數偏移
pub type Timestamp = f64;

/// 使用 ffmpeg `select` + `showinfo` 濾鏡偵測場景變換
///
/// 閾值原封不動交給 ffmpeg，不做範圍檢查。
/// ffmpeg 無法啟動或以非零狀態結束時回傳錯誤；
/// 空結果只代表沒有任何幀超過閾值。
pub fn detect_scenes(
    runner: &dyn CommandRunner,
    path: &Path,
    threshold: f64,
) -> Result<Vec<Timestamp>> {
    debug!("場景偵測設定: path={}, threshold={threshold}", path.display());

    let command = FfmpegCommand::scene_detect(path, threshold);
    let output = runner
        .run(&command)
        .with_context(|| format!("無法執行 ffmpeg 場景偵測: {}", path.display()))?;

    if !output.success {
        bail!(
            "ffmpeg 場景偵測失敗 (exit code {:?}): {}",
            output.exit_code,
            output.stderr.trim()
        );
    }

    // showinfo 輸出在 stderr
    let timestamps = parse_showinfo_output(&output.stderr)?;
    info!("偵測到 {} 個場景變換點", timestamps.len());

    Ok(timestamps)
}

/// 解析 showinfo 輸出
///
/// 每一行只取第一個 `pts_time:` 值，依出現順序保留，不排序也不去重。
/// 例如: [Parsed_showinfo_1 @ 0x...] n:   0 pts:  12345 pts_time:4.115 ...
pub fn parse_showinfo_output(output: &str) -> Result<Vec<Timestamp>> {
    let pts_time_regex = Regex::new(r"pts_time:([\d.]+)")?;

    let timestamps = output
        .lines()
        .filter_map(|line| {
            pts_time_regex
                .captures(line)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse::<f64>().ok())
        })
        .collect();

    Ok(timestamps)
}
