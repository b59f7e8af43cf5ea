use crate::tools::ToolCommand;
use std::path::Path;

const FFMPEG: &str = "ffmpeg";

pub struct FfmpegCommand;

impl FfmpegCommand {
    /// 場景偵測命令
    ///
    /// `select` 只放行分數超過閾值的幀，`showinfo` 將每個放行的幀
    /// （含 `pts_time:`）輸出到 stderr，主輸出丟到 null。
    #[must_use]
    pub fn scene_detect(video_path: &Path, threshold: f64) -> ToolCommand {
        let filter = format!("select='gt(scene,{threshold})',showinfo");

        let mut cmd = ToolCommand::new(FFMPEG);
        cmd.args(["-hide_banner", "-i"])
            .arg(video_path)
            .args(["-vf", &filter, "-vsync", "vfr", "-f", "null", "-"]);
        cmd
    }

    /// 串流複製裁切命令，`end` 為 `None` 時裁到影片結尾
    #[must_use]
    pub fn trim(video_path: &Path, start: f64, end: Option<f64>, output_path: &Path) -> ToolCommand {
        let mut cmd = ToolCommand::new(FFMPEG);
        cmd.args(["-hide_banner", "-nostdin", "-i"])
            .arg(video_path)
            .args(["-ss", &start.to_string()]);

        if let Some(end) = end {
            cmd.args(["-to", &end.to_string()]);
        }

        cmd.args(["-c", "copy", "-y"]).arg(output_path);
        cmd
    }
}
