use anyhow::Result;
use console::style;
use log::{info, warn};
use scene_splitter::component::SceneSplitter;
use scene_splitter::component::scene_splitter::RunOutcome;
use scene_splitter::config::Config;
use scene_splitter::init;
use scene_splitter::signal::setup_shutdown_signal;

fn main() -> Result<()> {
    init::init();
    let shutdown_signal = setup_shutdown_signal()?;

    let config = Config::new()?;
    info!(
        "設定: video={}, output={}, threshold={}, jobs={}",
        config.video_path.display(),
        config.output_dir.display(),
        config.threshold,
        config.jobs
    );

    let splitter = SceneSplitter::with_ffmpeg(config, shutdown_signal);

    match splitter.run() {
        Ok(RunOutcome::NoScenes) => {
            info!("Program exited normally (no scenes)");
            Ok(())
        }
        Ok(RunOutcome::Split { clips, .. }) => {
            info!("Program exited normally, {} clips saved", clips.len());
            Ok(())
        }
        Err(e) => {
            warn!("Program error: {e:#}");
            eprintln!("{} {:#}", style("錯誤:").red().bold(), e);
            std::process::exit(1);
        }
    }
}
