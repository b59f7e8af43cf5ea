use anyhow::{Context, Result};
use log::debug;
use std::ffi::{OsStr, OsString};
use std::process::{Command, Stdio};

/// 外部程式呼叫（程式名稱 + 參數）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl ToolCommand {
    #[must_use]
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
        }
    }

    pub fn arg(&mut self, arg: impl AsRef<OsStr>) -> &mut Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// 以字串形式取得參數（非 UTF-8 字元以替代字元顯示）
    #[must_use]
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// 方便記錄的完整命令列
    #[must_use]
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.to_string_lossy().into_owned()];
        parts.extend(self.args_lossy());
        parts.join(" ")
    }
}

/// 外部程式執行結果
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stderr: String,
    pub success: bool,
    pub exit_code: Option<i32>,
}

/// 執行外部程式的介面
///
/// 正式環境使用 [`FfmpegRunner`]，測試時可替換成回傳固定輸出的假實作。
/// 分段可能平行執行，所以要求 `Sync`。
pub trait CommandRunner: Sync {
    fn run(&self, command: &ToolCommand) -> Result<CommandOutput>;
}

/// 以 `std::process::Command` 實際啟動子程序
///
/// 子程序放在自己的 process group，終端機的 Ctrl-C 只送給本程式，
/// 正在執行的 ffmpeg 會跑完。主輸出不讀取。
#[derive(Debug, Default, Clone, Copy)]
pub struct FfmpegRunner;

impl FfmpegRunner {
    fn build(command: &ToolCommand) -> Command {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null());

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        cmd
    }
}

impl CommandRunner for FfmpegRunner {
    fn run(&self, command: &ToolCommand) -> Result<CommandOutput> {
        debug!("執行: {}", command.display());

        let output = Self::build(command)
            .output()
            .with_context(|| {
                format!("無法執行 {}", command.program.to_string_lossy())
            })?;

        Ok(CommandOutput {
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            success: output.status.success(),
            exit_code: output.status.code(),
        })
    }
}
