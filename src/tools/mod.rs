mod command_runner;
mod path_validator;

pub use command_runner::{CommandOutput, CommandRunner, FfmpegRunner, ToolCommand};
pub use path_validator::{ensure_directory_exists, validate_file_exists};
