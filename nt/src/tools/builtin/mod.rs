//! Built-in tools for the assistant loop

mod cron;
mod edit_file;
mod end_turn;
mod list_directory;
mod read_file;
mod spawn;
mod write_file;

pub use cron::CronTool;
pub use edit_file::EditFileTool;
pub use end_turn::{END_TURN_TOOL, EndTurnTool};
pub use list_directory::ListDirectoryTool;
pub use read_file::ReadFileTool;
pub use spawn::SpawnTool;
pub use write_file::WriteFileTool;
