// 播放器核心模块

pub mod backend;
pub mod context;
pub mod demux;
pub mod monitor;
pub mod output;
pub mod session;
pub mod sim;

#[cfg(test)]
pub(crate) mod mock;

pub use backend::Backend;
pub use context::PlaybackContext;
pub use demux::Demux;
pub use monitor::{Monitor, NotifyFn};
pub use output::VideoOutput;
pub use session::Session;
pub use sim::SimBackend;

use std::process;
use std::thread;

pub(crate) fn log_ctx() -> String {
    format!("[pid:{} tid:{:?}]", process::id(), thread::current().id())
}
