// 眼镜端录像回放控制器：协调 demux 与 vdec2vo，后台线程上报播放进度

pub mod core;
pub mod player;

pub use crate::core::{Command, MediaNotify, PlayState, PlayerConfig, PlayerError, Result};
pub use crate::player::{Backend, Session};
