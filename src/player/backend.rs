use crate::core::Result;
use crate::player::{Demux, VideoOutput};

/// 管线工厂 - 为一个会话创建 demux 和 vdec2vo 句柄
///
/// 返回的句柄归调用方独占，调用方负责 `close()` / `deinit()`。
pub trait Backend {
    /// 初始化解码输出系统
    fn init_output(&self) -> Result<Box<dyn VideoOutput>>;

    /// 打开媒体源
    fn open_demux(&self, source: &str) -> Result<Box<dyn Demux>>;
}
