use crate::core::{OutputChannels, Result, StreamInfo};

/// 解封装器抽象接口
///
/// 会话独占持有一个 Demux，所有调用都在会话锁内完成，实现方不需要自己加锁，
/// 但每个调用都必须在有限时间内返回。
pub trait Demux: Send {
    /// 码流信息（打开后即可读取）
    fn stream_info(&self) -> &StreamInfo;

    /// 开始 / 恢复读取
    fn start(&mut self) -> Result<()>;

    fn stop(&mut self) -> Result<()>;

    fn pause(&mut self) -> Result<()>;

    /// Seek 到指定位置（毫秒）
    fn seek_to(&mut self, offset_ms: i64) -> Result<()>;

    /// 是否已读到文件末尾
    fn is_end_of_stream(&self) -> bool;

    /// 把 demux 输出绑定到解码通道和时钟通道，首次 start 之前完成，只做一次
    fn bind_clock(&mut self, channels: OutputChannels) -> Result<()>;

    /// 释放所有资源，可重复调用
    fn close(&mut self);

    /// 获取描述信息（用于调试）
    fn description(&self) -> String;
}
