use crate::core::{OutputChannels, OutputParams, Result};

/// 解码 + 显示输出管线（vdec2vo）抽象接口
///
/// 与 [`Demux`](crate::player::Demux) 一样由会话独占，在会话锁内调用。
pub trait VideoOutput: Send {
    /// 解码通道和时钟通道，供 demux 绑定
    fn channels(&self) -> OutputChannels;

    /// 按码流参数和输出端参数准备管线
    fn prepare(&mut self, params: &OutputParams) -> Result<()>;

    fn start(&mut self) -> Result<()>;

    fn stop(&mut self) -> Result<()>;

    fn pause(&mut self) -> Result<()>;

    /// demux seek 之后重新同步到新位置
    fn seek_to(&mut self) -> Result<()>;

    /// demux 已到末尾时调用，推进内部的 EOF 判定（等待解码队列排空）
    fn check_end_of_stream(&mut self);

    fn is_end_of_stream(&self) -> bool;

    /// 当前播放位置（毫秒）
    fn current_position(&self) -> Result<i64>;

    /// 释放所有资源，可重复调用
    fn deinit(&mut self);
}
