use serde::{Deserialize, Serialize};

/// 播放结束 / 位置未知时上报的哨兵值
pub const POSITION_ENDED: i64 = -2;

/// 视频编码类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecType {
    H264,
    H265,
    Mjpeg,
}

/// 像素格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelFormat {
    YVU420P, // 眼镜端 VO 默认格式
    YUV420P,
    NV12,
    NV21,
}

/// 视频输出接口
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceType {
    Bt1120,
    Lcd,
    Hdmi,
}

/// 输出同步制式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStandard {
    Ntsc,
    Pal,
}

/// 码流信息（demux 打开后即可读取）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamInfo {
    pub codec: CodecType,
    pub width: u32,
    pub height: u32,
    pub duration_ms: i64, // 总时长（毫秒）
}

/// vdec2vo 暴露的通道号，demux 需要绑定到这两个通道上
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputChannels {
    pub vdec: u32,
    pub clock: u32,
}

/// vdec2vo prepare 参数：解码侧来自码流，输出侧来自配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputParams {
    pub codec: CodecType,
    pub width: u32,
    pub height: u32,
    pub output_width: u32,
    pub output_height: u32,
    pub interface: InterfaceType,
    pub sync: SyncStandard,
    pub channel: u32,
    pub pixel_format: PixelFormat,
    pub rotation: u32,
}

impl OutputParams {
    pub fn new(stream: &StreamInfo, config: &crate::core::PlayerConfig) -> Self {
        Self {
            codec: stream.codec,
            width: stream.width,
            height: stream.height,
            output_width: config.output.width,
            output_height: config.output.height,
            interface: config.output.interface,
            sync: config.output.sync,
            channel: config.output.channel,
            pixel_format: config.pixel_format,
            rotation: config.rotation,
        }
    }
}

/// 监控线程每次采样后上报给客户端的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaNotify {
    pub playing_time_ms: i64, // 当前位置（毫秒），结束时为 -2
    pub duration_ms: i64,
}

impl MediaNotify {
    pub fn new(playing_time_ms: i64, duration_ms: i64) -> Self {
        Self {
            playing_time_ms,
            duration_ms,
        }
    }

    /// 是否为播放结束通知
    pub fn is_ended(&self) -> bool {
        self.playing_time_ms == POSITION_ENDED
    }
}

/// 客户端下发的播放命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Pause,
    SeekTo(i64), // ms
}

impl Command {
    /// 固件命令码：START=0, STOP=1, PAUSE=2, SEEK=3
    ///
    /// 未知命令码返回 None，调用方直接忽略
    pub fn from_opcode(opt: u32, param: i64) -> Option<Self> {
        match opt {
            0 => Some(Command::Start),
            1 => Some(Command::Stop),
            2 => Some(Command::Pause),
            3 => Some(Command::SeekTo(param)),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "Start",
            Command::Stop => "Stop",
            Command::Pause => "Pause",
            Command::SeekTo(_) => "SeekTo",
        }
    }
}
