use crate::core::{
    OutputChannels, OutputParams, PlaybackClock, PlayerError, Result, StreamInfo,
};
use crate::player::{Backend, Demux, VideoOutput};
use log::{debug, info};
use std::collections::HashMap;

/// 模拟管线的 vdec / clock 通道号
const SIM_VDEC_CHN: u32 = 0;
const SIM_CLOCK_CHN: u32 = 0;

/// demux 读完后，再经过几次 EOF 检查才认为解码队列排空
const SIM_DRAIN_CHECKS: u32 = 3;

/// 模拟后端 - 不依赖硬件，用墙钟推进播放位置
///
/// 每个会话用一个独立的 SimBackend，demux 与 vdec2vo 共用同一个时钟。
pub struct SimBackend {
    clips: HashMap<String, StreamInfo>,
    clock: PlaybackClock,
}

impl SimBackend {
    pub fn new() -> Self {
        Self {
            clips: HashMap::new(),
            clock: PlaybackClock::new(),
        }
    }

    /// 注册一个可以被打开的片段
    pub fn with_clip(mut self, name: &str, info: StreamInfo) -> Self {
        self.clips.insert(name.to_string(), info);
        self
    }
}

impl Default for SimBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for SimBackend {
    fn init_output(&self) -> Result<Box<dyn VideoOutput>> {
        Ok(Box::new(SimOutput {
            clock: self.clock.clone(),
            prepared: None,
            drain_checks: 0,
            eos: false,
            released: false,
        }))
    }

    fn open_demux(&self, source: &str) -> Result<Box<dyn Demux>> {
        let info = self
            .clips
            .get(source)
            .cloned()
            .ok_or_else(|| PlayerError::Other(format!("无法打开文件: {}", source)))?;
        info!("📁 打开模拟片段: {} ({}ms)", source, info.duration_ms);
        Ok(Box::new(SimDemux {
            source: source.to_string(),
            info,
            clock: self.clock.clone(),
            bound: None,
            released: false,
        }))
    }
}

pub struct SimDemux {
    source: String,
    info: StreamInfo,
    clock: PlaybackClock,
    bound: Option<OutputChannels>,
    released: bool,
}

impl SimDemux {
    fn check_live(&self, op: &'static str) -> Result<()> {
        if self.released {
            return Err(PlayerError::Transport {
                op,
                reason: "demux 已关闭".to_string(),
            });
        }
        Ok(())
    }
}

impl Demux for SimDemux {
    fn stream_info(&self) -> &StreamInfo {
        &self.info
    }

    fn start(&mut self) -> Result<()> {
        self.check_live("demux.start")?;
        if self.bound.is_none() {
            return Err(PlayerError::Transport {
                op: "demux.start",
                reason: "尚未绑定解码通道".to_string(),
            });
        }
        self.clock.play();
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.check_live("demux.stop")?;
        self.clock.pause();
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.check_live("demux.pause")?;
        self.clock.pause();
        Ok(())
    }

    fn seek_to(&mut self, offset_ms: i64) -> Result<()> {
        self.check_live("demux.seek_to")?;
        self.clock.set_time(offset_ms.min(self.info.duration_ms));
        Ok(())
    }

    fn is_end_of_stream(&self) -> bool {
        self.clock.now() >= self.info.duration_ms
    }

    fn bind_clock(&mut self, channels: OutputChannels) -> Result<()> {
        debug!("绑定 vdec 通道 {} / clock 通道 {}", channels.vdec, channels.clock);
        self.bound = Some(channels);
        Ok(())
    }

    fn close(&mut self) {
        if !self.released {
            self.clock.pause();
            self.released = true;
        }
    }

    fn description(&self) -> String {
        format!("Sim Demux: {}", self.source)
    }
}

pub struct SimOutput {
    clock: PlaybackClock,
    prepared: Option<OutputParams>,
    drain_checks: u32,
    eos: bool,
    released: bool,
}

impl VideoOutput for SimOutput {
    fn channels(&self) -> OutputChannels {
        OutputChannels {
            vdec: SIM_VDEC_CHN,
            clock: SIM_CLOCK_CHN,
        }
    }

    fn prepare(&mut self, params: &OutputParams) -> Result<()> {
        if params.width == 0 || params.height == 0 {
            return Err(PlayerError::Other(format!(
                "码流分辨率无效: {}x{}",
                params.width, params.height
            )));
        }
        info!(
            "🖥 vdec2vo prepare: {:?} {}x{} -> {:?} {}x{} chn{}",
            params.codec,
            params.width,
            params.height,
            params.interface,
            params.output_width,
            params.output_height,
            params.channel
        );
        self.prepared = Some(params.clone());
        Ok(())
    }

    fn start(&mut self) -> Result<()> {
        if self.released || self.prepared.is_none() {
            return Err(PlayerError::Transport {
                op: "output.start",
                reason: "vdec2vo 未就绪".to_string(),
            });
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        Ok(())
    }

    fn seek_to(&mut self) -> Result<()> {
        self.drain_checks = 0;
        self.eos = false;
        Ok(())
    }

    fn check_end_of_stream(&mut self) {
        self.drain_checks += 1;
        if self.drain_checks >= SIM_DRAIN_CHECKS {
            self.eos = true;
        }
    }

    fn is_end_of_stream(&self) -> bool {
        self.eos
    }

    fn current_position(&self) -> Result<i64> {
        Ok(self.clock.now())
    }

    fn deinit(&mut self) {
        self.released = true;
        self.prepared = None;
    }
}
