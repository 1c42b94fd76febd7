//! 测试桩：记录调用次数、可注入失败的 demux / vdec2vo
//!
//! 所有桩共享同一个 [`Probe`]。Probe 同时检测是否有两个协作组件调用在时间上重叠，
//! 用来验证会话锁确实把命令和监控采样串行化了。

use crate::core::{CodecType, OutputChannels, OutputParams, PlayerError, Result, StreamInfo};
use crate::player::{Backend, Demux, VideoOutput};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub const CLIP_DURATION_MS: i64 = 60_000;
pub const POSITION_STEP_MS: i64 = 100;
pub const MISSING_SOURCE: &str = "missing.ts";

#[derive(Default)]
struct ProbeState {
    calls: Vec<&'static str>,
    failing: HashSet<&'static str>,
    position: i64,
    playing: bool,
    demux_eos: bool,
    output_eos: bool,
}

#[derive(Default)]
pub struct Probe {
    state: Mutex<ProbeState>,
    busy: AtomicBool,
    overlaps: AtomicUsize,
    hold_us: AtomicU64,
}

impl Probe {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// 让某个调用（如 "demux.pause"）之后都返回失败
    pub fn fail(&self, op: &'static str) {
        self.state.lock().failing.insert(op);
    }

    pub fn count(&self, op: &str) -> usize {
        self.state.lock().calls.iter().filter(|c| **c == op).count()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    pub fn set_demux_eos(&self, eos: bool) {
        self.state.lock().demux_eos = eos;
    }

    pub fn overlaps(&self) -> usize {
        self.overlaps.load(Ordering::SeqCst)
    }

    /// 每次调用内部停留一段时间，放大并发窗口
    pub fn set_hold(&self, hold: Duration) {
        self.hold_us.store(hold.as_micros() as u64, Ordering::SeqCst);
    }

    fn touch<T>(&self, f: impl FnOnce(&mut ProbeState) -> T) -> T {
        if self.busy.swap(true, Ordering::SeqCst) {
            self.overlaps.fetch_add(1, Ordering::SeqCst);
        }
        let hold = self.hold_us.load(Ordering::SeqCst);
        if hold > 0 {
            thread::sleep(Duration::from_micros(hold));
        }
        let mut guard = self.state.lock();
        let out = f(&mut *guard);
        drop(guard);
        self.busy.store(false, Ordering::SeqCst);
        out
    }

    fn call(&self, op: &'static str) -> Result<()> {
        self.touch(|s| {
            s.calls.push(op);
            if s.failing.contains(op) {
                Err(PlayerError::Other(format!("{op} 注入失败")))
            } else {
                Ok(())
            }
        })
    }
}

pub struct MockBackend {
    probe: Arc<Probe>,
}

impl MockBackend {
    pub fn new(probe: &Arc<Probe>) -> Self {
        Self {
            probe: probe.clone(),
        }
    }
}

impl Backend for MockBackend {
    fn init_output(&self) -> Result<Box<dyn VideoOutput>> {
        self.probe.call("backend.init_output")?;
        Ok(Box::new(MockOutput {
            probe: self.probe.clone(),
        }))
    }

    fn open_demux(&self, source: &str) -> Result<Box<dyn Demux>> {
        self.probe.call("backend.open_demux")?;
        if source == MISSING_SOURCE {
            return Err(PlayerError::Other(format!("无法打开文件: {source}")));
        }
        Ok(Box::new(MockDemux {
            probe: self.probe.clone(),
            source: source.to_string(),
            info: StreamInfo {
                codec: CodecType::H265,
                width: 1920,
                height: 1080,
                duration_ms: CLIP_DURATION_MS,
            },
            bound: None,
        }))
    }
}

pub struct MockDemux {
    probe: Arc<Probe>,
    source: String,
    info: StreamInfo,
    bound: Option<OutputChannels>,
}

impl Demux for MockDemux {
    fn stream_info(&self) -> &StreamInfo {
        &self.info
    }

    fn start(&mut self) -> Result<()> {
        self.probe.call("demux.start")?;
        if self.bound.is_none() {
            return Err(PlayerError::Other("demux 尚未绑定时钟".to_string()));
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.probe.call("demux.stop")
    }

    fn pause(&mut self) -> Result<()> {
        self.probe.call("demux.pause")
    }

    fn seek_to(&mut self, offset_ms: i64) -> Result<()> {
        self.probe.call("demux.seek_to")?;
        self.probe.touch(|s| {
            s.position = offset_ms;
            s.demux_eos = offset_ms >= CLIP_DURATION_MS;
            s.output_eos = false;
        });
        Ok(())
    }

    fn is_end_of_stream(&self) -> bool {
        self.probe.touch(|s| s.demux_eos)
    }

    fn bind_clock(&mut self, channels: OutputChannels) -> Result<()> {
        self.probe.call("demux.bind_clock")?;
        self.bound = Some(channels);
        Ok(())
    }

    fn close(&mut self) {
        let _ = self.probe.call("demux.close");
    }

    fn description(&self) -> String {
        format!("Mock Demux: {}", self.source)
    }
}

pub struct MockOutput {
    probe: Arc<Probe>,
}

impl VideoOutput for MockOutput {
    fn channels(&self) -> OutputChannels {
        OutputChannels { vdec: 0, clock: 0 }
    }

    fn prepare(&mut self, _params: &OutputParams) -> Result<()> {
        self.probe.call("output.prepare")
    }

    fn start(&mut self) -> Result<()> {
        self.probe.call("output.start")?;
        self.probe.touch(|s| s.playing = true);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.probe.call("output.stop")?;
        self.probe.touch(|s| s.playing = false);
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.probe.call("output.pause")?;
        self.probe.touch(|s| s.playing = false);
        Ok(())
    }

    fn seek_to(&mut self) -> Result<()> {
        self.probe.call("output.seek_to")
    }

    fn check_end_of_stream(&mut self) {
        let _ = self.probe.call("output.check_eos");
        self.probe.touch(|s| {
            if s.demux_eos {
                s.output_eos = true;
            }
        });
    }

    fn is_end_of_stream(&self) -> bool {
        self.probe.touch(|s| s.output_eos)
    }

    fn current_position(&self) -> Result<i64> {
        self.probe.call("output.position")?;
        Ok(self.probe.touch(|s| {
            if s.playing {
                s.position += POSITION_STEP_MS;
            }
            s.position
        }))
    }

    fn deinit(&mut self) {
        let _ = self.probe.call("output.deinit");
    }
}
