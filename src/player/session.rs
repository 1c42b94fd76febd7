use crate::core::{
    Command, MediaNotify, OutputParams, PlayState, PlayerConfig, PlayerError, Result, StreamInfo,
};
use crate::player::{log_ctx, Backend, Demux, Monitor, PlaybackContext, VideoOutput};
use log::{error, info, warn};
use parking_lot::Mutex;
use std::sync::Arc;

/// 播放会话 - 一路码流的播放实例
///
/// 创建时拿到 demux / vdec2vo 句柄并启动监控线程，`destroy()` 时按
/// “停监控 → join → 停管线 → 释放句柄” 的顺序销毁。会话只允许一个所有者下发命令。
pub struct Session {
    context: Arc<Mutex<PlaybackContext>>,
    monitor: Option<Monitor>,
    stream: StreamInfo,
    source: String,
}

impl Session {
    /// 打开媒体源并准备好管线
    ///
    /// 任何一步失败都会释放已申请的资源，并返回 [`PlayerError::Construction`]。
    pub fn create<B, F>(backend: &B, source: &str, config: &PlayerConfig, on_notify: F) -> Result<Self>
    where
        B: Backend + ?Sized,
        F: Fn(MediaNotify) + Send + Sync + 'static,
    {
        info!("{} 🎬 创建播放会话: {}", log_ctx(), source);
        config
            .validate()
            .map_err(|e| PlayerError::construction("config", e))?;

        let mut output = backend.init_output().map_err(|e| {
            error!("创建 vdec2vo 失败: {}", e);
            PlayerError::construction("init_output", e)
        })?;

        let mut demux = match backend.open_demux(source) {
            Ok(demux) => demux,
            Err(e) => {
                error!("打开 demux 失败: {}", e);
                output.deinit();
                return Err(PlayerError::construction("open_demux", e));
            }
        };

        let stream = demux.stream_info().clone();
        info!(
            "码流信息: {:?} {}x{}，时长 {}ms",
            stream.codec, stream.width, stream.height, stream.duration_ms
        );

        let params = OutputParams::new(&stream, config);
        if let Err(e) = output.prepare(&params) {
            error!("prepare vdec2vo 失败: {}", e);
            return Err(Self::rollback(demux, output, "prepare", e));
        }

        let channels = output.channels();
        if let Err(e) = demux.bind_clock(channels) {
            error!("绑定解码通道 / 时钟失败: {}", e);
            return Err(Self::rollback(demux, output, "bind_clock", e));
        }

        let context = Arc::new(Mutex::new(PlaybackContext::new(demux, output)));
        let monitor = match Monitor::start(
            context.clone(),
            Arc::new(on_notify),
            config.monitor_interval(),
            stream.duration_ms,
        ) {
            Ok(monitor) => monitor,
            Err(e) => {
                error!("{} 创建监控线程失败: {}", log_ctx(), e);
                context.lock().release();
                return Err(PlayerError::construction("monitor", e));
            }
        };

        info!("{} ✅ 准备就绪: {}", log_ctx(), source);
        Ok(Self {
            context,
            monitor: Some(monitor),
            stream,
            source: source.to_string(),
        })
    }

    fn rollback(
        mut demux: Box<dyn Demux>,
        mut output: Box<dyn VideoOutput>,
        stage: &'static str,
        err: PlayerError,
    ) -> PlayerError {
        demux.close();
        output.deinit();
        PlayerError::construction(stage, err)
    }

    /// 执行一条命令，与监控线程的采样互斥
    ///
    /// 传输失败时状态位照常更新，错误返回给调用方。
    pub fn dispatch(&self, command: Command) -> Result<()> {
        info!("{} 🎮 {:?}", log_ctx(), command);
        let ret = self.context.lock().execute(command);
        if let Err(ref e) = ret {
            warn!("{} ⚠️  {:?} 失败: {}", log_ctx(), command, e);
        }
        ret
    }

    pub fn state(&self) -> PlayState {
        self.context.lock().state()
    }

    /// 最近一次采样到的播放位置（毫秒），结束时为 -2
    pub fn playing_time(&self) -> i64 {
        self.context.lock().playing_time()
    }

    pub fn stream_info(&self) -> &StreamInfo {
        &self.stream
    }

    pub fn duration_ms(&self) -> i64 {
        self.stream.duration_ms
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// 销毁会话，阻塞到监控线程退出、句柄释放完毕
    pub fn destroy(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        info!("{} ⏹️  销毁播放会话: {}", log_ctx(), self.source);

        // 必须先确认监控线程已经退出，再释放句柄
        if let Some(mut monitor) = self.monitor.take() {
            monitor.stop();
        }

        self.context.lock().release();
        info!("{} ✅ 播放会话已销毁", log_ctx());
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.monitor.is_some() {
            warn!("{} ⚠ Session 被 drop，但未调用 destroy()，正在销毁", log_ctx());
            self.teardown();
        }
    }
}
