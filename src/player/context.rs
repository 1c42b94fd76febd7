use crate::core::{Command, PlayState, PlayerError, Result, StreamInfo, POSITION_ENDED};
use crate::player::{Demux, VideoOutput};
use log::{debug, info, warn};

/// 播放上下文 - 会话锁保护的全部可变状态
///
/// 状态位与 playing_time 只在持锁时读写。传输命令失败时状态位仍按转移表更新，
/// 错误原样返回给调用方。
pub struct PlaybackContext {
    demux: Box<dyn Demux>,
    output: Box<dyn VideoOutput>,
    state: PlayState,
    playing_time: i64, // ms，结束时为 -2
    released: bool,
}

impl PlaybackContext {
    /// 句柄已创建、已 prepare、已绑定时钟
    pub(crate) fn new(demux: Box<dyn Demux>, output: Box<dyn VideoOutput>) -> Self {
        Self {
            demux,
            output,
            state: PlayState::OPENED,
            playing_time: 0,
            released: false,
        }
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn playing_time(&self) -> i64 {
        self.playing_time
    }

    pub fn stream_info(&self) -> &StreamInfo {
        self.demux.stream_info()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// 执行一条客户端命令
    pub fn execute(&mut self, command: Command) -> Result<()> {
        if self.released {
            return Err(PlayerError::SessionClosed);
        }
        match command {
            Command::Start => self.start(),
            Command::Stop => self.stop(),
            Command::Pause => self.pause(),
            Command::SeekTo(offset_ms) => self.seek_to(offset_ms),
        }
    }

    fn invalid(&self, command: Command) -> PlayerError {
        PlayerError::InvalidState {
            command: command.name(),
            state: self.state.to_string(),
        }
    }

    /// 先启动 vdec2vo，再启动 demux
    fn start(&mut self) -> Result<()> {
        if !self.state.is_opened() {
            return Err(self.invalid(Command::Start));
        }
        if self.state.is_playing() {
            debug!("已经在播放，忽略 Start");
            return Ok(());
        }

        let ret = self
            .output
            .start()
            .map_err(|e| PlayerError::transport("output.start", e))
            .and_then(|_| {
                self.demux
                    .start()
                    .map_err(|e| PlayerError::transport("demux.start", e))
            });

        self.state.remove(PlayState::PAUSED | PlayState::COMPLETED);
        self.state.insert(PlayState::STARTED);

        ret
    }

    /// 先暂停 demux，成功后再暂停 vdec2vo
    fn pause(&mut self) -> Result<()> {
        if !self.state.is_started() {
            return Err(self.invalid(Command::Pause));
        }
        if self.state.is_paused() {
            debug!("已经暂停，忽略 Pause");
            return Ok(());
        }

        let ret = self
            .demux
            .pause()
            .map_err(|e| PlayerError::transport("demux.pause", e))
            .and_then(|_| {
                self.output
                    .pause()
                    .map_err(|e| PlayerError::transport("output.pause", e))
            });

        self.state.insert(PlayState::PAUSED);

        ret
    }

    fn stop(&mut self) -> Result<()> {
        let ret = self.stop_pipeline();
        self.state
            .remove(PlayState::STARTED | PlayState::PAUSED | PlayState::COMPLETED);
        ret
    }

    /// 停止管线（不改状态位）：先停 demux，成功后再停 vdec2vo
    fn stop_pipeline(&mut self) -> Result<()> {
        self.demux
            .stop()
            .map_err(|e| PlayerError::transport("demux.stop", e))
            .and_then(|_| {
                self.output
                    .stop()
                    .map_err(|e| PlayerError::transport("output.stop", e))
            })
    }

    fn seek_to(&mut self, offset_ms: i64) -> Result<()> {
        if !self.state.is_started() {
            return Err(self.invalid(Command::SeekTo(offset_ms)));
        }
        if offset_ms < 0 {
            return Err(PlayerError::InvalidSeek(offset_ms));
        }

        self.state.insert(PlayState::SEEKING);
        let ret = self
            .demux
            .seek_to(offset_ms)
            .map_err(|e| PlayerError::transport("demux.seek_to", e))
            .and_then(|_| {
                self.output
                    .seek_to()
                    .map_err(|e| PlayerError::transport("output.seek_to", e))
            });
        self.state.remove(PlayState::SEEKING);

        ret
    }

    /// 推进 EOF 判定：demux 读完后让 vdec2vo 确认，确认后停止管线并标记播放完成
    fn advance(&mut self) {
        if !self.state.is_started() || self.state.is_completed() {
            return;
        }

        if self.demux.is_end_of_stream() {
            self.output.check_end_of_stream();
        }

        if self.output.is_end_of_stream() {
            if let Err(e) = self.stop_pipeline() {
                warn!("播放结束时停止管线失败: {}", e);
            }
            self.state.insert(PlayState::COMPLETED);
            info!("🏁 播放完成: {}", self.demux.description());
        }
    }

    /// 监控线程的一次采样，返回采样到的播放位置
    pub fn tick(&mut self) -> i64 {
        if self.released {
            return self.playing_time;
        }

        self.advance();

        if self.output.is_end_of_stream() {
            self.playing_time = POSITION_ENDED;
        } else {
            match self.output.current_position() {
                Ok(position) => self.playing_time = position,
                Err(e) => debug!("读取播放位置失败，沿用上次位置: {}", e),
            }
        }

        self.playing_time
    }

    /// 停止管线并释放两个句柄，只执行一次
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.stop_pipeline() {
            warn!("释放前停止管线失败: {}", e);
        }
        self.demux.close();
        self.output.deinit();
        self.state = PlayState::IDLE;
        self.released = true;
    }
}
