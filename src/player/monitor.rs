use crate::core::{MediaNotify, PlayerError, Result};
use crate::player::{log_ctx, PlaybackContext};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// 客户端注册的状态通知回调，会在监控线程里被调用
pub type NotifyFn = dyn Fn(MediaNotify) + Send + Sync + 'static;

/// 监控线程管理器
/// - 每个采样周期在会话锁内推进 EOF 判定并采样播放位置
/// - 释放锁之后再回调客户端
/// - stop() 置位退出标志、唤醒休眠并 join，返回后线程一定已经退出
pub struct Monitor {
    thread_handle: Option<JoinHandle<()>>,
    exit: Arc<AtomicBool>,
    // drop 发送端即可唤醒正在 recv_timeout 的监控线程
    wake_tx: Option<Sender<()>>,
}

impl Monitor {
    /// 启动监控线程
    pub fn start(
        context: Arc<Mutex<PlaybackContext>>,
        notify: Arc<NotifyFn>,
        interval: Duration,
        duration_ms: i64,
    ) -> Result<Self> {
        let exit = Arc::new(AtomicBool::new(false));
        let (wake_tx, wake_rx) = bounded::<()>(1);

        let thread_exit = exit.clone();
        let thread_handle = thread::Builder::new()
            .name("media-monitor".to_string())
            .spawn(move || {
                Self::monitor_loop(context, notify, thread_exit, wake_rx, interval, duration_ms);
            })
            .map_err(|e| PlayerError::Thread(format!("创建监控线程失败: {}", e)))?;

        Ok(Self {
            thread_handle: Some(thread_handle),
            exit,
            wake_tx: Some(wake_tx),
        })
    }

    /// 监控循环（在独立线程中运行）
    fn monitor_loop(
        context: Arc<Mutex<PlaybackContext>>,
        notify: Arc<NotifyFn>,
        exit: Arc<AtomicBool>,
        wake_rx: Receiver<()>,
        interval: Duration,
        duration_ms: i64,
    ) {
        info!("{} 👀 监控线程启动（采样间隔 {:?}）", log_ctx(), interval);

        let mut tick_count: u64 = 0;

        loop {
            if exit.load(Ordering::Acquire) {
                break;
            }

            let playing_time = {
                let mut ctx = context.lock();
                ctx.tick()
            };
            tick_count += 1;

            let info = MediaNotify::new(playing_time, duration_ms);
            if tick_count % 50 == 1 {
                debug!("{} 📍 采样 #{}: {:?}", log_ctx(), tick_count, info);
            }

            // 退出过程中不再回调客户端
            if !exit.load(Ordering::Acquire) {
                notify(info);
            }

            match wake_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) | Ok(()) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        info!("{} 🛑 监控线程退出（共采样 {} 次）", log_ctx(), tick_count);
    }

    pub fn is_running(&self) -> bool {
        self.thread_handle.is_some()
    }

    /// 停止线程并等待其退出
    pub fn stop(&mut self) {
        self.exit.store(true, Ordering::Release);
        self.wake_tx.take();

        if let Some(handle) = self.thread_handle.take() {
            if handle.join().is_err() {
                error!("{} ❌ 监控线程异常退出", log_ctx());
            }
        }
    }
}

impl Drop for Monitor {
    fn drop(&mut self) {
        if self.thread_handle.is_some() {
            warn!("{} ⚠ Monitor 被 drop，但未调用 stop()，正在停止", log_ctx());
            self.stop();
        }
    }
}
