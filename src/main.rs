use anyhow::Result;
use crossbeam_channel::unbounded;
use goggle_player::core::{CodecType, StreamInfo};
use goggle_player::player::SimBackend;
use goggle_player::{Command, MediaNotify, PlayerConfig, Session};
use log::{info, warn};
use std::time::{Duration, Instant};

const DEMO_CLIP: &str = "clip.ts";
const DEMO_DURATION_MS: i64 = 5_000;

fn main() -> Result<()> {
    // 初始化日志
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("🎬 Goggle Player 启动（模拟管线）");

    // 用法: goggle_player [config.json]
    let config = match std::env::args().nth(1) {
        Some(path) => PlayerConfig::load(&path)?,
        None => PlayerConfig::default(),
    };
    info!("输出配置: {:?}", config.output);

    let backend = SimBackend::new().with_clip(
        DEMO_CLIP,
        StreamInfo {
            codec: CodecType::H265,
            width: 1920,
            height: 1080,
            duration_ms: DEMO_DURATION_MS,
        },
    );

    let (tx, rx) = unbounded::<MediaNotify>();
    let session = Session::create(&backend, DEMO_CLIP, &config, move |info| {
        let _ = tx.send(info);
    })?;

    session.dispatch(Command::Start)?;
    wait_for(&rx, Duration::from_millis(1_000), |_| false);

    session.dispatch(Command::Pause)?;
    wait_for(&rx, Duration::from_millis(300), |_| false);
    session.dispatch(Command::Start)?;

    session.dispatch(Command::SeekTo(DEMO_DURATION_MS - 1_000))?;
    if wait_for(&rx, Duration::from_secs(3), |info| info.is_ended()) {
        info!("🏁 播放结束，状态: {}", session.state());
    } else {
        warn!("⚠️  等待播放结束超时，状态: {}", session.state());
    }

    session.dispatch(Command::Stop)?;
    session.destroy();

    info!("👋 退出");
    Ok(())
}

/// 打印通知直到满足条件或超时，返回是否满足条件
fn wait_for(
    rx: &crossbeam_channel::Receiver<MediaNotify>,
    timeout: Duration,
    done: impl Fn(&MediaNotify) -> bool,
) -> bool {
    let deadline = Instant::now() + timeout;
    while let Some(left) = deadline.checked_duration_since(Instant::now()) {
        match rx.recv_timeout(left) {
            Ok(info) => {
                info!("⏱  {} / {} ms", info.playing_time_ms, info.duration_ms);
                if done(&info) {
                    return true;
                }
            }
            Err(_) => break,
        }
    }
    false
}
