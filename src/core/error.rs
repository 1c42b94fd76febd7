use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlayerError {
    /// 创建会话失败（已回滚所有已申请的资源）
    #[error("创建播放会话失败 [{stage}]: {reason}")]
    Construction { stage: &'static str, reason: String },

    /// demux / vdec2vo 的传输控制调用失败
    #[error("传输控制失败 [{op}]: {reason}")]
    Transport { op: &'static str, reason: String },

    #[error("当前状态 {state} 不允许执行 {command}")]
    InvalidState { command: &'static str, state: String },

    #[error("无效的 Seek 位置: {0}ms")]
    InvalidSeek(i64),

    #[error("播放会话已关闭")]
    SessionClosed,

    #[error("配置错误: {0}")]
    Config(String),

    #[error("线程错误: {0}")]
    Thread(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON 错误: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("其他错误: {0}")]
    Other(String),
}

impl PlayerError {
    /// 把协作组件返回的错误归类为传输错误
    pub fn transport(op: &'static str, err: PlayerError) -> Self {
        match err {
            e @ PlayerError::Transport { .. } => e,
            other => PlayerError::Transport {
                op,
                reason: other.to_string(),
            },
        }
    }

    /// 把构造阶段的错误归类为构造错误
    pub fn construction(stage: &'static str, err: PlayerError) -> Self {
        match err {
            e @ PlayerError::Construction { .. } => e,
            other => PlayerError::Construction {
                stage,
                reason: other.to_string(),
            },
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, PlayerError::Transport { .. })
    }

    pub fn is_construction(&self) -> bool {
        matches!(self, PlayerError::Construction { .. })
    }
}

pub type Result<T> = std::result::Result<T, PlayerError>;
