use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// 播放会话生命周期状态位
    ///
    /// 空集即 Idle。SEEKING 是叠加在其他状态上的过程位。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PlayState: u32 {
        const OPENED    = 1 << 0;
        const STARTED   = 1 << 1;
        const PAUSED    = 1 << 2;
        const COMPLETED = 1 << 3;

        const SEEKING   = 1 << 16;
    }
}

impl PlayState {
    pub const IDLE: PlayState = PlayState::empty();

    pub fn is_opened(&self) -> bool {
        self.contains(PlayState::OPENED)
    }

    pub fn is_started(&self) -> bool {
        self.contains(PlayState::STARTED)
    }

    pub fn is_paused(&self) -> bool {
        self.contains(PlayState::PAUSED)
    }

    pub fn is_completed(&self) -> bool {
        self.contains(PlayState::COMPLETED)
    }

    /// 正在播放：已启动，且既没暂停也没播完
    pub fn is_playing(&self) -> bool {
        self.is_started() && !self.intersects(PlayState::PAUSED | PlayState::COMPLETED)
    }
}

impl fmt::Display for PlayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "Idle");
        }
        let names: Vec<&str> = self.iter_names().map(|(name, _)| name).collect();
        write!(f, "{}", names.join("|"))
    }
}
