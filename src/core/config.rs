use crate::core::{InterfaceType, PixelFormat, PlayerError, Result, SyncStandard};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// 视频输出端配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputProfile {
    pub width: u32,
    pub height: u32,
    pub interface: InterfaceType,
    pub sync: SyncStandard,
    pub channel: u32,
}

impl OutputProfile {
    /// HDZero 眼镜：BT1120 输出 1080p
    pub fn hdzero() -> Self {
        Self {
            width: 1920,
            height: 1080,
            interface: InterfaceType::Bt1120,
            sync: SyncStandard::Ntsc,
            channel: 2,
        }
    }

    /// 调试板竖屏 LCD
    pub fn lcd_panel() -> Self {
        Self {
            width: 720,
            height: 1280,
            interface: InterfaceType::Lcd,
            sync: SyncStandard::Ntsc,
            channel: 2,
        }
    }
}

impl Default for OutputProfile {
    fn default() -> Self {
        if cfg!(feature = "lcd-panel") {
            Self::lcd_panel()
        } else {
            Self::hdzero()
        }
    }
}

/// 播放器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// 监控线程采样间隔（毫秒），决定状态通知的刷新频率
    pub monitor_interval_ms: u64,
    pub output: OutputProfile,
    pub pixel_format: PixelFormat,
    pub rotation: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            monitor_interval_ms: 100,
            output: OutputProfile::default(),
            pixel_format: PixelFormat::YVU420P,
            rotation: 0,
        }
    }
}

impl PlayerConfig {
    /// 从 JSON 文件加载，缺失字段使用默认值
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        info!("📄 已加载配置: {}", path.display());
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: PlayerConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.monitor_interval_ms == 0 {
            return Err(PlayerError::Config("monitor_interval_ms 不能为 0".to_string()));
        }
        if self.output.width == 0 || self.output.height == 0 {
            return Err(PlayerError::Config(format!(
                "输出分辨率无效: {}x{}",
                self.output.width, self.output.height
            )));
        }
        if self.rotation % 90 != 0 {
            return Err(PlayerError::Config(format!("旋转角度必须是 90 的倍数: {}", self.rotation)));
        }
        Ok(())
    }

    pub fn monitor_interval(&self) -> Duration {
        Duration::from_millis(self.monitor_interval_ms)
    }
}
