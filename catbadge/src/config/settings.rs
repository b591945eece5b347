//! 主题设置与图标配置
//! ThemeSettings：宿主提供的原始设置（两段配置串 + 渲染开关）
//! IconConfig：启动时构建一次的不可变值，显式传入每个解析/组装调用

use std::path::Path;
use std::sync::Arc;

use catbadge_engine::{RenderContext, RuleTable};
use serde::{Deserialize, Serialize};

use crate::error::{BadgeError, BadgeResult};

/// 锁图标设置为空时的回退值
pub const DEFAULT_LOCK_ICON: &str = "lock";

/// 主题设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    /// `slug,icon,color,match|…` 图标规则串
    pub category_icon_list: String,
    /// 受限分类锁图标名
    pub category_lock_icon: String,
    /// 站点设置：混合文字方向
    pub support_mixed_text_direction: bool,
    /// 站点子目录前缀
    pub base_uri: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            category_icon_list: String::new(),
            category_lock_icon: DEFAULT_LOCK_ICON.to_string(),
            support_mixed_text_direction: false,
            base_uri: String::new(),
        }
    }
}

impl ThemeSettings {
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::new()
    }

    pub fn from_json_str(json: &str) -> BadgeResult<Self> {
        serde_json::from_str(json).map_err(BadgeError::from)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> BadgeResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            BadgeError::SettingsLoadError(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json_str(&content)
    }

    /// 生效的锁图标名（空设置回退为 lock）
    pub fn lock_icon(&self) -> &str {
        let icon = self.category_lock_icon.trim();
        if icon.is_empty() {
            DEFAULT_LOCK_ICON
        } else {
            icon
        }
    }
}

/// 设置构建器（链式 API）
#[derive(Debug, Clone, Default)]
pub struct SettingsBuilder {
    settings: ThemeSettings,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn icon_list(mut self, raw: impl Into<String>) -> Self {
        self.settings.category_icon_list = raw.into();
        self
    }

    pub fn lock_icon(mut self, icon: impl Into<String>) -> Self {
        self.settings.category_lock_icon = icon.into();
        self
    }

    pub fn mixed_text_direction(mut self, enabled: bool) -> Self {
        self.settings.support_mixed_text_direction = enabled;
        self
    }

    pub fn base_uri(mut self, base: impl Into<String>) -> Self {
        self.settings.base_uri = base.into();
        self
    }

    pub fn build(self) -> ThemeSettings {
        self.settings
    }
}

/// 不可变图标配置：规则表 + 渲染上下文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconConfig {
    pub rules: RuleTable,
    pub render: RenderContext,
}

impl IconConfig {
    pub fn from_settings(settings: &ThemeSettings) -> Self {
        let rules = RuleTable::parse(&settings.category_icon_list);
        for problem in RuleTable::lint(&settings.category_icon_list) {
            log::debug!("category_icon_list: {}", problem);
        }
        log::info!(
            "Parsed {} category icon rules (lock icon: {})",
            rules.len(),
            settings.lock_icon()
        );

        Self {
            rules,
            render: RenderContext {
                lock_icon: settings.lock_icon().to_string(),
                mixed_text_direction: settings.support_mixed_text_direction,
                base_uri: settings.base_uri.clone(),
            },
        }
    }

    pub fn shared(settings: &ThemeSettings) -> Arc<Self> {
        Arc::new(Self::from_settings(settings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_json_defaults() {
        let settings = ThemeSettings::from_json_str(r#"{"category_icon_list": "news,newspaper"}"#).unwrap();
        assert_eq!(settings.lock_icon(), "lock");
        assert!(!settings.support_mixed_text_direction);
    }

    #[test]
    fn test_empty_lock_icon_falls_back() {
        let settings = ThemeSettings::builder().lock_icon("  ").build();
        assert_eq!(settings.lock_icon(), DEFAULT_LOCK_ICON);
    }

    #[test]
    fn test_icon_config_from_settings() {
        let settings = ThemeSettings::builder()
            .icon_list("news,newspaper|broken|eng,wrench,,partial")
            .lock_icon("key")
            .mixed_text_direction(true)
            .base_uri("/forum")
            .build();
        let config = IconConfig::from_settings(&settings);
        assert_eq!(config.rules.len(), 2);
        assert_eq!(config.render.lock_icon, "key");
        assert!(config.render.mixed_text_direction);
        assert_eq!(config.render.base_uri, "/forum");
    }

    #[test]
    fn test_settings_invalid_json() {
        assert!(matches!(
            ThemeSettings::from_json_str("{not json"),
            Err(BadgeError::JsonError(_))
        ));
    }
}
