//! 主题运行上下文
//! 启动时构建一次：不可变图标配置 + 宿主图标库 + 本地化
//! 所有渲染/补丁调用显式持有它，不依赖隐藏的全局状态

use std::sync::Arc;

use catbadge_engine::{
    BadgeComposer, BreadcrumbComposer, CategoryIconResolver, DefaultTranslator, IconLibrary,
    SvgIconLibrary, Translator,
};

use crate::config::{IconConfig, ThemeSettings};

#[derive(Clone)]
pub struct ThemeContext {
    pub config: Arc<IconConfig>,
    pub icons: Arc<dyn IconLibrary>,
    pub i18n: Arc<dyn Translator>,
}

impl std::fmt::Debug for ThemeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ThemeContext {
    /// 使用内置SVG图标库与英文文案
    pub fn new(config: Arc<IconConfig>) -> Self {
        Self {
            config,
            icons: Arc::new(SvgIconLibrary),
            i18n: Arc::new(DefaultTranslator::default()),
        }
    }

    pub fn from_settings(settings: &ThemeSettings) -> Self {
        Self::new(IconConfig::shared(settings))
    }

    pub fn with_icons(mut self, icons: Arc<dyn IconLibrary>) -> Self {
        self.icons = icons;
        self
    }

    pub fn with_translator(mut self, i18n: Arc<dyn Translator>) -> Self {
        self.i18n = i18n;
        self
    }

    pub fn resolver(&self) -> CategoryIconResolver<'_> {
        CategoryIconResolver::new(&self.config.rules)
    }

    pub fn badge_composer(&self) -> BadgeComposer<'_> {
        BadgeComposer::new(&self.config.render, self.icons.as_ref(), self.i18n.as_ref())
    }

    pub fn breadcrumbs(&self) -> BreadcrumbComposer<'_> {
        BreadcrumbComposer::new(self.badge_composer(), self.resolver())
    }
}
