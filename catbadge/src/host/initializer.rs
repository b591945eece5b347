//! 主题初始化：一次性装配所有扩展点
//! 核心职责：
//! 1. 由设置构建不可变上下文（规则表/锁图标/渲染开关）
//! 2. 替换徽章渲染器、注册图标小部件
//! 3. 宿主提供时注册侧边栏锁图标/前缀与 hashtag 类型（缺失即跳过）
//! 4. 页面切换回调只向调和器提交触发，扫描统一走 InstalledTheme::reconcile

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use catbadge_engine::section_link_assignments;

use crate::catalogue::CategoryCatalogue;
use crate::config::ThemeSettings;
use crate::context::ThemeContext;
use crate::dom::Document;
use crate::patcher::{IdempotentPatcher, PageChange, Reconciler, Trigger};

use super::api::PluginApi;
use super::hashtag::HashtagIconType;
use super::renderer::CategoryIconsRenderer;
use super::widget::CategoryIconWidget;

const HASHTAG_TYPE: &str = "category";

/// 已安装主题的运行句柄
pub struct InstalledTheme {
    pub context: Arc<ThemeContext>,
    catalogue: Arc<dyn CategoryCatalogue>,
    reconciler: Arc<Mutex<Reconciler>>,
    /// 注册的侧边栏前缀数量（宿主不支持时为 None）
    pub section_prefixes: Option<usize>,
    /// hashtag 映射条目数（宿主不支持时为 None）
    pub hashtag_entries: Option<usize>,
}

impl std::fmt::Debug for InstalledTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstalledTheme")
            .field("context", &self.context)
            .field("section_prefixes", &self.section_prefixes)
            .field("hashtag_entries", &self.hashtag_entries)
            .finish_non_exhaustive()
    }
}

fn lock(reconciler: &Mutex<Reconciler>) -> MutexGuard<'_, Reconciler> {
    reconciler.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InstalledTheme {
    pub fn catalogue(&self) -> &dyn CategoryCatalogue {
        self.catalogue.as_ref()
    }

    pub fn reconciler(&self) -> Arc<Mutex<Reconciler>> {
        self.reconciler.clone()
    }

    /// 提交一次调和触发
    pub fn request(&self, trigger: Trigger) {
        lock(&self.reconciler).request(trigger, Instant::now());
    }

    /// 执行到期的调和扫描
    pub fn reconcile(&self, doc: &mut Document, now: Instant) -> Option<usize> {
        let patcher = IdempotentPatcher::new(&self.context, self.catalogue.as_ref());
        lock(&self.reconciler).run_due(doc, now, &patcher)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryIconsInitializer;

impl CategoryIconsInitializer {
    pub fn initialize(api: &mut dyn PluginApi, settings: &ThemeSettings) -> InstalledTheme {
        let context = Arc::new(ThemeContext::from_settings(settings));
        let catalogue = api.catalogue();
        let router = api.router();
        let lock_icon = settings.lock_icon();

        api.override_lock_icon(lock_icon);

        // ========== 渲染器与小部件 ==========
        api.replace_category_link_renderer(Arc::new(CategoryIconsRenderer::new(
            context.clone(),
            catalogue.clone(),
            router,
        )));
        api.create_widget(Arc::new(CategoryIconWidget::new(context.clone())));

        // ========== 可选扩展点 ==========
        let section_prefixes = api.sidebar().map(|sidebar| {
            sidebar.register_lock_icon(lock_icon);
            let assignments = section_link_assignments(&context.config.rules, catalogue.categories());
            let count = assignments.len();
            for assignment in assignments {
                sidebar.register_prefix(assignment.into());
            }
            count
        });

        let hashtag_entries = api.hashtags().map(|registry| {
            let hashtag_type = HashtagIconType::from_rules(
                &context.config.rules,
                catalogue.categories(),
                context.icons.clone(),
                registry.default_category_type(),
            );
            let entries = hashtag_type.len();
            registry.register_hashtag_type(HASHTAG_TYPE, Arc::new(hashtag_type));
            entries
        });

        // ========== 调和触发 ==========
        let reconciler = Arc::new(Mutex::new(Reconciler::new()));
        let on_navigation = reconciler.clone();
        api.on_page_change(Box::new(move |page: &PageChange<'_>| {
            lock(&on_navigation).request(Trigger::page_change(page), Instant::now());
        }));

        log::info!(
            "Category icons initialized: {} rules, sidebar prefixes {:?}, hashtag entries {:?}",
            context.config.rules.len(),
            section_prefixes,
            hashtag_entries
        );

        InstalledTheme {
            context,
            catalogue,
            reconciler,
            section_prefixes,
            hashtag_entries,
        }
    }
}
