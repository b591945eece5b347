//! catbadge - 分类图标徽章、父分类面包屑与搜索结果幂等补丁

pub mod catalogue;
pub mod config;
pub mod context;
pub mod dom;
pub mod error;
pub mod host;
pub mod patcher;

// 命令行日志初始化 - 仅在开启cli特性时编译
#[cfg(feature = "cli")]
pub mod logging;

// 导出全局错误类型
pub use self::error::{BadgeError, BadgeResult};

// 导出配置与运行上下文
pub use crate::config::{IconConfig, SettingsBuilder, ThemeSettings};
pub use crate::context::ThemeContext;

// 导出分类目录
pub use crate::catalogue::{CategoryCatalogue, SiteCatalogue};

// 导出文档模型
pub use crate::dom::{Document, NodeId, Selector};

// 导出补丁与调和
pub use crate::patcher::{
    IdempotentPatcher, PageChange, Reconciler, RescanSchedule, RetryBudget, Trigger,
};
#[cfg(feature = "async-io")]
pub use crate::patcher::{DriverStats, ReconcileDriver};

// 导出宿主适配
pub use crate::host::{
    CategoryIconWidget, CategoryIconsInitializer, CategoryIconsRenderer, HashtagIconType,
    InstalledTheme, PluginApi,
};

// 重新导出内核
pub use catbadge_engine;
pub use catbadge_engine::{BadgeOptions, Category, CategoryId, RuleTable};
