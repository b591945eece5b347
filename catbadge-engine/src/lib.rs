// 核心公共结构体+枚举
pub mod core;
// 核心错误定义
pub mod error;
// 图标规则表解析
pub mod rule_table;
// 分类slug → 图标规则解析
pub mod resolver;
// 规则表 → 分类ID映射（hashtag/侧边栏前缀）
pub mod assign;
// 徽章与父分类面包屑组装
pub mod compose;
// 转义/文字方向/日志预览工具
pub mod utils;

// 顶层导出常用类型
pub use core::{
    BadgeOptions, BadgeRole, BadgeView, Category, CategoryId, IconRule, MatchMode, ResolvedIcon,
    RuleColor, TextDirection, WrapperTag,
};
pub use error::{CoreError, CoreResult};
pub use rule_table::RuleTable;
pub use resolver::CategoryIconResolver;
pub use assign::{CategoryAssignment, hashtag_assignments, section_link_assignments};
pub use compose::{
    BadgeComposer, BreadcrumbComposer, DefaultTranslator, IconLibrary, ParentBreadcrumb,
    RenderContext, SvgIconLibrary, Translator,
};
