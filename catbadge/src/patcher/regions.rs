//! 补丁相关选择器

use once_cell::sync::Lazy;

use crate::dom::Selector;

fn selector(source: &str) -> Selector {
    Selector::parse(source).expect("static selector")
}

/// 需要补齐父分类的子徽章：带装饰标记与父分类ID
pub static PATCH_TARGET: Lazy<Selector> =
    Lazy::new(|| selector(".badge-category.--has-parent[data-parent-category-id]"));

/// 徽章包裹元素
pub static BADGE_WRAPPER: Lazy<Selector> = Lazy::new(|| selector(".badge-category__wrapper"));

/// 已插入的父分类面包屑
pub static PARENT_BREADCRUMB: Lazy<Selector> = Lazy::new(|| selector(".parent-category-badge"));

/// 可能承载搜索结果的容器
pub static SEARCH_REGIONS: Lazy<Selector> = Lazy::new(|| {
    selector(".search-menu, .menu-panel, .results, .search-results, .search-menu-results, .panel-body")
});

/// 搜索容器内的嵌套结果容器
pub static NESTED_SEARCH_REGIONS: Lazy<Selector> =
    Lazy::new(|| selector(".results, .search-results, .panel-body-contents"));

/// 点击后即将出现搜索结果的触发元素
pub static SEARCH_TRIGGERS: Lazy<Selector> = Lazy::new(|| {
    selector(
        ".search-dropdown, .search-button, .search-icon, .header-dropdown-toggle.search-dropdown, [data-element='search-menu-trigger']",
    )
});

/// 首页话题列表的 body 标记
pub static HOMEPAGE_BODY: Lazy<Selector> = Lazy::new(|| selector("body.navigation-topics"));
