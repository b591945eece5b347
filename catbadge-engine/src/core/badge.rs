//! 徽章渲染模型
//! BadgeOptions：宿主传入的渲染选项
//! BadgeView：单个分类徽章的语义表示，按次创建、立即序列化，不做缓存

use serde::{Deserialize, Deserializer, Serialize};

use super::category::CategoryId;

/// 徽章包裹元素类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WrapperTag {
    /// `<a>` 可点击链接
    Link,
    /// `<span>` 非交互元素
    Span,
}

impl WrapperTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            WrapperTag::Link => "a",
            WrapperTag::Span => "span",
        }
    }
}

/// 分类名文字方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

/// 徽章在输出中的角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BadgeRole {
    /// 独立徽章（无可见父分类）
    Standalone,
    /// 父分类面包屑
    ParentBreadcrumb,
    /// 紧随父分类面包屑之后的子分类徽章
    Child,
}

/// 宿主渲染选项
/// `link` 兼容宿主传入的布尔值或字符串 "false"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BadgeOptions {
    /// 覆盖默认分类链接
    pub url: Option<String>,
    #[serde(deserialize_with = "deserialize_link_flag")]
    pub link: bool,
    /// 追加到包裹元素上的额外class（空格分隔）
    pub extra_classes: Option<String>,
    pub hide_parent: bool,
    pub topic_count: Option<u64>,
    pub preview_color: bool,
    pub plus_subcategories: Option<u64>,
    pub last_subcategory: bool,
}

impl Default for BadgeOptions {
    fn default() -> Self {
        Self {
            url: None,
            link: true,
            extra_classes: None,
            hide_parent: false,
            topic_count: None,
            preview_color: false,
            plus_subcategories: None,
            last_subcategory: false,
        }
    }
}

impl BadgeOptions {
    pub fn span() -> Self {
        Self {
            link: false,
            ..Self::default()
        }
    }

    pub fn wrapper_tag(&self) -> WrapperTag {
        if self.link {
            WrapperTag::Link
        } else {
            WrapperTag::Span
        }
    }

    /// 额外class拆分去重（保持原顺序）
    pub fn extra_class_list(&self) -> Vec<String> {
        let mut classes: Vec<String> = Vec::new();
        if let Some(raw) = &self.extra_classes {
            for class in raw.split_whitespace() {
                if !classes.iter().any(|c| c == class) {
                    classes.push(class.to_string());
                }
            }
        }
        classes
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LinkFlag {
    Bool(bool),
    Text(String),
}

fn deserialize_link_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match LinkFlag::deserialize(deserializer)? {
        LinkFlag::Bool(flag) => flag,
        LinkFlag::Text(text) => text != "false",
    })
}

/// 单个分类徽章的渲染模型
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeView {
    pub category_id: CategoryId,
    /// 原始分类名（序列化时转义）
    pub name: String,
    pub description: Option<String>,
    /// 仅在启用混合文字方向且名称为RTL时为 Some(Rtl)
    pub direction: Option<TextDirection>,
    /// 图标内部标记；Some("") 表示规则命中但未配置图标名
    pub icon_markup: Option<String>,
    /// 图标颜色，输出为 `style="color: …"`
    pub color_style: Option<String>,
    /// previewColor 选项产生的徽章颜色变量
    pub preview_style: Option<String>,
    pub restricted: bool,
    pub lock_markup: Option<String>,
    pub topic_count: Option<u64>,
    pub href: Option<String>,
    pub tag: WrapperTag,
    pub extra_classes: Vec<String>,
    /// "存在父分类但未显示" 装饰标记
    pub has_parent_flag: bool,
    pub role: BadgeRole,
    /// 包裹元素上的分类CSS变量（仅父分类面包屑）
    pub wrapper_style: Option<String>,
    pub plus_subcategories: Option<u64>,
}

impl BadgeView {
    /// 内层 `.badge-category` 的class列表
    pub fn badge_classes(&self) -> Vec<&'static str> {
        let mut classes = vec!["badge-category"];
        if self.icon_markup.is_some() {
            classes.push("--has-icon");
        }
        if self.restricted {
            classes.push("restricted");
        }
        if self.role == BadgeRole::Child {
            classes.push("child-category");
        }
        if self.has_parent_flag {
            classes.push("--has-parent");
        }
        classes
    }

    /// 外层包裹元素的class列表
    pub fn wrapper_classes(&self) -> Vec<&str> {
        let mut classes = vec!["badge-category__wrapper"];
        if self.role == BadgeRole::ParentBreadcrumb {
            classes.push("parent-category-badge");
        }
        for class in &self.extra_classes {
            if !classes.contains(&class.as_str()) {
                classes.push(class.as_str());
            }
        }
        classes
    }
}
