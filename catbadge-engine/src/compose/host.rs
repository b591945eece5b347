//! 宿主能力接口
//! 图标名 → 标记、本地化文本均由宿主提供，这里只定义窄接口与离线可用的默认实现

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::utils::escape_expression;

/// 图标名 → 图标HTML标记
pub trait IconLibrary: Send + Sync {
    /// 空图标名必须返回空串
    fn icon_html(&self, name: &str) -> String;
}

/// 本地化：`%{var}` 插值，`count` 变量决定单复数形式
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str, vars: &[(&str, &str)]) -> String;
}

/// SVG sprite 引用形式的图标标记
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgIconLibrary;

impl IconLibrary for SvgIconLibrary {
    fn icon_html(&self, name: &str) -> String {
        if name.is_empty() {
            return String::new();
        }
        let id = escape_expression(name);
        format!(
            "<svg class=\"fa d-icon d-icon-{id} svg-icon svg-string\" xmlns=\"http://www.w3.org/2000/svg\"><use href=\"#{id}\"></use></svg>"
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct PluralForms {
    one: String,
    other: String,
}

/// 内置英文文案
#[derive(Debug, Clone)]
pub struct DefaultTranslator {
    entries: FxHashMap<String, PluralForms>,
}

impl Default for DefaultTranslator {
    fn default() -> Self {
        Self::empty()
            .with_entry("category_row.topic_count", "%{count} topic", "%{count} topics")
            .with_entry(
                "category_row.plus_subcategories",
                "+ %{count} subcategory",
                "+ %{count} subcategories",
            )
    }
}

impl DefaultTranslator {
    pub fn empty() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    pub fn with_entry(
        mut self,
        key: impl Into<String>,
        one: impl Into<String>,
        other: impl Into<String>,
    ) -> Self {
        self.entries.insert(
            key.into(),
            PluralForms {
                one: one.into(),
                other: other.into(),
            },
        );
        self
    }
}

impl Translator for DefaultTranslator {
    fn translate(&self, key: &str, vars: &[(&str, &str)]) -> String {
        let Some(forms) = self.entries.get(key) else {
            return format!("[en.{key}]");
        };

        let count = vars.iter().find(|(name, _)| *name == "count").map(|(_, v)| *v);
        let template = if count == Some("1") { &forms.one } else { &forms.other };

        vars.iter().fold(template.clone(), |text, (name, value)| {
            text.replace(&format!("%{{{name}}}"), value)
        })
    }
}

/// 渲染上下文：启动时由主题设置确定，渲染期间不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderContext {
    /// 受限分类锁图标名
    pub lock_icon: String,
    /// 站点是否启用混合文字方向
    pub mixed_text_direction: bool,
    /// 站点子目录前缀（如 `/forum`），无子目录时为空
    pub base_uri: String,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            lock_icon: "lock".to_string(),
            mixed_text_direction: false,
            base_uri: String::new(),
        }
    }
}

impl RenderContext {
    /// 站点内路径加上子目录前缀
    pub fn url_for(&self, path: &str) -> String {
        let base = self.base_uri.trim_end_matches('/');
        let prefixed = path == base
            || path
                .strip_prefix(base)
                .is_some_and(|rest| rest.starts_with('/'));
        if base.is_empty() || prefixed {
            path.to_string()
        } else {
            format!("{base}{path}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_icon_library() {
        assert_eq!(SvgIconLibrary.icon_html(""), "");
        let html = SvgIconLibrary.icon_html("wrench");
        assert!(html.contains("d-icon-wrench"));
        assert!(html.contains(r##"<use href="#wrench">"##));
    }

    #[test]
    fn test_default_translator_plurals() {
        let i18n = DefaultTranslator::default();
        assert_eq!(i18n.translate("category_row.topic_count", &[("count", "1")]), "1 topic");
        assert_eq!(i18n.translate("category_row.topic_count", &[("count", "12")]), "12 topics");
        assert_eq!(
            i18n.translate("category_row.plus_subcategories", &[("count", "3")]),
            "+ 3 subcategories"
        );
        assert_eq!(i18n.translate("missing.key", &[]), "[en.missing.key]");
    }

    #[test]
    fn test_url_for_base_uri() {
        let ctx = RenderContext::default();
        assert_eq!(ctx.url_for("/c/news/3"), "/c/news/3");

        let ctx = RenderContext {
            base_uri: "/forum/".into(),
            ..RenderContext::default()
        };
        assert_eq!(ctx.url_for("/c/news/3"), "/forum/c/news/3");
        assert_eq!(ctx.url_for("/forum/c/news/3"), "/forum/c/news/3");
        assert_eq!(ctx.url_for("/forum"), "/forum");
        assert_eq!(ctx.url_for("/forumx/c/news/3"), "/forum/forumx/c/news/3");
    }

    #[test]
    fn test_url_for_base_only_matches_whole_segment() {
        let ctx = RenderContext {
            base_uri: "/c".into(),
            ..RenderContext::default()
        };
        assert_eq!(ctx.url_for("/c/news/3"), "/c/c/news/3");
        assert_eq!(ctx.url_for("/category/3"), "/c/category/3");
    }
}
