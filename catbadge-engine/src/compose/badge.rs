//! 单个分类徽章组装
//! 核心职责：
//! 1. Category + ResolvedIcon + BadgeOptions → BadgeView（纯函数，不触碰全局状态）
//! 2. BadgeView → HTML 标记

use crate::core::{
    BadgeOptions, BadgeRole, BadgeView, Category, ResolvedIcon, TextDirection, WrapperTag,
};
use crate::utils::{escape_expression, is_rtl};

use super::host::{IconLibrary, RenderContext, Translator};

const TOPIC_COUNT_KEY: &str = "category_row.topic_count";
const PLUS_SUBCATEGORIES_KEY: &str = "category_row.plus_subcategories";

/// 徽章组装器：持有渲染上下文与宿主能力的借用，按需构造，开销可忽略
#[derive(Clone, Copy)]
pub struct BadgeComposer<'a> {
    ctx: &'a RenderContext,
    icons: &'a dyn IconLibrary,
    i18n: &'a dyn Translator,
}

impl std::fmt::Debug for BadgeComposer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BadgeComposer").field("ctx", self.ctx).finish_non_exhaustive()
    }
}

impl<'a> BadgeComposer<'a> {
    pub fn new(ctx: &'a RenderContext, icons: &'a dyn IconLibrary, i18n: &'a dyn Translator) -> Self {
        Self { ctx, icons, i18n }
    }

    pub fn context(&self) -> &'a RenderContext {
        self.ctx
    }

    /// 组装独立徽章
    pub fn compose(
        &self,
        category: &Category,
        resolved: Option<&ResolvedIcon>,
        options: &BadgeOptions,
    ) -> BadgeView {
        let href = match &options.url {
            Some(url) => url.clone(),
            None => self.ctx.url_for(&category.path()),
        };

        let topic_count = options.topic_count.filter(|count| *count > 0);
        let plus_subcategories = if options.last_subcategory {
            options.plus_subcategories.filter(|count| *count > 0)
        } else {
            None
        };

        BadgeView {
            category_id: category.id,
            name: category.name.clone(),
            description: category.description.clone().filter(|d| !d.is_empty()),
            direction: self.direction_for(&category.name),
            icon_markup: resolved.map(|icon| self.icons.icon_html(&icon.icon)),
            color_style: resolved.and_then(|icon| icon.color.clone()),
            preview_style: self.preview_style(category, options),
            restricted: category.read_restricted,
            lock_markup: category
                .read_restricted
                .then(|| self.icons.icon_html(&self.ctx.lock_icon)),
            topic_count,
            href: Some(href),
            tag: options.wrapper_tag(),
            extra_classes: options.extra_class_list(),
            has_parent_flag: false,
            role: BadgeRole::Standalone,
            wrapper_style: None,
            plus_subcategories,
        }
    }

    /// 组装父分类面包屑：使用父分类自身链接，不带话题数与子分类尾注
    pub fn compose_parent(
        &self,
        parent: &Category,
        resolved: Option<&ResolvedIcon>,
        options: &BadgeOptions,
    ) -> BadgeView {
        let parent_options = BadgeOptions {
            url: None,
            topic_count: None,
            plus_subcategories: None,
            last_subcategory: false,
            ..options.clone()
        };
        let mut view = self.compose(parent, resolved, &parent_options);
        view.role = BadgeRole::ParentBreadcrumb;
        view.wrapper_style = category_variables(parent);
        view
    }

    /// BadgeView → HTML
    pub fn render(&self, view: &BadgeView) -> String {
        let tag = view.tag.as_str();
        let mut html = String::with_capacity(512);

        // ========== 外层包裹 ==========
        html.push('<');
        html.push_str(tag);
        push_attr(&mut html, "class", &view.wrapper_classes().join(" "));
        if let Some(style) = &view.wrapper_style {
            push_attr(&mut html, "style", style);
        }
        if view.tag == WrapperTag::Link {
            if let Some(href) = &view.href {
                push_attr(&mut html, "href", href);
            }
        }
        html.push('>');

        // ========== 徽章主体 ==========
        html.push_str("<span");
        push_attr(&mut html, "data-category-id", &view.category_id.to_string());
        push_attr(&mut html, "data-drop-close", "true");
        push_attr(&mut html, "class", &view.badge_classes().join(" "));
        if let Some(style) = &view.preview_style {
            push_attr(&mut html, "style", style);
        }
        if let Some(description) = &view.description {
            push_attr(&mut html, "title", description);
        }
        html.push('>');

        if let Some(icon) = &view.icon_markup {
            html.push_str("<span class=\"badge-category__icon\"");
            if let Some(color) = &view.color_style {
                push_attr(&mut html, "style", &format!("color: {color}"));
            }
            html.push('>');
            html.push_str(icon);
            html.push_str("</span>");
        }

        if let Some(lock) = &view.lock_markup {
            html.push_str(lock);
        }

        html.push_str("<span class=\"badge-category__name\"");
        if let Some(dir) = view.direction {
            push_attr(&mut html, "dir", dir.as_str());
        }
        html.push('>');
        html.push_str(&escape_expression(&view.name));
        html.push_str("</span></span>");

        if let Some(count) = view.topic_count {
            let count = count.to_string();
            let label = self.i18n.translate(TOPIC_COUNT_KEY, &[("count", &count)]);
            html.push_str("<span class=\"topic-count\"");
            push_attr(&mut html, "aria-label", &label);
            html.push_str(">&times; ");
            html.push_str(&count);
            html.push_str("</span>");
        }

        html.push_str("</");
        html.push_str(tag);
        html.push('>');

        // ========== 包裹之后的子分类尾注 ==========
        if let Some(count) = view.plus_subcategories {
            let count = count.to_string();
            let label = self.i18n.translate(PLUS_SUBCATEGORIES_KEY, &[("count", &count)]);
            html.push_str("<span class=\"plus-subcategories\">");
            html.push_str(&escape_expression(&label));
            html.push_str("</span>");
        }

        html
    }

    fn direction_for(&self, name: &str) -> Option<TextDirection> {
        (self.ctx.mixed_text_direction && is_rtl(name)).then_some(TextDirection::Rtl)
    }

    fn preview_style(&self, category: &Category, options: &BadgeOptions) -> Option<String> {
        if options.preview_color && !category.color.is_empty() {
            Some(format!("--category-badge-color: #{}", category.color))
        } else {
            None
        }
    }
}

/// 分类CSS变量（父分类面包屑包裹元素使用）
fn category_variables(category: &Category) -> Option<String> {
    let mut vars = Vec::with_capacity(2);
    if !category.color.is_empty() {
        vars.push(format!("--category-badge-color: #{};", category.color));
    }
    if !category.text_color.is_empty() {
        vars.push(format!("--category-badge-text-color: #{};", category.text_color));
    }
    if vars.is_empty() {
        None
    } else {
        Some(vars.join(" "))
    }
}

fn push_attr(html: &mut String, name: &str, value: &str) {
    html.push(' ');
    html.push_str(name);
    html.push_str("=\"");
    html.push_str(&escape_expression(value));
    html.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::host::{DefaultTranslator, SvgIconLibrary};

    fn render_with(ctx: &RenderContext, category: &Category, resolved: Option<&ResolvedIcon>, options: &BadgeOptions) -> (BadgeView, String) {
        let i18n = DefaultTranslator::default();
        let composer = BadgeComposer::new(ctx, &SvgIconLibrary, &i18n);
        let view = composer.compose(category, resolved, options);
        let html = composer.render(&view);
        (view, html)
    }

    #[test]
    fn test_basic_link_badge() {
        let ctx = RenderContext::default();
        let cat = Category::new(3, "news", "News & Views").with_description("Latest \"news\"");
        let (view, html) = render_with(&ctx, &cat, None, &BadgeOptions::default());

        assert_eq!(view.tag, WrapperTag::Link);
        assert_eq!(view.href.as_deref(), Some("/c/news/3"));
        assert_eq!(
            html,
            "<a class=\"badge-category__wrapper\" href=\"/c/news/3\">\
             <span data-category-id=\"3\" data-drop-close=\"true\" class=\"badge-category\" title=\"Latest &quot;news&quot;\">\
             <span class=\"badge-category__name\">News &amp; Views</span></span></a>"
        );
    }

    #[test]
    fn test_span_badge_has_no_href() {
        let ctx = RenderContext::default();
        let cat = Category::new(3, "news", "News");
        let (_, html) = render_with(&ctx, &cat, None, &BadgeOptions::span());
        assert!(html.starts_with("<span class=\"badge-category__wrapper\">"));
        assert!(!html.contains("href"));
        assert!(html.ends_with("</span>"));
    }

    #[test]
    fn test_url_override_and_extra_classes() {
        let ctx = RenderContext::default();
        let cat = Category::new(3, "news", "News");
        let options = BadgeOptions {
            url: Some("/custom".into()),
            extra_classes: Some("big".into()),
            ..BadgeOptions::default()
        };
        let (_, html) = render_with(&ctx, &cat, None, &options);
        assert!(html.starts_with("<a class=\"badge-category__wrapper big\" href=\"/custom\">"));
    }

    #[test]
    fn test_restricted_category_lock_before_name() {
        let ctx = RenderContext {
            lock_icon: "key".into(),
            ..RenderContext::default()
        };
        let cat = Category::new(9, "staff", "Staff").restricted();
        let (view, html) = render_with(&ctx, &cat, None, &BadgeOptions::default());

        assert!(view.badge_classes().contains(&"restricted"));
        let lock_at = html.find("d-icon-key").unwrap();
        let name_at = html.find("badge-category__name").unwrap();
        assert!(lock_at < name_at);
    }

    #[test]
    fn test_restricted_lock_with_matched_icon() {
        let ctx = RenderContext::default();
        let cat = Category::new(9, "staff", "Staff").restricted();
        let resolved = ResolvedIcon::new("shield", None);
        let (view, html) = render_with(&ctx, &cat, Some(&resolved), &BadgeOptions::default());

        assert_eq!(view.badge_classes(), vec!["badge-category", "--has-icon", "restricted"]);
        let icon_at = html.find("d-icon-shield").unwrap();
        let lock_at = html.find("d-icon-lock").unwrap();
        let name_at = html.find("badge-category__name").unwrap();
        assert!(icon_at < lock_at);
        assert!(lock_at < name_at);
    }

    #[test]
    fn test_preview_color_style() {
        let ctx = RenderContext::default();
        let options = BadgeOptions {
            preview_color: true,
            ..BadgeOptions::default()
        };

        let colored = Category::new(9, "staff", "Staff").with_color("AB12CD");
        let (view, html) = render_with(&ctx, &colored, None, &options);
        assert_eq!(view.preview_style.as_deref(), Some("--category-badge-color: #AB12CD"));
        assert!(html.contains("class=\"badge-category\" style=\"--category-badge-color: #AB12CD\">"));

        // 分类无颜色时不输出样式
        let plain = Category::new(10, "misc", "Misc");
        let (view, html) = render_with(&ctx, &plain, None, &options);
        assert_eq!(view.preview_style, None);
        assert!(!html.contains("style="));

        // 未开启选项时不输出样式
        let (_, html) = render_with(&ctx, &colored, None, &BadgeOptions::default());
        assert!(!html.contains("--category-badge-color"));
    }

    #[test]
    fn test_icon_and_color() {
        let ctx = RenderContext::default();
        let cat = Category::new(4, "engineering", "Engineering");
        let resolved = ResolvedIcon::new("wrench", Some("#ff0000".into()));
        let (_, html) = render_with(&ctx, &cat, Some(&resolved), &BadgeOptions::default());
        assert!(html.contains("class=\"badge-category --has-icon\""));
        assert!(html.contains("<span class=\"badge-category__icon\" style=\"color: #ff0000\"><svg"));
    }

    #[test]
    fn test_empty_icon_keeps_color_span() {
        let ctx = RenderContext::default();
        let cat = Category::new(4, "news", "News");
        let resolved = ResolvedIcon::new("", Some("#00ff00".into()));
        let (_, html) = render_with(&ctx, &cat, Some(&resolved), &BadgeOptions::default());
        assert!(html.contains("<span class=\"badge-category__icon\" style=\"color: #00ff00\"></span>"));
        assert!(!html.contains("<svg"));
    }

    #[test]
    fn test_topic_count_and_plus_subcategories() {
        let ctx = RenderContext::default();
        let cat = Category::new(4, "news", "News");
        let options = BadgeOptions {
            topic_count: Some(12),
            plus_subcategories: Some(2),
            last_subcategory: true,
            ..BadgeOptions::default()
        };
        let (_, html) = render_with(&ctx, &cat, None, &options);
        assert!(html.contains("<span class=\"topic-count\" aria-label=\"12 topics\">&times; 12</span></a>"));
        assert!(html.ends_with("</a><span class=\"plus-subcategories\">+ 2 subcategories</span>"));

        // 非最后一个子分类时不输出尾注
        let options = BadgeOptions {
            plus_subcategories: Some(2),
            ..BadgeOptions::default()
        };
        let (_, html) = render_with(&ctx, &cat, None, &options);
        assert!(!html.contains("plus-subcategories"));
    }

    #[test]
    fn test_rtl_only_when_enabled() {
        let cat = Category::new(5, "arabic", "مرحبا");
        let (view, _) = render_with(&RenderContext::default(), &cat, None, &BadgeOptions::default());
        assert_eq!(view.direction, None);

        let ctx = RenderContext {
            mixed_text_direction: true,
            ..RenderContext::default()
        };
        let (view, html) = render_with(&ctx, &cat, None, &BadgeOptions::default());
        assert_eq!(view.direction, Some(TextDirection::Rtl));
        assert!(html.contains("dir=\"rtl\""));

        let latin = Category::new(6, "latin", "Latin");
        let (view, _) = render_with(&ctx, &latin, None, &BadgeOptions::default());
        assert_eq!(view.direction, None);
    }

    #[test]
    fn test_parent_breadcrumb_view() {
        let ctx = RenderContext {
            base_uri: "/forum".into(),
            ..RenderContext::default()
        };
        let i18n = DefaultTranslator::default();
        let composer = BadgeComposer::new(&ctx, &SvgIconLibrary, &i18n);
        let parent = Category::new(1, "dev", "Dev").with_color("0088CC").with_text_color("FFFFFF");
        let options = BadgeOptions {
            url: Some("/child-only".into()),
            topic_count: Some(4),
            ..BadgeOptions::default()
        };
        let view = composer.compose_parent(&parent, None, &options);
        let html = composer.render(&view);

        assert_eq!(view.href.as_deref(), Some("/forum/c/dev/1"));
        assert_eq!(view.topic_count, None);
        assert!(html.starts_with(
            "<a class=\"badge-category__wrapper parent-category-badge\" \
             style=\"--category-badge-color: #0088CC; --category-badge-text-color: #FFFFFF;\" href=\"/forum/c/dev/1\">"
        ));
    }
}
