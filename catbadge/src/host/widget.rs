//! category-icon 小部件：单独的图标元素
//! 只有规则本身配置了颜色时才输出颜色样式

use std::sync::Arc;

use catbadge_engine::utils::escape_expression;
use catbadge_engine::{Category, RuleColor};

use crate::context::ThemeContext;

use super::api::Widget;

pub const WIDGET_NAME: &str = "category-icon";

#[derive(Debug, Clone)]
pub struct CategoryIconWidget {
    ctx: Arc<ThemeContext>,
}

impl CategoryIconWidget {
    pub fn new(ctx: Arc<ThemeContext>) -> Self {
        Self { ctx }
    }
}

impl Widget for CategoryIconWidget {
    fn name(&self) -> &str {
        WIDGET_NAME
    }

    fn html(&self, category: &Category) -> Option<String> {
        let rule = self.ctx.resolver().find(&category.slug)?;
        let color = match rule.color() {
            RuleColor::Unset => None,
            RuleColor::InheritCategory => category.hex_color(),
            RuleColor::Literal(value) => Some(value.clone()),
        };

        let mut html = String::from("<div class=\"category-icon-widget\"><span class=\"category-icon\"");
        if let Some(color) = color {
            html.push_str(" style=\"color: ");
            html.push_str(&escape_expression(&color));
            html.push('"');
        }
        html.push('>');
        if !rule.icon().is_empty() {
            html.push_str(&self.ctx.icons.icon_html(rule.icon()));
        }
        html.push_str("</span></div>");
        Some(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeSettings;

    fn widget(rules: &str) -> CategoryIconWidget {
        CategoryIconWidget::new(Arc::new(ThemeContext::from_settings(
            &ThemeSettings::builder().icon_list(rules).build(),
        )))
    }

    #[test]
    fn test_widget_with_literal_color() {
        let html = widget("eng,wrench,#ff0000,partial")
            .html(&Category::new(1, "engineering-team", "Eng"))
            .unwrap();
        assert!(html.starts_with("<div class=\"category-icon-widget\"><span class=\"category-icon\" style=\"color: #ff0000\">"));
        assert!(html.contains("d-icon-wrench"));
    }

    #[test]
    fn test_widget_inherits_category_color() {
        let html = widget("support,life-ring,categoryColour")
            .html(&Category::new(2, "support", "Support").with_color("AB12CD"))
            .unwrap();
        assert!(html.contains("style=\"color: #AB12CD\""));
    }

    #[test]
    fn test_widget_without_color_or_match() {
        let w = widget("support,life-ring");
        let html = w.html(&Category::new(2, "support", "Support")).unwrap();
        assert!(!html.contains("style="));
        assert!(w.html(&Category::new(3, "general", "General")).is_none());
    }
}
