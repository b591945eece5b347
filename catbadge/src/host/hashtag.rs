//! 带图标的分类 hashtag 类型
//! 装饰宿主默认实现：映射表命中时输出自定义图标，否则交给默认实现

use std::sync::Arc;

use catbadge_engine::utils::escape_expression;
use catbadge_engine::{
    hashtag_assignments, Category, CategoryId, IconLibrary, ResolvedIcon, RuleTable,
};
use rustc_hash::FxHashMap;

use super::api::{Hashtag, HashtagIconRenderer};

pub struct HashtagIconType {
    dict: FxHashMap<CategoryId, ResolvedIcon>,
    icons: Arc<dyn IconLibrary>,
    fallback: Arc<dyn HashtagIconRenderer>,
}

impl std::fmt::Debug for HashtagIconType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashtagIconType")
            .field("dict", &self.dict)
            .finish_non_exhaustive()
    }
}

impl HashtagIconType {
    pub fn new(
        dict: FxHashMap<CategoryId, ResolvedIcon>,
        icons: Arc<dyn IconLibrary>,
        fallback: Arc<dyn HashtagIconRenderer>,
    ) -> Self {
        Self {
            dict,
            icons,
            fallback,
        }
    }

    /// 由规则表与站点分类构建
    pub fn from_rules(
        rules: &RuleTable,
        categories: &[Category],
        icons: Arc<dyn IconLibrary>,
        fallback: Arc<dyn HashtagIconRenderer>,
    ) -> Self {
        Self::new(hashtag_assignments(rules, categories), icons, fallback)
    }

    pub fn len(&self) -> usize {
        self.dict.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dict.is_empty()
    }
}

impl HashtagIconRenderer for HashtagIconType {
    fn generate_icon_html(&self, hashtag: &Hashtag) -> String {
        let Some(opt) = self.dict.get(&hashtag.id) else {
            return self.fallback.generate_icon_html(hashtag);
        };

        let mut html = String::from("<span class=\"hashtag-category-icon\"");
        if let Some(color) = &opt.color {
            html.push_str(" style=\"color: ");
            html.push_str(&escape_expression(color));
            html.push('"');
        }
        html.push('>');
        html.push_str(&self.icons.icon_html(&opt.icon));
        html.push_str("</span>");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catbadge_engine::SvgIconLibrary;

    struct SquareFallback;

    impl HashtagIconRenderer for SquareFallback {
        fn generate_icon_html(&self, hashtag: &Hashtag) -> String {
            format!("<span class=\"hashtag-category-square\" data-id=\"{}\"></span>", hashtag.id)
        }
    }

    fn hashtag_type() -> HashtagIconType {
        let rules = RuleTable::parse("dev,code|Support,life-ring,#00ff00");
        let site = vec![
            Category::new(1, "dev", "Dev").with_color("0088CC"),
            Category::new(2, "support", "Support"),
            Category::new(3, "general", "General"),
        ];
        HashtagIconType::from_rules(&rules, &site, Arc::new(SvgIconLibrary), Arc::new(SquareFallback))
    }

    fn tag(id: u64) -> Hashtag {
        Hashtag {
            id: CategoryId(id),
            slug: String::new(),
        }
    }

    #[test]
    fn test_mapped_category_gets_icon() {
        let t = hashtag_type();
        assert_eq!(t.len(), 2);
        let html = t.generate_icon_html(&tag(1));
        assert!(html.starts_with("<span class=\"hashtag-category-icon\" style=\"color: #0088CC\">"));
        assert!(html.contains("d-icon-code"));

        // 大小写不敏感匹配
        assert!(t.generate_icon_html(&tag(2)).contains("color: #00ff00"));
    }

    #[test]
    fn test_unmapped_category_falls_back() {
        let html = hashtag_type().generate_icon_html(&tag(3));
        assert_eq!(html, "<span class=\"hashtag-category-square\" data-id=\"3\"></span>");
    }
}
