//! 分类图标解析器
//! 核心语义（保持与已有主题配置一致）：
//! 1. 取第一条 slug_pattern 为分类slug子串的规则（首命中）
//! 2. 命中规则为 Partial 时接受；否则要求 slug 与 pattern 完全相等
//! 3. 首命中被拒绝时直接返回None，不回退到后续规则

use crate::core::{Category, IconRule, MatchMode, ResolvedIcon};
use crate::rule_table::RuleTable;

/// 首命中规则查找（含二次过滤）
pub fn find_rule<'a>(rules: &'a [IconRule], slug: &str) -> Option<&'a IconRule> {
    if slug.is_empty() {
        return None;
    }

    let candidate = rules.iter().find(|rule| slug.contains(rule.slug_pattern()))?;
    match candidate.match_mode() {
        MatchMode::Partial => Some(candidate),
        MatchMode::Exact if candidate.slug_pattern() == slug => Some(candidate),
        MatchMode::Exact => {
            log::trace!(
                "Rule [{}] matched slug [{}] only as substring, no fallback",
                candidate.slug_pattern(),
                slug
            );
            None
        }
    }
}

/// 绑定规则表的解析器，每次渲染重新计算，不缓存结果
#[derive(Debug, Clone, Copy)]
pub struct CategoryIconResolver<'a> {
    rules: &'a RuleTable,
}

impl<'a> CategoryIconResolver<'a> {
    pub fn new(rules: &'a RuleTable) -> Self {
        Self { rules }
    }

    /// 按slug查找命中规则
    pub fn find(&self, slug: &str) -> Option<&'a IconRule> {
        find_rule(self.rules.rules(), slug)
    }

    /// 解析分类的图标与颜色（颜色继承标记替换为分类自身颜色）
    pub fn resolve(&self, category: &Category) -> Option<ResolvedIcon> {
        let rule = self.find(&category.slug)?;
        Some(ResolvedIcon::new(
            rule.icon(),
            rule.color().resolve_for(category),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(raw: &str) -> RuleTable {
        RuleTable::parse(raw)
    }

    #[test]
    fn test_first_substring_hit_rejected_without_fallback() {
        // "foo" 作为子串首先命中，但它是精确规则且不相等 → 直接返回None
        // 即使后面的 "foo-bar" partial 规则本可满足
        let rules = table("foo,home,,|foo-bar,star,,partial");
        let resolver = CategoryIconResolver::new(&rules);
        assert!(resolver.find("foo-bar").is_none());
        assert!(resolver.resolve(&Category::new(1, "foo-bar", "Foo Bar")).is_none());
    }

    #[test]
    fn test_partial_match() {
        let rules = table("eng,wrench,#ff0000,partial");
        let resolver = CategoryIconResolver::new(&rules);
        let resolved = resolver
            .resolve(&Category::new(1, "engineering-team", "Engineering"))
            .unwrap();
        assert_eq!(resolved, ResolvedIcon::new("wrench", Some("#ff0000".into())));
    }

    #[test]
    fn test_exact_match() {
        let rules = table("support,life-ring,");
        let resolver = CategoryIconResolver::new(&rules);
        assert_eq!(resolver.find("support").map(|r| r.icon()), Some("life-ring"));
        assert!(resolver.find("support-extra").is_none());
    }

    #[test]
    fn test_exact_rule_after_unrelated_rules() {
        let rules = table("news,newspaper|support,life-ring");
        let resolver = CategoryIconResolver::new(&rules);
        assert_eq!(resolver.find("support").map(|r| r.icon()), Some("life-ring"));
    }

    #[test]
    fn test_color_inheritance_sentinel() {
        let rules = table("news,newspaper,categoryColor");
        let resolver = CategoryIconResolver::new(&rules);
        let cat = Category::new(3, "news", "News").with_color("AB12CD");
        let resolved = resolver.resolve(&cat).unwrap();
        assert_eq!(resolved.color.as_deref(), Some("#AB12CD"));
    }

    #[test]
    fn test_empty_slug_and_matching_is_case_sensitive() {
        let rules = table("news,newspaper,,partial");
        let resolver = CategoryIconResolver::new(&rules);
        assert!(resolver.find("").is_none());
        assert!(resolver.find("NEWS").is_none());
    }
}
