//! 图标规则表
//! 输入：`|` 分隔的规则段，每段为 `slug,icon,color,match`
//! 解析失败的段静默丢弃，配置错误绝不阻断页面渲染

use serde::{Deserialize, Serialize};

use crate::core::{IconRule, MatchMode};
use crate::error::CoreError;
use crate::utils::log_format::preview_segment;

/// 有序规则表（首命中语义，顺序即优先级）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    rules: Vec<IconRule>,
}

impl RuleTable {
    /// 解析配置串，畸形段丢弃（debug日志），空输入得到空表
    pub fn parse(raw: &str) -> Self {
        let mut rules = Vec::new();
        for segment in raw.split('|') {
            match IconRule::from_segment(segment) {
                Ok(rule) => rules.push(rule),
                Err(e) => {
                    if !segment.is_empty() {
                        log::debug!(
                            "Dropping icon rule segment [{}]: {}",
                            preview_segment(segment),
                            e
                        );
                    }
                }
            }
        }
        Self { rules }
    }

    /// 配置诊断：列出被丢弃的段与无法识别的匹配模式，不影响解析结果
    pub fn lint(raw: &str) -> Vec<CoreError> {
        let mut problems = Vec::new();
        for segment in raw.split('|').filter(|s| !s.is_empty()) {
            match IconRule::from_segment(segment) {
                Ok(_) => {
                    if let Some(mode) = segment.split(',').nth(3) {
                        if let Err(e) = mode.parse::<MatchMode>() {
                            problems.push(e);
                        }
                    }
                }
                Err(e) => problems.push(e),
            }
        }
        problems
    }

    pub fn from_rules(rules: Vec<IconRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[IconRule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IconRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = &'a IconRule;
    type IntoIter = std::slice::Iter<'a, IconRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RuleColor;

    #[test]
    fn test_parse_preserves_order() {
        let table = RuleTable::parse("foo,home,,|foo-bar,star,,partial|support,life-ring");
        let slugs: Vec<&str> = table.iter().map(|r| r.slug_pattern()).collect();
        assert_eq!(slugs, vec!["foo", "foo-bar", "support"]);
        assert_eq!(table.rules()[1].match_mode(), MatchMode::Partial);
    }

    #[test]
    fn test_parse_drops_malformed_segments() {
        let table = RuleTable::parse("garbage|,no-slug|ok,check,#fff|||tail");
        assert_eq!(table.len(), 1);
        assert_eq!(table.rules()[0].slug_pattern(), "ok");
        assert_eq!(table.rules()[0].color(), &RuleColor::Literal("#fff".into()));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(RuleTable::parse("").is_empty());
        assert!(RuleTable::parse("|||").is_empty());
    }

    #[test]
    fn test_empty_icon_kept_as_no_icon_rule() {
        let table = RuleTable::parse("news,,#00ff00");
        assert_eq!(table.len(), 1);
        assert_eq!(table.rules()[0].icon(), "");
    }

    #[test]
    fn test_lint_reports_problems() {
        let problems = RuleTable::lint("ok,check|broken|x,y,,fuzzy");
        assert_eq!(
            problems,
            vec![
                CoreError::MissingSeparator("broken".into()),
                CoreError::UnknownMatchMode("fuzzy".into()),
            ]
        );
    }
}
