//! 规则表 → 分类ID映射
//! 与渲染器的首命中策略不同：这里逐条规则遍历全部分类，大小写不敏感地判定满足
//! 仅 slug 与图标名都非空的规则参与映射

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{Category, CategoryId, IconRule, ResolvedIcon, RuleColor};
use crate::rule_table::RuleTable;

/// 单个分类的图标分配（侧边栏前缀注册使用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAssignment {
    pub category_id: CategoryId,
    pub icon: String,
    /// 原样颜色；继承标记替换为分类颜色（不带 `#`，宿主前缀接口自行处理）
    pub color: Option<String>,
}

fn assignable(rule: &IconRule) -> bool {
    !rule.slug_pattern().is_empty() && !rule.icon().is_empty()
}

/// hashtag 图标映射：后出现的规则覆盖先出现的
/// 未配置颜色或继承标记 → `#分类颜色`
pub fn hashtag_assignments(
    rules: &RuleTable,
    categories: &[Category],
) -> FxHashMap<CategoryId, ResolvedIcon> {
    let mut dict = FxHashMap::default();
    for rule in rules.iter().filter(|r| assignable(r)) {
        for category in categories.iter().filter(|c| rule.accepts_ignore_case(&c.slug)) {
            let color = match rule.color() {
                RuleColor::Literal(value) => Some(value.clone()),
                RuleColor::Unset | RuleColor::InheritCategory => {
                    Some(format!("#{}", category.color))
                }
            };
            dict.insert(category.id, ResolvedIcon::new(rule.icon(), color));
        }
    }
    log::debug!("Built hashtag icon dictionary with {} entries", dict.len());
    dict
}

/// 侧边栏前缀分配：每条规则只取第一个满足的分类
pub fn section_link_assignments(
    rules: &RuleTable,
    categories: &[Category],
) -> Vec<CategoryAssignment> {
    rules
        .iter()
        .filter(|r| assignable(r))
        .filter_map(|rule| {
            let category = categories
                .iter()
                .find(|c| rule.accepts_ignore_case(&c.slug))?;
            let color = match rule.color() {
                RuleColor::Unset => None,
                RuleColor::InheritCategory => Some(category.color.clone()),
                RuleColor::Literal(value) => Some(value.clone()),
            };
            Some(CategoryAssignment {
                category_id: category.id,
                icon: rule.icon().to_string(),
                color,
            })
        })
        .collect()
}
