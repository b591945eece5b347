//! 图标规则模型
//! 单条规则来源于配置串中的一个逗号分隔段：`slug,icon,color,match`

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use super::category::Category;
use crate::error::{CoreError, CoreResult};

/// "继承分类自身颜色" 标记（兼容 categoryColor / categoryColour 等旧写法）
static INHERIT_COLOR_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"categoryColo(u*)r").expect("static regex"));

/// 匹配模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// slug 必须与规则完全相等
    #[default]
    Exact,
    /// slug 包含规则即可
    Partial,
}

impl MatchMode {
    /// 宽松解析：仅字面量 `partial` 视为部分匹配，其余一律按精确匹配处理
    pub fn from_field(field: Option<&str>) -> Self {
        match field {
            Some("partial") => MatchMode::Partial,
            _ => MatchMode::Exact,
        }
    }
}

impl Display for MatchMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMode::Exact => write!(f, "exact"),
            MatchMode::Partial => write!(f, "partial"),
        }
    }
}

/// 严格解析：用于配置诊断
impl FromStr for MatchMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "partial" => Ok(MatchMode::Partial),
            "" | "exact" => Ok(MatchMode::Exact),
            other => Err(CoreError::UnknownMatchMode(other.to_string())),
        }
    }
}

/// 规则颜色
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RuleColor {
    /// 未配置
    Unset,
    /// 使用分类自身颜色
    InheritCategory,
    /// 配置的字面颜色值（原样输出到 style）
    Literal(String),
}

impl RuleColor {
    pub fn from_field(field: Option<&str>) -> Self {
        match field {
            None | Some("") => RuleColor::Unset,
            Some(value) if INHERIT_COLOR_MARKER.is_match(value) => RuleColor::InheritCategory,
            Some(value) => RuleColor::Literal(value.to_string()),
        }
    }

    /// 对指定分类求出最终颜色：未配置/继承标记 → `#分类颜色`
    pub fn resolve_for(&self, category: &Category) -> Option<String> {
        match self {
            RuleColor::Literal(value) => Some(value.clone()),
            RuleColor::Unset | RuleColor::InheritCategory => category.hex_color(),
        }
    }
}

/// 单条图标规则
/// 不变量：slug_pattern 非空；只能经由 from_segment 构造
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconRule {
    slug_pattern: String,
    icon: String,
    color: RuleColor,
    match_mode: MatchMode,
}

impl IconRule {
    /// 解析单个配置段
    /// 段内最多取前4个字段，多余字段忽略；图标字段可为空（表示"无图标"）
    pub fn from_segment(segment: &str) -> CoreResult<Self> {
        if !segment.contains(',') {
            return Err(CoreError::MissingSeparator(segment.to_string()));
        }

        let mut fields = segment.split(',');
        let slug_pattern = fields.next().unwrap_or_default();
        if slug_pattern.is_empty() {
            return Err(CoreError::EmptySlugPattern(segment.to_string()));
        }
        let icon = fields.next().unwrap_or_default();
        let color = RuleColor::from_field(fields.next());
        let match_mode = MatchMode::from_field(fields.next());

        Ok(Self {
            slug_pattern: slug_pattern.to_string(),
            icon: icon.to_string(),
            color,
            match_mode,
        })
    }

    pub fn slug_pattern(&self) -> &str {
        &self.slug_pattern
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn color(&self) -> &RuleColor {
        &self.color
    }

    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    /// 大小写不敏感的满足判定（hashtag/侧边栏前缀使用，与渲染器的首命中策略不同）
    pub fn accepts_ignore_case(&self, slug: &str) -> bool {
        let slug = slug.to_lowercase();
        let pattern = self.slug_pattern.to_lowercase();
        match self.match_mode {
            MatchMode::Partial => slug.contains(&pattern),
            MatchMode::Exact => slug == pattern,
        }
    }
}

/// 解析结果：图标名 + 最终颜色
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedIcon {
    pub icon: String,
    pub color: Option<String>,
}

impl ResolvedIcon {
    pub fn new(icon: impl Into<String>, color: Option<String>) -> Self {
        Self {
            icon: icon.into(),
            color,
        }
    }

    pub fn has_icon(&self) -> bool {
        !self.icon.is_empty()
    }
}
