//! 简单选择器子集
//! 支持：标签名、`.class`、`[attr]`、`[attr=value]`（值可带单/双引号）、复合选择器、逗号分组
//! 不支持组合符（后代/子代等），嵌套查找通过在容器上再次 query_all 完成

use crate::error::{BadgeError, BadgeResult};

use super::document::ElementData;

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrCondition {
    name: String,
    value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
    tag: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrCondition>,
}

impl Compound {
    fn matches(&self, el: &ElementData) -> bool {
        if let Some(tag) = &self.tag {
            if !el.name.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        self.classes.iter().all(|c| el.has_class(c))
            && self.attrs.iter().all(|cond| match (el.attr(&cond.name), &cond.value) {
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => actual == expected,
                (None, _) => false,
            })
    }
}

/// 选择器（逗号分组，任一分支匹配即匹配）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Compound>,
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

/// 按逗号切分分组，属性条件 `[...]` 内的逗号不作为分隔符
fn split_alternatives(source: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, ch) in source.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&source[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&source[start..]);
    parts
}

fn invalid(selector: &str, reason: &str) -> BadgeError {
    BadgeError::InvalidInput(format!("selector `{selector}`: {reason}"))
}

impl Selector {
    pub fn parse(source: &str) -> BadgeResult<Self> {
        let alternatives = split_alternatives(source)
            .into_iter()
            .map(|part| Self::parse_compound(source, part.trim()))
            .collect::<BadgeResult<Vec<_>>>()?;
        Ok(Self { alternatives })
    }

    fn parse_compound(source: &str, part: &str) -> BadgeResult<Compound> {
        if part.is_empty() {
            return Err(invalid(source, "empty selector"));
        }

        let mut compound = Compound::default();
        let chars: Vec<char> = part.chars().collect();
        let mut pos = 0;

        let take_ident = |pos: &mut usize| -> String {
            let start = *pos;
            while *pos < chars.len() && is_ident_char(chars[*pos]) {
                *pos += 1;
            }
            chars[start..*pos].iter().collect()
        };

        if is_ident_char(chars[0]) {
            compound.tag = Some(take_ident(&mut pos).to_ascii_lowercase());
        } else if chars[0] == '*' {
            pos = 1;
        }

        while pos < chars.len() {
            match chars[pos] {
                '.' => {
                    pos += 1;
                    let class = take_ident(&mut pos);
                    if class.is_empty() {
                        return Err(invalid(source, "empty class name"));
                    }
                    compound.classes.push(class);
                }
                '[' => {
                    let close = chars[pos..]
                        .iter()
                        .position(|&c| c == ']')
                        .map(|offset| pos + offset)
                        .ok_or_else(|| invalid(source, "unterminated attribute condition"))?;
                    let inner: String = chars[pos + 1..close].iter().collect();
                    compound.attrs.push(Self::parse_attr(source, &inner)?);
                    pos = close + 1;
                }
                ch if ch.is_whitespace() => {
                    return Err(invalid(source, "combinators are not supported"));
                }
                _ => return Err(invalid(source, "unexpected character")),
            }
        }

        Ok(compound)
    }

    fn parse_attr(source: &str, inner: &str) -> BadgeResult<AttrCondition> {
        let (name, value) = match inner.split_once('=') {
            Some((name, value)) => {
                let value = value.trim();
                let unquoted = value
                    .strip_prefix('\'')
                    .and_then(|v| v.strip_suffix('\''))
                    .or_else(|| value.strip_prefix('"').and_then(|v| v.strip_suffix('"')))
                    .unwrap_or(value);
                (name.trim(), Some(unquoted.to_string()))
            }
            None => (inner.trim(), None),
        };
        if name.is_empty() || !name.chars().all(is_ident_char) {
            return Err(invalid(source, "invalid attribute name"));
        }
        Ok(AttrCondition {
            name: name.to_ascii_lowercase(),
            value,
        })
    }

    pub fn matches(&self, el: &ElementData) -> bool {
        self.alternatives.iter().any(|c| c.matches(el))
    }
}
