//! 分类实体（宿主拥有，内核只读）

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::CoreError;

/// 分类ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u64);

impl Display for CategoryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CategoryId {
    fn from(id: u64) -> Self {
        CategoryId(id)
    }
}

/// 从DOM属性值解析（容忍首尾空白，拒绝其他非数字内容）
impl FromStr for CategoryId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(CategoryId)
            .map_err(|_| CoreError::InvalidCategoryId(s.to_string()))
    }
}

/// 分类记录
/// 字段命名与宿主站点数据（site.json）保持一致，便于直接反序列化
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub slug: String,
    pub name: String,
    /// 十六进制颜色，不含 `#`
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub text_color: String,
    #[serde(default, alias = "description_text")]
    pub description: Option<String>,
    #[serde(default)]
    pub read_restricted: bool,
    #[serde(default)]
    pub parent_category_id: Option<CategoryId>,
}

impl Category {
    pub fn new(id: u64, slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: CategoryId(id),
            slug: slug.into(),
            name: name.into(),
            color: String::new(),
            text_color: String::new(),
            description: None,
            read_restricted: false,
            parent_category_id: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_text_color(mut self, text_color: impl Into<String>) -> Self {
        self.text_color = text_color.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_parent(mut self, parent_id: u64) -> Self {
        self.parent_category_id = Some(CategoryId(parent_id));
        self
    }

    pub fn restricted(mut self) -> Self {
        self.read_restricted = true;
        self
    }

    /// 分类自身颜色的 `#RRGGBB` 形式，颜色为空时返回None
    pub fn hex_color(&self) -> Option<String> {
        if self.color.is_empty() {
            None
        } else {
            Some(format!("#{}", self.color))
        }
    }

    /// 分类页面路径（不含站点子目录前缀）
    pub fn path(&self) -> String {
        format!("/c/{}/{}", self.slug, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_id_parse() {
        assert_eq!(" 5 ".parse::<CategoryId>(), Ok(CategoryId(5)));
        assert!("5abc".parse::<CategoryId>().is_err());
        assert!("".parse::<CategoryId>().is_err());
    }

    #[test]
    fn test_category_deserialize_site_fields() {
        let json = r#"{
            "id": 7, "slug": "dev", "name": "Dev", "color": "0088CC",
            "description_text": "Development", "read_restricted": true,
            "parent_category_id": 3
        }"#;
        let cat: Category = serde_json::from_str(json).unwrap();
        assert_eq!(cat.id, CategoryId(7));
        assert_eq!(cat.description.as_deref(), Some("Development"));
        assert!(cat.read_restricted);
        assert_eq!(cat.parent_category_id, Some(CategoryId(3)));
        assert_eq!(cat.hex_color().as_deref(), Some("#0088CC"));
        assert_eq!(cat.path(), "/c/dev/7");
    }
}
