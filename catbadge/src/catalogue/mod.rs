//! 分类目录：宿主站点分类数据的只读查询接口

use std::path::Path;

use catbadge_engine::{Category, CategoryId};
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::error::{BadgeError, BadgeResult};

/// 分类目录查询
pub trait CategoryCatalogue: Send + Sync {
    fn find_by_id(&self, id: CategoryId) -> Option<&Category>;
    fn find_by_slug(&self, slug: &str) -> Option<&Category>;
    fn categories(&self) -> &[Category];

    /// 分类的父分类（父ID不存在于目录中时为None）
    fn parent_of(&self, category: &Category) -> Option<&Category> {
        category.parent_category_id.and_then(|id| self.find_by_id(id))
    }
}

/// 站点分类目录（内存索引）
#[derive(Debug, Clone, Default)]
pub struct SiteCatalogue {
    categories: Vec<Category>,
    by_id: FxHashMap<CategoryId, usize>,
    by_slug: FxHashMap<String, usize>,
}

/// site.json 中与分类相关的部分
#[derive(Debug, Deserialize)]
struct SiteData {
    categories: Vec<Category>,
}

impl SiteCatalogue {
    pub fn new(categories: Vec<Category>) -> Self {
        let mut by_id = FxHashMap::default();
        let mut by_slug = FxHashMap::default();
        for (idx, category) in categories.iter().enumerate() {
            if by_id.insert(category.id, idx).is_some() {
                log::debug!("Duplicate category id {} in catalogue, last one wins", category.id);
            }
            by_slug.entry(category.slug.clone()).or_insert(idx);
        }
        Self {
            categories,
            by_id,
            by_slug,
        }
    }

    /// 解析站点数据：接受 `{"categories": [...]}` 或直接的分类数组
    pub fn from_json_str(json: &str) -> BadgeResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let categories = if value.is_array() {
            serde_json::from_value::<Vec<Category>>(value)?
        } else if value.get("categories").is_some() {
            serde_json::from_value::<SiteData>(value)?.categories
        } else {
            return Err(BadgeError::CatalogueLoadError(
                "expected a category array or an object with a `categories` field".to_string(),
            ));
        };
        Ok(Self::new(categories))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> BadgeResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            BadgeError::CatalogueLoadError(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json_str(&content)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl CategoryCatalogue for SiteCatalogue {
    fn find_by_id(&self, id: CategoryId) -> Option<&Category> {
        self.by_id.get(&id).map(|&idx| &self.categories[idx])
    }

    fn find_by_slug(&self, slug: &str) -> Option<&Category> {
        self.by_slug.get(slug).map(|&idx| &self.categories[idx])
    }

    fn categories(&self) -> &[Category] {
        &self.categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_id_and_slug() {
        let catalogue = SiteCatalogue::new(vec![
            Category::new(5, "dev", "Dev"),
            Category::new(6, "dev-tools", "Tools").with_parent(5),
            Category::new(7, "orphan", "Orphan").with_parent(999),
        ]);
        assert_eq!(catalogue.find_by_id(CategoryId(6)).map(|c| c.name.as_str()), Some("Tools"));
        assert_eq!(catalogue.find_by_slug("dev").map(|c| c.id), Some(CategoryId(5)));
        assert!(catalogue.find_by_id(CategoryId(42)).is_none());

        let tools = catalogue.find_by_id(CategoryId(6)).unwrap();
        assert_eq!(catalogue.parent_of(tools).map(|c| c.id), Some(CategoryId(5)));
        let orphan = catalogue.find_by_id(CategoryId(7)).unwrap();
        assert!(catalogue.parent_of(orphan).is_none());
    }

    #[test]
    fn test_from_json_shapes() {
        let wrapped = SiteCatalogue::from_json_str(
            r#"{"categories": [{"id": 1, "slug": "a", "name": "A"}], "other": true}"#,
        )
        .unwrap();
        assert_eq!(wrapped.len(), 1);

        let bare = SiteCatalogue::from_json_str(r#"[{"id": 1, "slug": "a", "name": "A"}]"#).unwrap();
        assert_eq!(bare.len(), 1);

        assert!(matches!(
            SiteCatalogue::from_json_str(r#"{"users": []}"#),
            Err(BadgeError::CatalogueLoadError(_))
        ));
    }
}
