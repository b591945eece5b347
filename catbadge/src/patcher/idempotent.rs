//! 幂等父分类补丁器
//! 核心职责：
//! 1. 找出带 --has-parent 标记与 data-parent-category-id 的子徽章
//! 2. 包裹元素之前已紧邻父分类面包屑 → 跳过（DOM 本身即"已处理"的唯一事实来源）
//! 3. 否则按ID查父分类、解析图标、组装面包屑，插入到包裹元素之前
//! 任意查找失败都退化为跳过该徽章，绝不抛错、绝不留下残缺结构

use catbadge_engine::CategoryId;

use crate::catalogue::CategoryCatalogue;
use crate::context::ThemeContext;
use crate::dom::{Document, NodeId};

use super::regions::{
    BADGE_WRAPPER, NESTED_SEARCH_REGIONS, PARENT_BREADCRUMB, PATCH_TARGET, SEARCH_REGIONS,
};

#[derive(Clone, Copy)]
pub struct IdempotentPatcher<'a> {
    ctx: &'a ThemeContext,
    catalogue: &'a dyn CategoryCatalogue,
}

impl std::fmt::Debug for IdempotentPatcher<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdempotentPatcher")
            .field("ctx", self.ctx)
            .field("categories", &self.catalogue.categories().len())
            .finish()
    }
}

impl<'a> IdempotentPatcher<'a> {
    pub fn new(ctx: &'a ThemeContext, catalogue: &'a dyn CategoryCatalogue) -> Self {
        Self { ctx, catalogue }
    }

    /// 扫描 root 下所有待补丁徽章，返回本次插入的面包屑数量
    pub fn scan(&self, doc: &mut Document, root: NodeId) -> usize {
        let targets = doc.query_all(root, &PATCH_TARGET);
        let patched = targets
            .into_iter()
            .filter(|&badge| self.patch_badge(doc, badge))
            .count();
        if patched > 0 {
            log::debug!("Inserted {} parent category breadcrumbs", patched);
        }
        patched
    }

    /// 扫描整个文档
    pub fn scan_document(&self, doc: &mut Document) -> usize {
        let root = doc.root();
        self.scan(doc, root)
    }

    /// 只扫描搜索结果容器（含嵌套容器）；容器重叠时由相邻检查保证不重复插入
    pub fn scan_search_regions(&self, doc: &mut Document) -> usize {
        let root = doc.root();
        let mut patched = 0;
        for container in doc.query_all(root, &SEARCH_REGIONS) {
            patched += self.scan(doc, container);
            for nested in doc.query_all(container, &NESTED_SEARCH_REGIONS) {
                patched += self.scan(doc, nested);
            }
        }
        patched
    }

    /// 包裹元素之前是否已紧邻父分类面包屑
    pub fn has_breadcrumb_before(doc: &Document, wrapper: NodeId) -> bool {
        doc.previous_element_sibling(wrapper)
            .is_some_and(|prev| doc.matches(prev, &PARENT_BREADCRUMB))
    }

    fn patch_badge(&self, doc: &mut Document, badge: NodeId) -> bool {
        if !doc.is_attached(badge) {
            return false;
        }
        let Some(raw_id) = doc.attr(badge, "data-parent-category-id") else {
            return false;
        };
        let parent_id = match raw_id.parse::<CategoryId>() {
            Ok(id) => id,
            Err(e) => {
                log::debug!("Skipping badge with unusable parent id: {}", e);
                return false;
            }
        };

        let wrapper = doc.closest(badge, &BADGE_WRAPPER).unwrap_or(badge);
        if doc.parent(wrapper).is_none() {
            return false;
        }

        // 写入前的相邻检查：多个触发源重复调用时只有第一次会插入
        if Self::has_breadcrumb_before(doc, wrapper) {
            return false;
        }

        let Some(parent) = self.catalogue.find_by_id(parent_id) else {
            log::debug!("Parent category {} not in catalogue, badge left as is", parent_id);
            return false;
        };

        let markup = self.ctx.breadcrumbs().compose_parent_only(parent);
        let nodes = doc.parse_fragment(&markup);
        let [breadcrumb] = nodes.as_slice() else {
            log::debug!("Breadcrumb markup for category {} is not a single element", parent_id);
            return false;
        };
        if !doc.matches(*breadcrumb, &PARENT_BREADCRUMB) {
            return false;
        }

        doc.insert_before(wrapper, *breadcrumb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::SiteCatalogue;
    use crate::config::ThemeSettings;
    use catbadge_engine::Category;

    fn context() -> ThemeContext {
        ThemeContext::from_settings(
            &ThemeSettings::builder()
                .icon_list("dev,code,#123456")
                .build(),
        )
    }

    fn catalogue() -> SiteCatalogue {
        SiteCatalogue::new(vec![
            Category::new(5, "dev", "Dev").with_color("0088CC"),
            Category::new(6, "dev-tools", "Tools").with_parent(5),
        ])
    }

    const SEARCH_RESULT: &str = r#"<div class="search-menu"><div class="results"><ul><li><a class="badge-category__wrapper" href="/c/dev/dev-tools/6"><span data-category-id="6" data-parent-category-id="5" class="badge-category --has-parent"><span class="badge-category__name">Tools</span></span></a></li></ul></div></div>"#;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn breadcrumb_count(doc: &Document) -> usize {
        doc.query_all(doc.root(), &PARENT_BREADCRUMB).len()
    }

    #[test]
    fn test_scan_inserts_once() {
        let ctx = context();
        let catalogue = catalogue();
        let patcher = IdempotentPatcher::new(&ctx, &catalogue);
        let mut doc = Document::parse(SEARCH_RESULT);

        assert_eq!(patcher.scan_document(&mut doc), 1);
        assert_eq!(breadcrumb_count(&doc), 1);

        // 重复扫描不再插入
        assert_eq!(patcher.scan_document(&mut doc), 0);
        assert_eq!(patcher.scan_search_regions(&mut doc), 0);
        assert_eq!(breadcrumb_count(&doc), 1);
    }

    #[test]
    fn test_breadcrumb_immediately_precedes_wrapper() {
        let ctx = context();
        let catalogue = catalogue();
        let patcher = IdempotentPatcher::new(&ctx, &catalogue);
        let mut doc = Document::parse(SEARCH_RESULT);
        patcher.scan_document(&mut doc);

        let badge = doc.query_first(doc.root(), &PATCH_TARGET).unwrap();
        let wrapper = doc.closest(badge, &BADGE_WRAPPER).unwrap();
        let crumb = doc.previous_element_sibling(wrapper).unwrap();
        assert!(doc.has_class(crumb, "parent-category-badge"));
        assert_eq!(doc.attr(crumb, "href"), Some("/c/dev/5"));

        let html = doc.outer_html(crumb);
        assert!(html.contains("data-category-id=\"5\""));
        assert!(html.contains("d-icon-code"));
        assert!(html.contains("style=\"color: #123456\""));
    }

    #[test]
    fn test_overlapping_regions_patch_once() {
        let ctx = context();
        let catalogue = catalogue();
        let patcher = IdempotentPatcher::new(&ctx, &catalogue);
        let mut doc = Document::parse(SEARCH_RESULT);

        // .search-menu 与嵌套的 .results 都包含同一个徽章
        assert_eq!(patcher.scan_search_regions(&mut doc), 1);
        assert_eq!(breadcrumb_count(&doc), 1);
    }

    #[test]
    fn test_unknown_parent_is_skipped() {
        init_logger();
        let ctx = context();
        let catalogue = catalogue();
        let patcher = IdempotentPatcher::new(&ctx, &catalogue);
        let html = SEARCH_RESULT.replace("data-parent-category-id=\"5\"", "data-parent-category-id=\"999\"");
        let mut doc = Document::parse(&html);
        let before = doc.to_html();

        assert_eq!(patcher.scan_document(&mut doc), 0);
        assert_eq!(doc.to_html(), before);
    }

    #[test]
    fn test_malformed_parent_id_is_skipped() {
        init_logger();
        let ctx = context();
        let catalogue = catalogue();
        let patcher = IdempotentPatcher::new(&ctx, &catalogue);
        let html = SEARCH_RESULT.replace("data-parent-category-id=\"5\"", "data-parent-category-id=\"five\"");
        let mut doc = Document::parse(&html);
        assert_eq!(patcher.scan_document(&mut doc), 0);
    }

    #[test]
    fn test_badge_without_wrapper_gets_breadcrumb_before_itself() {
        let ctx = context();
        let catalogue = catalogue();
        let patcher = IdempotentPatcher::new(&ctx, &catalogue);
        let mut doc = Document::parse(
            r#"<div><span data-parent-category-id="5" class="badge-category --has-parent">Tools</span></div>"#,
        );
        assert_eq!(patcher.scan_document(&mut doc), 1);
        assert_eq!(patcher.scan_document(&mut doc), 0);

        let badge = doc.query_first(doc.root(), &PATCH_TARGET).unwrap();
        let prev = doc.previous_element_sibling(badge).unwrap();
        assert!(doc.has_class(prev, "parent-category-badge"));
    }

    #[test]
    fn test_sibling_structure_preserved() {
        let ctx = context();
        let catalogue = catalogue();
        let patcher = IdempotentPatcher::new(&ctx, &catalogue);
        let mut doc = Document::parse(
            r#"<li><span class="topic-title">Hello</span> <a class="badge-category__wrapper"><span data-parent-category-id="5" class="badge-category --has-parent">Tools</span></a> <span class="tags">t</span></li>"#,
        );
        patcher.scan_document(&mut doc);

        let li = doc.children(doc.root())[0];
        let classes: Vec<Option<&str>> = doc
            .children(li)
            .iter()
            .filter(|&&id| doc.element(id).is_some())
            .map(|&id| doc.attr(id, "class"))
            .collect();
        assert_eq!(
            classes,
            vec![
                Some("topic-title"),
                Some("badge-category__wrapper parent-category-badge"),
                Some("badge-category__wrapper"),
                Some("tags"),
            ]
        );
    }

    #[test]
    fn test_detached_root_wrapper_is_skipped() {
        let ctx = context();
        let catalogue = catalogue();
        let patcher = IdempotentPatcher::new(&ctx, &catalogue);
        let mut doc = Document::new();
        let nodes = doc.parse_fragment(
            r#"<a class="badge-category__wrapper"><span data-parent-category-id="5" class="badge-category --has-parent">Tools</span></a>"#,
        );
        // 脱离文档的片段不可见，也不会被修改
        assert_eq!(patcher.scan(&mut doc, nodes[0]), 0);
    }
}
