//! 替换宿主分类徽章渲染器

use std::sync::Arc;

use catbadge_engine::{BadgeOptions, Category};

use crate::catalogue::CategoryCatalogue;
use crate::context::ThemeContext;

use super::api::{CategoryLinkRenderer, RouteSource};

/// 分类列表页：父分类上下文多余
const CATEGORIES_ROUTE: &str = "discovery.categories";

pub struct CategoryIconsRenderer {
    ctx: Arc<ThemeContext>,
    catalogue: Arc<dyn CategoryCatalogue>,
    router: Arc<dyn RouteSource>,
}

impl std::fmt::Debug for CategoryIconsRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryIconsRenderer")
            .field("ctx", &self.ctx)
            .finish_non_exhaustive()
    }
}

impl CategoryIconsRenderer {
    pub fn new(
        ctx: Arc<ThemeContext>,
        catalogue: Arc<dyn CategoryCatalogue>,
        router: Arc<dyn RouteSource>,
    ) -> Self {
        Self {
            ctx,
            catalogue,
            router,
        }
    }

    fn skip_parent_display(&self) -> bool {
        self.router.current_route_name().as_deref() == Some(CATEGORIES_ROUTE)
    }
}

impl CategoryLinkRenderer for CategoryIconsRenderer {
    fn render(&self, category: &Category, options: &BadgeOptions) -> String {
        let parent = self.catalogue.parent_of(category);
        self.ctx.breadcrumbs().compose_with_parent(
            category,
            parent,
            options,
            self.skip_parent_display(),
        )
    }
}
