//! 父分类面包屑拼接策略
//! 父分类存在、非分类列表页、且未要求隐藏父分类时：父徽章 + 子徽章（子徽章去掉 --has-parent）
//! 否则只输出子徽章，存在父分类时保留 --has-parent 装饰标记

use crate::core::{BadgeOptions, BadgeRole, BadgeView, Category};
use crate::resolver::CategoryIconResolver;

use super::badge::BadgeComposer;

/// 面包屑组装结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentBreadcrumb {
    /// 可见的父分类徽章
    pub parent: Option<BadgeView>,
    pub child: BadgeView,
}

impl ParentBreadcrumb {
    pub fn shows_parent(&self) -> bool {
        self.parent.is_some()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BreadcrumbComposer<'a> {
    composer: BadgeComposer<'a>,
    resolver: CategoryIconResolver<'a>,
}

impl<'a> BreadcrumbComposer<'a> {
    pub fn new(composer: BadgeComposer<'a>, resolver: CategoryIconResolver<'a>) -> Self {
        Self { composer, resolver }
    }

    pub fn composer(&self) -> &BadgeComposer<'a> {
        &self.composer
    }

    /// 组装子分类（及可见父分类）的渲染模型
    pub fn compose_views(
        &self,
        category: &Category,
        parent: Option<&Category>,
        options: &BadgeOptions,
        skip_parent_display: bool,
    ) -> ParentBreadcrumb {
        let resolved = self.resolver.resolve(category);
        let mut child = self.composer.compose(category, resolved.as_ref(), options);

        match parent {
            Some(parent) if !skip_parent_display && !options.hide_parent => {
                let parent_view = self.parent_view(parent, options);
                child.role = BadgeRole::Child;
                child.has_parent_flag = false;
                ParentBreadcrumb {
                    parent: Some(parent_view),
                    child,
                }
            }
            Some(_) => {
                child.has_parent_flag = true;
                ParentBreadcrumb { parent: None, child }
            }
            None => ParentBreadcrumb { parent: None, child },
        }
    }

    /// 组装并序列化：父徽章紧邻子徽章之前
    pub fn compose_with_parent(
        &self,
        category: &Category,
        parent: Option<&Category>,
        options: &BadgeOptions,
        skip_parent_display: bool,
    ) -> String {
        let crumb = self.compose_views(category, parent, options, skip_parent_display);
        let mut html = match &crumb.parent {
            Some(parent_view) => self.composer.render(parent_view),
            None => String::new(),
        };
        html.push_str(&self.composer.render(&crumb.child));
        html
    }

    /// 单独的父分类面包屑（补丁器对宿主注入的子徽章补齐父徽章时使用）
    pub fn compose_parent_only(&self, parent: &Category) -> String {
        let view = self.parent_view(parent, &BadgeOptions::default());
        self.composer.render(&view)
    }

    fn parent_view(&self, parent: &Category, options: &BadgeOptions) -> BadgeView {
        let resolved = self.resolver.resolve(parent);
        self.composer.compose_parent(parent, resolved.as_ref(), options)
    }
}
