//! 宿主扩展点
//! 必选扩展点直接是 PluginApi 的方法；可选扩展点返回 Option，缺失不算错误

use std::sync::Arc;

use catbadge_engine::{BadgeOptions, Category, CategoryAssignment, CategoryId};
use serde::{Deserialize, Serialize};

use crate::catalogue::CategoryCatalogue;
use crate::patcher::PageChange;

/// 分类徽章渲染器替换点：`(category, options) -> markup`
pub trait CategoryLinkRenderer: Send + Sync {
    fn render(&self, category: &Category, options: &BadgeOptions) -> String;
}

/// 小部件：`(category) -> markup | nothing`
pub trait Widget: Send + Sync {
    fn name(&self) -> &str;
    fn html(&self, category: &Category) -> Option<String>;
}

/// 引用分类的 hashtag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hashtag {
    pub id: CategoryId,
    #[serde(default)]
    pub slug: String,
}

/// hashtag 图标渲染
pub trait HashtagIconRenderer: Send + Sync {
    fn generate_icon_html(&self, hashtag: &Hashtag) -> String;
}

/// 当前路由
pub trait RouteSource: Send + Sync {
    fn current_route_name(&self) -> Option<String>;
}

/// 侧边栏分类链接前缀
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionLinkPrefix {
    pub category_id: CategoryId,
    pub prefix_type: String,
    pub prefix_value: String,
    pub prefix_color: Option<String>,
}

impl From<CategoryAssignment> for SectionLinkPrefix {
    fn from(assignment: CategoryAssignment) -> Self {
        Self {
            category_id: assignment.category_id,
            prefix_type: "icon".to_string(),
            prefix_value: assignment.icon,
            prefix_color: assignment.color,
        }
    }
}

/// 侧边栏扩展点（可选）
pub trait SidebarExtension {
    fn register_lock_icon(&mut self, icon: &str);
    fn register_prefix(&mut self, prefix: SectionLinkPrefix);
}

/// hashtag 类型注册点（可选）
pub trait HashtagRegistry {
    /// 宿主默认的分类 hashtag 渲染
    fn default_category_type(&self) -> Arc<dyn HashtagIconRenderer>;
    fn register_hashtag_type(&mut self, name: &str, renderer: Arc<dyn HashtagIconRenderer>);
}

/// 页面切换回调；宿主负责填入 body 上的首页标记
pub type PageChangeCallback = Box<dyn FnMut(&PageChange<'_>) + Send>;

pub trait PluginApi {
    fn catalogue(&self) -> Arc<dyn CategoryCatalogue>;
    fn router(&self) -> Arc<dyn RouteSource>;

    fn replace_category_link_renderer(&mut self, renderer: Arc<dyn CategoryLinkRenderer>);
    fn create_widget(&mut self, widget: Arc<dyn Widget>);
    fn on_page_change(&mut self, callback: PageChangeCallback);

    /// 宿主其他组件使用的锁图标
    fn override_lock_icon(&mut self, _icon: &str) {}

    fn sidebar(&mut self) -> Option<&mut dyn SidebarExtension> {
        None
    }

    fn hashtags(&mut self) -> Option<&mut dyn HashtagRegistry> {
        None
    }
}
