//! 宿主插件接口适配
//! api：宿主提供的扩展点（窄接口，特性探测）
//! renderer/widget/hashtag：本主题向宿主暴露的实现
//! initializer：启动期一次性装配

pub mod api;
pub mod hashtag;
pub mod initializer;
pub mod renderer;
pub mod widget;

pub use api::{
    CategoryLinkRenderer, Hashtag, HashtagIconRenderer, HashtagRegistry, PageChangeCallback,
    PluginApi, RouteSource, SectionLinkPrefix, SidebarExtension, Widget,
};
pub use hashtag::HashtagIconType;
pub use initializer::{CategoryIconsInitializer, InstalledTheme};
pub use renderer::CategoryIconsRenderer;
pub use widget::CategoryIconWidget;
