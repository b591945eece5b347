//! 徽章组装
//! host：组装所需的宿主能力（图标标记/本地化）及默认实现
//! badge：单个分类徽章 → BadgeView → HTML
//! breadcrumb：父分类面包屑拼接策略

pub mod badge;
pub mod breadcrumb;
pub mod host;

pub use badge::BadgeComposer;
pub use breadcrumb::{BreadcrumbComposer, ParentBreadcrumb};
pub use host::{DefaultTranslator, IconLibrary, RenderContext, SvgIconLibrary, Translator};
