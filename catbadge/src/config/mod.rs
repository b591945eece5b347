//! 配置模块：主题设置（宿主设置存储的只读视图）与启动期构建的不可变图标配置
pub mod settings;

pub use settings::{IconConfig, SettingsBuilder, ThemeSettings};
