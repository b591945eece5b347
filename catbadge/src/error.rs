//! 全局错误类型定义
//! 渲染/解析/补丁主流程从不返回错误；这里只覆盖设置与站点数据的加载
use thiserror::Error;
use catbadge_engine::CoreError;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;

#[derive(Error, Debug)]
pub enum BadgeError {
    // 内核错误
    #[error("Core error: {0}")]
    CoreError(#[from] CoreError),

    // 设置相关错误
    #[error("Settings load failed: {0}")]
    SettingsLoadError(String),

    // 站点数据相关错误
    #[error("Site catalogue load failed: {0}")]
    CatalogueLoadError(String),
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    // 序列化/反序列化错误
    #[error("JSON parse failed: {0}")]
    JsonError(#[from] SerdeJsonError),

    // 基础错误
    #[error("IO operation failed: {0}")]
    IoError(#[from] IoError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

// 全局Result类型
pub type BadgeResult<T> = Result<T, BadgeError>;
