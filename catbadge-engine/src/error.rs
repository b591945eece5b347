//! catbadge-engine 内核错误定义
//! 仅用于诊断接口（如严格解析单条规则），渲染/解析主流程从不向上抛错
use thiserror::Error;

/// 内核核心错误枚举
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    // ===================== 规则相关错误 =====================
    /// 规则段缺少逗号分隔（无法切分出slug与图标）
    #[error("Rule segment has no field separator: {0}")]
    MissingSeparator(String),

    /// 规则段slug为空
    #[error("Rule segment has an empty slug pattern: {0}")]
    EmptySlugPattern(String),

    /// 未知匹配模式（仅接受 partial / exact / 空）
    #[error("Unknown match mode: {0}")]
    UnknownMatchMode(String),

    // ===================== 数据相关错误 =====================
    /// 分类ID解析失败
    #[error("Invalid category id: {0}")]
    InvalidCategoryId(String),
}

/// 内核层全局Result类型别名
pub type CoreResult<T> = Result<T, CoreError>;
