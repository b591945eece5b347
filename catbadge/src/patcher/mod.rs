//! 补丁模块：对宿主注入（绕过渲染器）的子分类徽章补齐父分类面包屑
//! idempotent：基于相邻关系检查的幂等补丁
//! regions：搜索区域/触发元素等选择器
//! reconciler：电平触发的调和循环（触发 → 确保不变量成立）
//! driver：tokio 异步驱动（async-io 特性）

pub mod idempotent;
pub mod reconciler;
pub mod regions;

#[cfg(feature = "async-io")]
pub mod driver;

pub use idempotent::IdempotentPatcher;
pub use reconciler::{PageChange, Reconciler, RescanSchedule, RetryBudget, Trigger};

#[cfg(feature = "async-io")]
pub use driver::{DriverStats, ReconcileDriver};
