//! tokio 异步调和驱动
//! 从通道接收触发，睡眠到下一个时间点再执行扫描；
//! 通道关闭且没有剩余补充扫描时结束

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

use crate::catalogue::CategoryCatalogue;
use crate::context::ThemeContext;
use crate::dom::Document;

use super::idempotent::IdempotentPatcher;
use super::reconciler::{Reconciler, Trigger};

/// 驱动运行统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverStats {
    pub passes: u64,
    pub patched: usize,
}

pub struct ReconcileDriver {
    ctx: Arc<ThemeContext>,
    catalogue: Arc<dyn CategoryCatalogue>,
    reconciler: Reconciler,
}

impl std::fmt::Debug for ReconcileDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReconcileDriver")
            .field("reconciler", &self.reconciler)
            .finish_non_exhaustive()
    }
}

impl ReconcileDriver {
    pub fn new(ctx: Arc<ThemeContext>, catalogue: Arc<dyn CategoryCatalogue>) -> Self {
        Self {
            ctx,
            catalogue,
            reconciler: Reconciler::new(),
        }
    }

    pub fn with_reconciler(mut self, reconciler: Reconciler) -> Self {
        self.reconciler = reconciler;
        self
    }

    pub async fn run(
        mut self,
        mut triggers: UnboundedReceiver<Trigger>,
        doc: Arc<Mutex<Document>>,
    ) -> DriverStats {
        let mut stats = DriverStats::default();
        let mut open = true;

        loop {
            if !open && self.reconciler.is_idle() {
                break;
            }
            let deadline = self.reconciler.next_deadline();
            // 分支被禁用时表达式仍会求值，这里不能对 None 解包
            let wake_at = deadline.map(Instant::from_std).unwrap_or_else(Instant::now);

            tokio::select! {
                received = triggers.recv(), if open => match received {
                    Some(trigger) => self.reconciler.request(trigger, Instant::now().into_std()),
                    None => {
                        log::debug!("Trigger channel closed, draining {} scans", self.reconciler.pending());
                        open = false;
                    }
                },
                _ = sleep_until(wake_at), if deadline.is_some() => {
                    let mut doc = doc.lock().await;
                    let patcher = IdempotentPatcher::new(&self.ctx, self.catalogue.as_ref());
                    if let Some(patched) =
                        self.reconciler.run_due(&mut doc, Instant::now().into_std(), &patcher)
                    {
                        stats.passes += 1;
                        stats.patched += patched;
                    }
                }
            }
        }

        log::info!(
            "Reconcile driver stopped after {} passes, {} breadcrumbs inserted",
            stats.passes,
            stats.patched
        );
        stats
    }
}
