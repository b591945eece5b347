//! 电平触发的调和循环
//! 核心职责：
//! 1. 任何触发（导航/DOM变化/搜索点击/定时）都只表达"现在请确保不变量成立"
//! 2. 按触发类型安排有界的补充扫描时间点（RetryBudget 限制数量与时间窗口）
//! 3. run_due 是唯一的扫描入口：到期的时间点合并为一次扫描
//! 重复触发是安全的：幂等性完全来自补丁器的相邻检查

use std::time::{Duration, Instant};

use crate::dom::{Document, NodeId};

use super::idempotent::IdempotentPatcher;
use super::regions::{HOMEPAGE_BODY, SEARCH_TRIGGERS};

/// 首页路由名
const HOMEPAGE_ROUTE: &str = "discovery.index";

/// 调和触发源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// 页面切换；首页额外安排密集的补充扫描
    Navigation { homepage: bool },
    /// 文档子树发生变化
    Mutation,
    /// 点击了搜索入口，target 为被点击的元素
    Click { target: NodeId },
    /// 宿主定时器
    Timer,
}

/// 一次页面切换的描述
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageChange<'a> {
    pub path: &'a str,
    pub route_name: Option<&'a str>,
    /// body 带有首页话题列表标记（navigation-topics）
    pub topics_body: bool,
}

impl PageChange<'_> {
    pub fn is_homepage(&self) -> bool {
        self.route_name == Some(HOMEPAGE_ROUTE)
            || self.path.is_empty()
            || self.path == "/"
            || self.topics_body
    }
}

impl Trigger {
    /// 根据路由名/路径/文档 body 标记构造导航触发
    pub fn navigation(doc: &Document, route_name: Option<&str>, path: &str) -> Self {
        Self::page_change(&PageChange {
            path,
            route_name,
            topics_body: doc.query_first(doc.root(), &HOMEPAGE_BODY).is_some(),
        })
    }

    pub fn page_change(page: &PageChange<'_>) -> Self {
        Trigger::Navigation {
            homepage: page.is_homepage(),
        }
    }

    /// 点击目标位于搜索入口内时才构成触发
    pub fn click(doc: &Document, target: NodeId) -> Option<Self> {
        doc.closest(target, &SEARCH_TRIGGERS)
            .map(|_| Trigger::Click { target })
    }
}

/// 扫描范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum ScanScope {
    SearchRegions,
    Document,
}

/// 各触发源的补充扫描时间表（相对触发时刻）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RescanSchedule {
    pub navigation: Vec<Duration>,
    pub search_click: Vec<Duration>,
    pub homepage: Vec<Duration>,
    /// 首页周期扫描间隔
    pub homepage_interval: Duration,
    /// 首页周期扫描持续时长
    pub homepage_window: Duration,
}

impl Default for RescanSchedule {
    fn default() -> Self {
        Self {
            navigation: vec![Duration::from_millis(100), Duration::from_millis(300)],
            search_click: vec![
                Duration::from_millis(200),
                Duration::from_millis(400),
                Duration::from_millis(800),
            ],
            homepage: vec![
                Duration::from_millis(300),
                Duration::from_millis(600),
                Duration::from_millis(1000),
            ],
            homepage_interval: Duration::from_millis(500),
            homepage_window: Duration::from_secs(5),
        }
    }
}

impl RescanSchedule {
    fn offsets_for(&self, trigger: &Trigger) -> Vec<(Duration, ScanScope)> {
        let mut offsets = vec![(Duration::ZERO, scope_for(trigger))];
        match trigger {
            Trigger::Navigation { homepage } => {
                offsets.extend(self.navigation.iter().map(|d| (*d, ScanScope::Document)));
                if *homepage {
                    offsets.extend(self.homepage.iter().map(|d| (*d, ScanScope::Document)));
                    if !self.homepage_interval.is_zero() {
                        let mut tick = self.homepage_interval;
                        while tick <= self.homepage_window {
                            offsets.push((tick, ScanScope::Document));
                            tick += self.homepage_interval;
                        }
                    }
                }
            }
            Trigger::Click { .. } => {
                offsets.extend(self.search_click.iter().map(|d| (*d, ScanScope::SearchRegions)));
            }
            Trigger::Mutation | Trigger::Timer => {}
        }
        offsets
    }
}

fn scope_for(trigger: &Trigger) -> ScanScope {
    match trigger {
        Trigger::Click { .. } => ScanScope::SearchRegions,
        _ => ScanScope::Document,
    }
}

/// 补充扫描的上限
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBudget {
    /// 同时挂起的时间点上限
    pub max_pending: usize,
    /// 单次触发可安排的最远时间点
    pub max_window: Duration,
}

impl Default for RetryBudget {
    fn default() -> Self {
        Self {
            max_pending: 32,
            max_window: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Deadline {
    at: Instant,
    scope: ScanScope,
}

#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    schedule: RescanSchedule,
    budget: RetryBudget,
    deadlines: Vec<Deadline>,
    passes: u64,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schedule(mut self, schedule: RescanSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_budget(mut self, budget: RetryBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn budget(&self) -> RetryBudget {
        self.budget
    }

    /// 记录一次触发：立即扫描 + 有界的补充扫描
    pub fn request(&mut self, trigger: Trigger, now: Instant) {
        // 导航后旧页面的补充扫描没有意义
        if matches!(trigger, Trigger::Navigation { .. }) {
            self.deadlines.clear();
        }

        for (offset, scope) in self.schedule.offsets_for(&trigger) {
            if offset > self.budget.max_window {
                continue;
            }
            self.push_deadline(Deadline {
                at: now + offset,
                scope,
            });
        }
        log::trace!("{:?} requested, {} scans pending", trigger, self.deadlines.len());
    }

    fn push_deadline(&mut self, deadline: Deadline) {
        // 同一时刻的扫描合并，保留更大的范围
        if let Some(existing) = self.deadlines.iter_mut().find(|d| d.at == deadline.at) {
            existing.scope = existing.scope.max(deadline.scope);
            return;
        }
        if self.deadlines.len() >= self.budget.max_pending {
            log::debug!("Retry budget exhausted, dropping follow-up scan");
            return;
        }
        self.deadlines.push(deadline);
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadlines.iter().any(|d| d.at <= now)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.iter().map(|d| d.at).min()
    }

    pub fn is_idle(&self) -> bool {
        self.deadlines.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.deadlines.len()
    }

    /// 已执行的扫描次数
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// 执行到期的扫描；没有到期时间点时返回 None，否则返回本次插入数量
    pub fn run_due(
        &mut self,
        doc: &mut Document,
        now: Instant,
        patcher: &IdempotentPatcher<'_>,
    ) -> Option<usize> {
        let mut scope = None;
        self.deadlines.retain(|d| {
            if d.at <= now {
                scope = scope.max(Some(d.scope));
                false
            } else {
                true
            }
        });
        let scope = scope?;

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("reconcile", pass = self.passes, ?scope).entered();

        self.passes += 1;
        let patched = match scope {
            ScanScope::Document => patcher.scan_document(doc),
            ScanScope::SearchRegions => patcher.scan_search_regions(doc),
        };
        log::trace!("Reconcile pass {} patched {} badges", self.passes, patched);
        Some(patched)
    }
}
