pub mod badge;
pub mod category;
pub mod rule;

pub use badge::{BadgeOptions, BadgeRole, BadgeView, TextDirection, WrapperTag};
pub use category::{Category, CategoryId};
pub use rule::{IconRule, MatchMode, ResolvedIcon, RuleColor};
