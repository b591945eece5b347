pub mod escape;
pub mod log_format;
pub mod text_direction;

pub use escape::escape_expression;
pub use text_direction::is_rtl;
