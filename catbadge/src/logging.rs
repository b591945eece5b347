//! 命令行日志初始化
//! 默认使用 env_logger；开启 tracing 特性时改用 tracing-subscriber，并把 log 记录桥接进来

/// 初始化全局日志，重复调用时静默忽略
#[cfg(not(feature = "tracing"))]
pub fn init_logging(verbose: bool) {
    use env_logger::{Builder, Env, Target};

    let default_level = if verbose { "debug" } else { "info" };
    let _ = Builder::from_env(Env::default().default_filter_or(default_level))
        .target(Target::Stderr)
        .try_init();
}

/// 初始化全局日志，重复调用时静默忽略
#[cfg(feature = "tracing")]
pub fn init_logging(verbose: bool) {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr));

    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        let _ = tracing_log::LogTracer::init();
    }
}
