//! catbadge 命令行
//! render：按设置与站点数据输出单个分类徽章
//! patch：对HTML文档执行一次调和扫描并输出结果

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, Subcommand};

use catbadge::host::{CategoryLinkRenderer, RouteSource};
use catbadge::logging::init_logging;
use catbadge::{
    BadgeError, BadgeOptions, BadgeResult, CategoryCatalogue, CategoryIconsRenderer, CategoryId,
    Document, IdempotentPatcher, Reconciler, SiteCatalogue, ThemeContext, ThemeSettings, Trigger,
};

#[derive(Parser, Debug)]
#[command(name = "catbadge", version, about = "Category icon badges and parent breadcrumbs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 输出分类徽章HTML
    Render {
        #[arg(long)]
        settings: PathBuf,
        #[arg(long)]
        site: PathBuf,
        /// 分类ID
        #[arg(long)]
        category: String,
        /// 当前路由名（discovery.categories 时不显示父分类）
        #[arg(long)]
        route: Option<String>,
        #[arg(long)]
        no_link: bool,
        #[arg(long)]
        hide_parent: bool,
        #[arg(long)]
        topic_count: Option<u64>,
    },
    /// 为HTML文档中的子分类徽章补齐父分类面包屑
    Patch {
        #[arg(long)]
        settings: PathBuf,
        #[arg(long)]
        site: PathBuf,
        input: PathBuf,
    },
}

struct StaticRoute(Option<String>);

impl RouteSource for StaticRoute {
    fn current_route_name(&self) -> Option<String> {
        self.0.clone()
    }
}

fn render(
    settings: &ThemeSettings,
    catalogue: SiteCatalogue,
    category: &str,
    route: Option<String>,
    options: BadgeOptions,
) -> BadgeResult<String> {
    let id: CategoryId = category.parse()?;
    let category = catalogue
        .find_by_id(id)
        .cloned()
        .ok_or_else(|| BadgeError::CategoryNotFound(id.to_string()))?;

    let renderer = CategoryIconsRenderer::new(
        Arc::new(ThemeContext::from_settings(settings)),
        Arc::new(catalogue),
        Arc::new(StaticRoute(route)),
    );
    Ok(renderer.render(&category, &options))
}

fn patch(settings: &ThemeSettings, catalogue: &SiteCatalogue, html: &str) -> String {
    let ctx = ThemeContext::from_settings(settings);
    let patcher = IdempotentPatcher::new(&ctx, catalogue);
    let mut doc = Document::parse(html);

    let now = Instant::now();
    let mut reconciler = Reconciler::new();
    reconciler.request(Trigger::Mutation, now);
    let patched = reconciler.run_due(&mut doc, now, &patcher).unwrap_or_default();
    log::info!("Inserted {} parent breadcrumbs", patched);

    doc.to_html()
}

fn run(cli: Cli) -> BadgeResult<String> {
    match cli.command {
        Commands::Render {
            settings,
            site,
            category,
            route,
            no_link,
            hide_parent,
            topic_count,
        } => {
            let settings = ThemeSettings::from_json_file(settings)?;
            let catalogue = SiteCatalogue::from_json_file(site)?;
            let options = BadgeOptions {
                link: !no_link,
                hide_parent,
                topic_count,
                ..BadgeOptions::default()
            };
            render(&settings, catalogue, &category, route, options)
        }
        Commands::Patch {
            settings,
            site,
            input,
        } => {
            let settings = ThemeSettings::from_json_file(settings)?;
            let catalogue = SiteCatalogue::from_json_file(site)?;
            let html = std::fs::read_to_string(input)?;
            Ok(patch(&settings, &catalogue, &html))
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
