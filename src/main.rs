// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::{bail, Context};
use baidurs::config::settings::Settings;
use baidurs::utils::telemetry;
use baidurs::{SearchService, SearchType};
use tracing::info;

const USAGE: &str = "usage: baidurs [web|image|news|video|academic] <query...>";

/// 主函数
///
/// 解析命令行参数，执行一次搜索并以 JSON 输出结果
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::new().context("failed to load configuration")?;
    telemetry::init_telemetry(settings.log.format);

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let search_type = match args.first().map(|arg| arg.parse::<SearchType>()) {
        Some(Ok(search_type)) => {
            args.remove(0);
            search_type
        }
        _ => settings.search.default_type,
    };

    let query = args.join(" ");
    if query.trim().is_empty() {
        bail!(USAGE);
    }

    info!("Starting {} search for '{}'", search_type, query);

    let service = SearchService::new(settings.client)?;
    let results = service
        .search(&query, settings.search.default_count, 1, search_type)
        .await?;

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
