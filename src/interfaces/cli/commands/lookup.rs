//! lookup command

use colored::Colorize;

use crate::controller::{LookupController, LookupOutcome};
use crate::interfaces::cli::CliError;
use crate::runtime::lifetime::startup::ClientContext;
use crate::services::GeoResult;

/// 打印查询结果
pub fn print_geo_result(result: &GeoResult) {
    let rows = [
        ("IP", &result.ip),
        ("City", &result.city),
        ("Region", &result.region),
        ("Country", &result.country),
        ("Postal", &result.postal),
        ("Timezone", &result.timezone),
        ("Org", &result.org),
    ];

    for (label, value) in rows {
        if !value.is_empty() {
            println!("  {:<10} {}", format!("{}:", label).dimmed(), value);
        }
    }
    if let Some((lat, lon)) = result.coordinates() {
        println!(
            "  {:<10} {:.4}, {:.4}",
            "Location:".dimmed(),
            lat,
            lon
        );
    }
}

/// 把一次查询的结果转成命令输出；失败时用控制器设置的提示信息
pub(super) fn report_outcome(
    controller: &LookupController,
    outcome: LookupOutcome,
) -> Result<(), CliError> {
    match outcome {
        LookupOutcome::Applied(result) => {
            println!("{}", "Geolocation:".bold().green());
            print_geo_result(&result);
            // 查询成功但历史写入失败
            if let Some(message) = controller.view().error {
                eprintln!("{} {}", "⚠".yellow(), message.yellow());
            }
            Ok(())
        }
        LookupOutcome::Failed(err) => {
            let message = controller
                .view()
                .error
                .unwrap_or_else(|| err.message().to_string());
            Err(CliError::LookupError(message))
        }
        LookupOutcome::Superseded | LookupOutcome::Ignored => Ok(()),
    }
}

/// 查询指定地址；未给出地址时查询自身地址（不写入历史）
pub async fn lookup(ctx: &ClientContext, ip: Option<String>) -> Result<(), CliError> {
    ctx.session.require_token()?;
    let controller = &ctx.controller;
    controller.load_history();

    let outcome = match ip {
        Some(ip) => controller.submit(&ip).await,
        None => controller.clear_search().await,
    };
    report_outcome(controller, outcome)
}
