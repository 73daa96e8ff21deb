use anyhow::Context;

use anicollect_lib::modules::pipeline::CollectRequest;
use anicollect_lib::shared::{utils::init_logger, AppConfig};

/// `anicollect [start] [end]`
fn parse_args() -> anyhow::Result<CollectRequest> {
    let mut args = std::env::args().skip(1);
    let mut bound = |name: &str| -> anyhow::Result<Option<i64>> {
        args.next()
            .map(|raw| {
                raw.parse::<i64>()
                    .with_context(|| format!("{} ID must be an integer, got '{}'", name, raw))
            })
            .transpose()
    };

    Ok(CollectRequest {
        start: bound("start")?,
        end: bound("end")?,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    let request = parse_args()?;
    let trigger = anicollect_lib::build_trigger(&config).context("failed to initialise pipeline")?;

    let response = trigger.collect(request).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    if !response.success {
        std::process::exit(1);
    }
    Ok(())
}
