use std::process::ExitCode;

use mesos_agent_watch::common::config::WatchArgs;
use mesos_agent_watch::watch_start;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = WatchArgs::parse(std::env::args());
    let registered = watch_start(&args).await?;
    println!("Agent registered: {}", registered);

    if registered {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
