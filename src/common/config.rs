use std::time::Duration;

use anyhow::{Result, bail};
use serde::Deserialize;

use crate::common::endpoint::Endpoint;

pub const ENV_PREFIX: &str = "MESOS_WATCH";

#[derive(Debug, Deserialize, Clone)]
pub struct WatchConfig {
    /// Any member of the cluster; it does not need to be the leader.
    pub master_host: String,
    pub master_port: u16,
    pub state_path: String,
    /// Private IP the agent registers with.
    pub agent_ip: String,
    pub poll_interval_secs: u64,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub tcp_keepalive_secs: u64,
}

impl WatchConfig {
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.master_host.clone(), self.master_port, self.state_path.clone())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn tcp_keepalive(&self) -> Duration {
        Duration::from_secs(self.tcp_keepalive_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.master_host.trim().is_empty() {
            bail!("master host is not configured (--mip or {ENV_PREFIX}_MASTER_HOST)");
        }
        if self.agent_ip.trim().is_empty() {
            bail!("agent private ip is not configured (--sip or {ENV_PREFIX}_AGENT_IP)");
        }
        if self.poll_interval_secs == 0 {
            bail!("poll interval must be at least one second");
        }
        if self.timeout_secs == 0 {
            bail!("timeout must be at least one second");
        }
        Ok(())
    }
}

/// Values given on the command line. They win over every other source.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WatchArgs {
    pub config_path: Option<String>,
    pub master_host: Option<String>,
    pub master_port: Option<String>,
    pub state_path: Option<String>,
    pub agent_ip: Option<String>,
    pub poll_interval_secs: Option<String>,
    pub timeout_secs: Option<String>,
}

impl WatchArgs {
    /// Reads `--flag value` and `--flag=value`; a single leading dash works too.
    pub fn parse<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        let value_of = |flag: &str| {
            args.iter().enumerate().find_map(|(i, arg)| {
                let name = arg.strip_prefix('-')?.trim_start_matches('-');
                match name.split_once('=') {
                    Some((name, value)) if name == flag => Some(value.to_string()),
                    None if name == flag => args.get(i + 1).cloned(),
                    _ => None,
                }
            })
        };
        Self {
            config_path: value_of("config"),
            master_host: value_of("mip"),
            master_port: value_of("mport"),
            state_path: value_of("mapi"),
            agent_ip: value_of("sip"),
            poll_interval_secs: value_of("interval"),
            timeout_secs: value_of("timeout"),
        }
    }
}

/// Layers defaults, the optional config file, `MESOS_WATCH_*` environment
/// variables and the command line, in increasing order of precedence.
pub fn load_watch_config(args: &WatchArgs) -> Result<WatchConfig> {
    let mut builder = config::Config::builder()
        .set_default("master_host", "")?
        .set_default("master_port", 5050_i64)?
        .set_default("state_path", "/state")?
        .set_default("agent_ip", "")?
        .set_default("poll_interval_secs", 15_i64)?
        .set_default("timeout_secs", 90_i64)?
        .set_default("connect_timeout_secs", 30_i64)?
        .set_default("tcp_keepalive_secs", 300_i64)?;

    if let Some(path) = &args.config_path {
        log::debug!("Reading watch config from {}", path);
        builder = builder.add_source(config::File::with_name(path));
    }

    let config: WatchConfig = builder
        .add_source(config::Environment::with_prefix(ENV_PREFIX))
        .set_override_option("master_host", args.master_host.clone())?
        .set_override_option("master_port", args.master_port.clone())?
        .set_override_option("state_path", args.state_path.clone())?
        .set_override_option("agent_ip", args.agent_ip.clone())?
        .set_override_option("poll_interval_secs", args.poll_interval_secs.clone())?
        .set_override_option("timeout_secs", args.timeout_secs.clone())?
        .build()?
        .try_deserialize()?;

    config.validate()?;
    Ok(config)
}
