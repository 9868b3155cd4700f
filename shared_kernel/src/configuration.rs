use anyhow::Context;
use serde::de::DeserializeOwned;
use std::path::PathBuf;

const CONFIGURATION_DIR: &str = "configuration";

/// Reads `configuration/base.yaml` (`test.yaml` under `cargo test`) from the
/// working directory, then layers `APP_`-prefixed environment variables on
/// top, with `__` separating nesting levels: `APP_CACHE__DIR=/tmp/calendars`
/// overrides `cache.dir`.
pub fn config<Settings: DeserializeOwned>() -> anyhow::Result<Settings> {
    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_file()?))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .context("Failed to build configuration")?;

    settings
        .try_deserialize::<Settings>()
        .context("Failed to deserialize settings")
}

fn configuration_file() -> anyhow::Result<PathBuf> {
    let working_dir =
        std::env::current_dir().context("Failed to determine the current directory")?;
    let file = if cfg!(test) { "test.yaml" } else { "base.yaml" };
    Ok(working_dir.join(CONFIGURATION_DIR).join(file))
}
