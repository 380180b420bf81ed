use crate::store::{CorruptPolicy, TaskStore};
use config::ConfigBuilder;
use config::builder::DefaultState;
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_TASKS_FILE: &str = "tasks.json";
/// Optional config file looked up in the working directory, any extension `config` understands.
pub const CONFIG_FILE: &str = "task-cli";
pub const ENV_PREFIX: &str = "TASK_CLI";

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Config {
    pub tasks_file: PathBuf,
    /// Refuse to load an unparsable task file instead of treating it as empty.
    pub strict: bool,
}

impl Config {
    /// Loads configuration from `task-cli.toml` (if present) and `TASK_CLI_*` environment variables.
    pub fn load() -> anyhow::Result<Self> {
        Self::from_builder(
            config::Config::builder()
                .add_source(config::File::with_name(CONFIG_FILE).required(false))
                .add_source(config::Environment::with_prefix(ENV_PREFIX)),
        )
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<Self> {
        let settings = builder
            .set_default("tasks_file", DEFAULT_TASKS_FILE)?
            .set_default("strict", false)?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn store(&self) -> TaskStore {
        let policy = if self.strict {
            CorruptPolicy::Fail
        } else {
            CorruptPolicy::Recover
        };
        TaskStore::new(&self.tasks_file).with_corrupt_policy(policy)
    }
}
