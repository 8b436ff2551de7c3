use std::path::{Path, PathBuf};
use std::sync::Arc;

use action_chain::{Actions, ExecutionTarget};

use crate::config::Config;

pub struct CliContext {
    config: Arc<Config>,
    config_path: PathBuf,
}

impl CliContext {
    pub fn new(config: Config, config_path: PathBuf) -> Self {
        Self {
            config: Arc::new(config),
            config_path,
        }
    }

    pub fn config(&self) -> &Config {
        self.config.as_ref()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// A builder for the target carrying the configured interaction policy
    pub fn actions(&self, target: Arc<dyn ExecutionTarget>) -> Actions {
        Actions::new(target).with_policy(self.config.interaction.clone())
    }
}
