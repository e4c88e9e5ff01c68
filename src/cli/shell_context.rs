use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    ledger::SharedLedger,
};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub ledger: SharedLedger,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub theme: ColorfulTheme,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub fn status(&self) -> String {
        let (smes, transactions) = self
            .ledger
            .read(|store| (store.smes().len(), store.transaction_count()));
        format!(
            "ShellContext {{ running: {}, last_command: {:?}, smes: {}, transactions: {} }}",
            self.running, self.last_command, smes, transactions
        )
    }
}
