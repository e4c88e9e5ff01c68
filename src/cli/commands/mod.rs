pub mod config;
pub mod report;
pub mod sme;
pub mod system;
pub mod transaction;

use crate::cli::core::CommandError;
use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let definitions = system::definitions()
        .into_iter()
        .chain(sme::definitions())
        .chain(transaction::definitions())
        .chain(report::definitions())
        .chain(config::definitions());
    for entry in definitions {
        registry.register(entry);
    }
}

pub(crate) fn usage(text: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {text}"))
}
