use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::ledger::LedgerStore;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new(
            "demo",
            "Load the sample SMEs into an empty registry",
            "demo",
            cmd_demo,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(command) = args.first().map(|name| name.to_lowercase()) {
        if let Some(command) = context.command(&command) {
            help::print_command(command);
        } else {
            context.suggest_command(args[0]);
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_demo(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let loaded = context.ledger.write(|store| {
        if !store.smes().is_empty() || store.transaction_count() > 0 {
            return Ok(None);
        }
        *store = LedgerStore::with_demo_data()?;
        Ok(Some(store.smes().len()))
    })?;

    match loaded {
        Some(count) => {
            io::print_success(format!("Loaded {count} demo SMEs."));
            Ok(())
        }
        None => Err(CommandError::InvalidArguments(
            "demo data can only be loaded into an empty ledger".into(),
        )),
    }
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
