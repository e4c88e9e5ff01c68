use crate::cli::commands::usage;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::config::Config;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change shell preferences",
        "config [show|set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        return show_config(context);
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(usage(&format!(
                    "config set <{}> <value>",
                    Config::KEYS.join("|")
                )));
            }
            let key = args[1];
            let value = args[2..].join(" ");
            let mut updated = context.config.clone();
            updated.set_value(key, &value)?;
            context.config = updated;
            context.persist_config()?;
            io::print_success(format!("Updated `{}`.", key));
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config subcommand `{}`",
            other
        ))),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    let config = &context.config;
    output_section("Configuration");
    io::print_info(format!("  currency_symbol   : {}", config.currency_symbol));
    io::print_info(format!("  export_prefix     : {}", config.export_prefix));
    io::print_info(format!("  export_dir        : {}", config.export_dir().display()));
    io::print_info(format!(
        "  default_collector : {}",
        config.default_collector.as_deref().unwrap_or("(none)")
    ));
    io::print_info(format!(
        "  high_contrast     : {}",
        if config.high_contrast { "on" } else { "off" }
    ));
    io::print_info(format!("  file              : {}", context.config_manager.path().display()));
    Ok(())
}
