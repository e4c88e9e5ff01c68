//! `help` output, rendered from the command registry.

use crate::cli::io;
use crate::cli::output::{raw as output_raw, section as output_section};
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::cli::table::{Table, TableColumn};

pub fn print_overview(registry: &CommandRegistry) {
    output_section("Commands");
    output_raw(overview_table(registry).render());
    io::print_hint("Run `help <command>` for its arguments. Tab completes SME and receipt ids.");
}

pub fn print_command(entry: &CommandEntry) {
    output_section(entry.name);
    io::print_info(format!("  {}", entry.description));
    for (idx, form) in usage_forms(entry.usage).enumerate() {
        let label = if idx == 0 { "Usage:" } else { "      " };
        io::print_info(format!("  {label} {form}"));
    }
}

fn overview_table(registry: &CommandRegistry) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("Command"),
        TableColumn::left("Description").max_width(56),
    ]);
    for entry in registry.list() {
        table.push(vec![entry.name.to_string(), entry.description.to_string()]);
    }
    table
}

/// Alternative invocations in a usage string are separated by ` | `.
pub(crate) fn usage_forms(usage: &str) -> impl Iterator<Item = &str> {
    usage
        .split(" | ")
        .map(str::trim)
        .filter(|form| !form.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    #[test]
    fn overview_lists_commands_in_registration_order() {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        let table = overview_table(&registry);

        let names: Vec<&str> = table.rows.iter().map(|row| row[0].as_str()).collect();
        assert_eq!(&names[..3], &["help", "demo", "exit"]);
        assert!(names.contains(&"receipt"));
        assert_eq!(names.len(), registry.list().len());
    }

    #[test]
    fn usage_forms_split_alternatives_only() {
        let forms: Vec<&str> = usage_forms("sme remove <id> | sme list [filter]").collect();
        assert_eq!(forms, vec!["sme remove <id>", "sme list [filter]"]);

        let single: Vec<&str> = usage_forms("config [show|set <key> <value>]").collect();
        assert_eq!(single, vec!["config [show|set <key> <value>]"]);
    }
}
