use crate::cli::commands::usage;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{raw as output_raw, section as output_section};
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::currency::format_number;
use crate::domain::{Displayable, SmeDraft};
use crate::errors::LedgerError;
use crate::ledger::ProjectedSme;
use crate::services::SearchService;

const SME_USAGE: &str = "sme <add|edit|remove|list|show>";
const ADD_USAGE: &str = "sme add <name> <tool> <total_cost> <daily_rate> [phone]";
const EDIT_USAGE: &str = "sme edit <id> <name> <tool> <total_cost> <daily_rate> [phone]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "sme",
        "Register, edit, remove and list SMEs",
        "sme add <name> <tool> <total_cost> <daily_rate> [phone] | sme edit <id> ... | sme remove <id> | sme list [filter] | sme show <id>",
        cmd_sme,
    )]
}

fn cmd_sme(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(usage(SME_USAGE));
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "add" => handle_add(context, rest),
        "edit" => handle_edit(context, rest),
        "remove" | "delete" => handle_remove(context, rest),
        "list" => handle_list(context, rest),
        "show" => handle_show(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown sme subcommand `{}`",
            other
        ))),
    }
}

fn draft_from_args(args: &[&str]) -> Option<SmeDraft> {
    match args {
        [name, tool, cost, rate, rest @ ..] => {
            let draft = SmeDraft::new(*name, *tool)
                .total_cost(cost)
                .daily_rate(rate);
            Some(match rest.first() {
                Some(phone) => draft.phone(*phone),
                None => draft,
            })
        }
        _ => None,
    }
}

fn prompt_draft(context: &ShellContext, initial: &SmeDraft) -> Result<SmeDraft, CommandError> {
    let theme = &context.theme;
    Ok(SmeDraft {
        name: io::prompt_text(theme, "Name", prefill(&initial.name), false)?,
        phone: io::prompt_text(theme, "Phone", prefill(&initial.phone), true)?,
        tool_given: io::prompt_text(theme, "Tool given", prefill(&initial.tool_given), false)?,
        total_cost: io::prompt_text(theme, "Total cost", prefill(&initial.total_cost), false)?,
        daily_rate: io::prompt_text(theme, "Daily rate", prefill(&initial.daily_rate), false)?,
    })
}

fn prefill(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let draft = match draft_from_args(args) {
        Some(draft) => draft,
        None if args.is_empty() && context.can_prompt() => prompt_draft(context, &SmeDraft::default())?,
        None => return Err(usage(ADD_USAGE)),
    };

    let id = context.ledger.write(|store| store.add_sme(&draft))?;
    io::print_success(format!(
        "Registered `{}` with ID {}.",
        draft.name.trim(),
        id
    ));
    Ok(())
}

fn handle_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((id, rest)) = args.split_first() else {
        return Err(usage(EDIT_USAGE));
    };

    let draft = match draft_from_args(rest) {
        Some(draft) => draft,
        None if rest.is_empty() && context.can_prompt() => {
            let current = context
                .ledger
                .read(|store| store.sme(id).cloned())
                .ok_or_else(|| LedgerError::not_found(format!("SME `{id}`")))?;
            let initial = SmeDraft {
                name: current.name,
                phone: current.phone,
                tool_given: current.tool_given,
                total_cost: current.total_cost.to_string(),
                daily_rate: current.daily_rate.to_string(),
            };
            prompt_draft(context, &initial)?
        }
        None => return Err(usage(EDIT_USAGE)),
    };

    context.ledger.write(|store| store.update_sme(id, &draft))?;
    io::print_success(format!("Updated SME {}.", id));
    Ok(())
}

fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(usage("sme remove <id>"));
    };

    let (label, payments) = context.ledger.read(|store| {
        store
            .sme(id)
            .map(|sme| (sme.display_label(), store.transactions_for(id).count()))
    })
    .ok_or_else(|| LedgerError::not_found(format!("SME `{id}`")))?;

    if payments > 0 {
        io::print_warning(format!(
            "{} has {} logged payment(s); they stay in the daily log without an SME.",
            label, payments
        ));
        if context.can_prompt()
            && !io::confirm_action(&context.theme, &format!("Remove {label}?"), false)?
        {
            io::print_info("Operation cancelled.");
            return Ok(());
        }
    }

    context.ledger.write(|store| store.delete_sme(id))?;
    io::print_success(format!("Removed {}.", label));
    Ok(())
}

fn handle_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let query = args.join(" ");
    let projection = context.ledger.project();
    let matches = SearchService::filter_smes(&projection, &query);
    if matches.is_empty() {
        io::print_info("No SMEs found.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        TableColumn::left("ID"),
        TableColumn::left("Name").max_width(24),
        TableColumn::left("Tool").max_width(20),
        TableColumn::right("Cost"),
        TableColumn::right("Paid"),
        TableColumn::right("Balance"),
        TableColumn::left("Status"),
        TableColumn::right("Progress"),
    ]);
    for entry in &matches {
        table.push(sme_row(context, entry));
    }
    output_section(format!("SMEs ({})", matches.len()));
    output_raw(table.render());
    Ok(())
}

fn sme_row(context: &ShellContext, entry: &ProjectedSme) -> Vec<String> {
    let sme = entry.sme();
    vec![
        sme.id.to_string(),
        sme.name.clone(),
        sme.tool_given.clone(),
        context.format_amount(sme.total_cost),
        context.format_amount(entry.total_paid()),
        context.format_amount(entry.balance()),
        entry.status().to_string(),
        format!("{}%", format_number(entry.progress(), 0)),
    ]
}

fn handle_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(usage("sme show <id>"));
    };
    let projection = context.ledger.project();
    let entry = projection
        .get(id)
        .ok_or_else(|| LedgerError::not_found(format!("SME `{id}`")))?;
    let sme = entry.sme();

    output_section(sme.display_label());
    io::print_info(format!("  Phone      : {}", sme.phone));
    io::print_info(format!("  Tool       : {}", sme.tool_given));
    io::print_info(format!("  Total cost : {}", context.format_amount(sme.total_cost)));
    io::print_info(format!("  Daily rate : {}", context.format_amount(sme.daily_rate)));
    io::print_info(format!("  Paid       : {}", context.format_amount(entry.total_paid())));
    io::print_info(format!("  Balance    : {}", context.format_amount(entry.balance())));
    io::print_info(format!("  Status     : {}", entry.status()));

    let payments: Vec<Vec<String>> = context.ledger.read(|store| {
        store
            .transactions_for(id)
            .map(|txn| {
                vec![
                    txn.receipt_id.to_string(),
                    txn.date.format("%Y-%m-%d").to_string(),
                    context.format_amount(txn.amount_paid),
                    txn.collector_name.clone(),
                ]
            })
            .collect()
    });
    if payments.is_empty() {
        io::print_info("  No payments logged yet.");
        return Ok(());
    }
    let mut table = Table::new(vec![
        TableColumn::left("Receipt"),
        TableColumn::left("Date"),
        TableColumn::right("Amount"),
        TableColumn::left("Collector"),
    ]);
    for row in payments {
        table.push(row);
    }
    output_raw(table.render());
    Ok(())
}
