use crate::cli::commands::usage;
use crate::cli::core::{parse_date, today, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{raw as output_raw, section as output_section};
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::domain::{Displayable, TransactionDraft};
use crate::services::{PaymentService, SearchService};

const PAY_USAGE: &str = "pay <sme_id> <amount> [collector] [YYYY-MM-DD]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "pay",
            "Log a repayment and issue a receipt number",
            PAY_USAGE,
            cmd_pay,
        ),
        CommandEntry::new(
            "txn",
            "Show the daily log, newest first",
            "txn list [search]",
            cmd_txn,
        ),
    ]
}

fn cmd_pay(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let draft = match args {
        [sme_id, amount, rest @ ..] => {
            let collector = match rest.first() {
                Some(name) => name.to_string(),
                None => context.config.default_collector.clone().unwrap_or_default(),
            };
            let date = match rest.get(1) {
                Some(raw) => parse_date(raw)?,
                None => today(),
            };
            TransactionDraft::new(date.format("%Y-%m-%d").to_string(), *sme_id, amount, collector)
        }
        [] if context.can_prompt() => prompt_payment(context)?,
        _ => return Err(usage(PAY_USAGE)),
    };

    let outcome = context
        .ledger
        .write(|store| PaymentService::record(store, &draft))?;

    io::print_success(format!("Payment logged. Receipt {}.", outcome.receipt_id));
    match outcome.balance {
        Some(balance) => {
            io::print_info(format!("Remaining balance: {}", context.format_amount(balance)));
            if outcome.paid_off {
                io::print_success(format!("SME {} has paid off their tool.", draft.sme_id.trim()));
            }
        }
        None => io::print_warning(format!(
            "No SME with ID `{}` is registered; the payment counts toward no balance.",
            draft.sme_id.trim()
        )),
    }
    Ok(())
}

fn prompt_payment(context: &ShellContext) -> Result<TransactionDraft, CommandError> {
    let projection = context.ledger.project();
    let active = SearchService::active_smes(&projection);
    if active.is_empty() {
        return Err(CommandError::InvalidArguments(
            "no active SMEs to record a payment for".into(),
        ));
    }
    let labels: Vec<String> = active
        .iter()
        .map(|entry| {
            format!(
                "{} - balance {}",
                entry.sme().display_label(),
                context.format_amount(entry.balance())
            )
        })
        .collect();
    let Some(choice) = io::select_item(&context.theme, "Select SME", &labels)? else {
        return Err(CommandError::InvalidArguments("payment cancelled".into()));
    };

    let amount = io::prompt_text(&context.theme, "Amount paid", None, false)?;
    let collector = io::prompt_text(
        &context.theme,
        "Collector",
        context.config.default_collector.as_deref(),
        false,
    )?;
    let date = today().format("%Y-%m-%d").to_string();
    let date = io::prompt_text(&context.theme, "Date (YYYY-MM-DD)", Some(date.as_str()), false)?;
    Ok(TransactionDraft::new(
        date,
        active[choice].id().as_str(),
        amount,
        collector,
    ))
}

fn cmd_txn(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let query = match args.split_first() {
        None => String::new(),
        Some((sub, rest)) if sub.eq_ignore_ascii_case("list") => rest.join(" "),
        Some(_) => return Err(usage("txn list [search]")),
    };

    let rows: Vec<Vec<String>> = context.ledger.read(|store| {
        SearchService::search_transactions(store, &query)
            .into_iter()
            .map(|entry| {
                let txn = entry.transaction;
                vec![
                    txn.receipt_id.to_string(),
                    txn.date.format("%Y-%m-%d").to_string(),
                    txn.sme_id.to_string(),
                    entry.sme_label().to_string(),
                    context.format_amount(txn.amount_paid),
                    txn.collector_name.clone(),
                ]
            })
            .collect()
    });

    if rows.is_empty() {
        io::print_info("No transactions found.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        TableColumn::left("Receipt"),
        TableColumn::left("Date"),
        TableColumn::left("SME"),
        TableColumn::left("Name").max_width(24),
        TableColumn::right("Amount"),
        TableColumn::left("Collector").max_width(20),
    ]);
    let count = rows.len();
    for row in rows {
        table.push(row);
    }
    output_section(format!("Daily log ({count})"));
    output_raw(table.render());
    Ok(())
}
