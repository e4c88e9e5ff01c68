use std::fs::File;

use crate::cli::commands::usage;
use crate::cli::core::{today, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{raw as output_raw, section as output_section};
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::report::{export_file_name, write_sme_csv, Receipt};
use crate::services::{SearchService, SummaryService};
use crate::utils::ensure_dir;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "receipt",
            "Show the receipt for a logged payment",
            "receipt <receipt_id>",
            cmd_receipt,
        ),
        CommandEntry::new(
            "dashboard",
            "Portfolio totals and tool distribution",
            "dashboard",
            cmd_dashboard,
        ),
        CommandEntry::new(
            "export",
            "Write the master list to a CSV file",
            "export [filter]",
            cmd_export,
        ),
    ]
}

fn cmd_receipt(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [receipt_id] = args else {
        return Err(usage("receipt <receipt_id>"));
    };
    let receipt = context
        .ledger
        .read(|store| Receipt::for_receipt_id(store, receipt_id))?;

    output_section(format!("Receipt {}", receipt.receipt_id));
    io::print_info(format!("  Date       : {}", receipt.date.format("%Y-%m-%d")));
    io::print_info(format!("  SME        : {} (ID: {})", receipt.sme_name, receipt.sme_id));
    io::print_info(format!("  Collector  : {}", receipt.collector_name));
    io::print_info(format!("  Amount paid: {}", context.format_amount(receipt.amount_paid)));
    io::print_info(format!("  Balance    : {}", context.format_amount(receipt.balance)));
    io::print_info(format!("  Document   : {}", receipt.file_name()));
    Ok(())
}

fn cmd_dashboard(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = SummaryService::dashboard(&context.ledger.project());

    output_section("Dashboard");
    io::print_info(format!("  SMEs            : {}", summary.total_smes));
    io::print_info(format!("  Active          : {}", summary.active_smes));
    io::print_info(format!("  Paid off        : {}", summary.paid_off_smes));
    io::print_info(format!("  Total portfolio : {}", context.format_amount(summary.total_portfolio)));
    io::print_info(format!("  Collected       : {}", context.format_amount(summary.total_collected)));
    io::print_info(format!("  Outstanding     : {}", context.format_amount(summary.outstanding)));
    io::print_info(format!("  Balance due     : {}", context.format_amount(summary.balance_due)));

    if summary.tool_distribution.is_empty() {
        return Ok(());
    }
    let mut table = Table::new(vec![
        TableColumn::left("Tool").max_width(24),
        TableColumn::right("SMEs"),
    ]);
    for tool in &summary.tool_distribution {
        table.push(vec![tool.tool.clone(), tool.count.to_string()]);
    }
    output_section("Tool distribution");
    output_raw(table.render());
    Ok(())
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let query = args.join(" ");
    let projection = context.ledger.project();
    let entries = SearchService::filter_smes(&projection, &query);

    let dir = context.config.export_dir();
    ensure_dir(&dir)?;
    let path = dir.join(export_file_name(&context.config.export_prefix, today()));
    let file = File::create(&path)?;
    write_sme_csv(file, entries.iter().copied())?;

    tracing::info!(path = %path.display(), rows = entries.len(), "exported master list");
    io::print_success(format!(
        "Exported {} SME(s) to {}.",
        entries.len(),
        path.display()
    ));
    Ok(())
}
