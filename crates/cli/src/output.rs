use colored::Colorize;
use deltascope_inspect::{ApprovalChange, TokenTransfer, TransactionFailure, TransactionSummary};
use tabled::{builder::Builder, settings::Style};

const WATCH_MARK: &str = "★";

/// Whether `address` is on the watch list. Comparison ignores case.
pub(crate) fn is_watched(address: &str, watch: &[String]) -> bool {
    watch.iter().any(|watched| watched.eq_ignore_ascii_case(address))
}

fn mark(watched: bool) -> &'static str {
    if watched {
        WATCH_MARK
    } else {
        ""
    }
}

/// Render the header, tables and warnings of a decoded transaction.
pub(crate) fn render_summary(summary: &TransactionSummary, watch: &[String]) -> String {
    let status = if summary.succeeded() { "SUCCESS".green() } else { "FAIL".red() };
    let block =
        summary.block_number.map(|block| block.to_string()).unwrap_or_else(|| "pending".to_string());

    let mut lines = vec![
        "=".repeat(80),
        format!(
            "Tx: {} | Chain: {} | Block: {} | Status: {}",
            summary.tx_hash, summary.chain, block, status
        ),
        format!("From: {} -> To: {}", summary.from, summary.to.as_deref().unwrap_or("-")),
        format!("ETH value: {} | Fee ETH: {}", summary.value_eth, summary.fee_eth),
    ];

    lines.push(String::new());
    if summary.transfers.is_empty() {
        lines.push("Token transfers: none".to_string());
    } else {
        lines.push("Token transfers:".to_string());
        lines.push(transfers_table(&summary.transfers, watch));
    }

    lines.push(String::new());
    if summary.approvals.is_empty() {
        lines.push("Approvals: none".to_string());
    } else {
        lines.push("Approvals:".to_string());
        lines.push(approvals_table(&summary.approvals, watch));
    }

    if !summary.warnings.is_empty() {
        lines.push(String::new());
        lines.push("Warnings:".yellow().to_string());
        lines.extend(summary.warnings.iter().map(|warning| format!("  - {warning}")));
    }

    lines.join("\n")
}

/// Render a transaction that couldn't be inspected.
pub(crate) fn render_failure(failure: &TransactionFailure) -> String {
    format!("{} {}: {}", "[error]".red(), failure.tx_hash, failure.reason)
}

fn transfers_table(transfers: &[TokenTransfer], watch: &[String]) -> String {
    let mut builder = Builder::default();
    builder.push_record(
        ["*", "Std", "Sym", "Token", "From", "To", "TokenID", "Amount"].map(String::from),
    );

    for transfer in transfers {
        let watched = is_watched(&transfer.from, watch) || is_watched(&transfer.to, watch);
        builder.push_record([
            mark(watched).to_string(),
            transfer.standard.to_string(),
            transfer.symbol.clone(),
            transfer.token.clone(),
            transfer.from.clone(),
            transfer.to.clone(),
            transfer.token_id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
            transfer.amount.clone(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::markdown());
    table.to_string()
}

fn approvals_table(approvals: &[ApprovalChange], watch: &[String]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["*", "Sym", "Token", "Owner", "Spender", "Amount"].map(String::from));

    for approval in approvals {
        let watched = is_watched(&approval.owner, watch) || is_watched(&approval.spender, watch);
        builder.push_record([
            mark(watched).to_string(),
            approval.symbol.clone(),
            approval.token.clone(),
            approval.owner.clone(),
            approval.spender.clone(),
            approval.amount.clone(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::markdown());
    table.to_string()
}
