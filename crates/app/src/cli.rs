//! Command-line surface: one subcommand group per page.

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "stockledger",
    about = "Stock levels, outgoing/incoming orders and movement history",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "STOCKLEDGER_API_URL",
        help = "Backend base URL (defaults to the hosted API)"
    )]
    pub api_url: Option<String>,

    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render page output as pretty JSON"
    )]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Stock items: list, add, update, delete.
    #[command(subcommand)]
    Stock(StockCommands),
    /// Send stock out or take it back in.
    #[command(subcommand)]
    Orders(OrdersCommands),
    /// Movement ledger with totals.
    #[command(subcommand)]
    History(HistoryCommands),
}

#[derive(Debug, Subcommand)]
pub enum StockCommands {
    List(SearchArgs),
    Add(StockFormArgs),
    Update(StockUpdateArgs),
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    #[arg(long, default_value = "", help = "Case-insensitive substring to match")]
    pub search: String,
}

/// Raw form fields; validated by the domain layer, not by clap.
#[derive(Debug, Args)]
pub struct StockFormArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, allow_hyphen_values = true)]
    pub price: String,
    #[arg(long, allow_hyphen_values = true)]
    pub quantity: String,
}

#[derive(Debug, Args)]
pub struct StockUpdateArgs {
    pub id: String,
    #[command(flatten)]
    pub form: StockFormArgs,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub id: String,
    #[arg(long, action = ArgAction::SetTrue, help = "Confirm the deletion")]
    pub yes: bool,
}

#[derive(Debug, Subcommand)]
pub enum OrdersCommands {
    /// Totals and the items available to move.
    Overview,
    /// Send units out of stock.
    Send(MovementArgs),
    /// Return units to stock.
    Return(MovementArgs),
}

#[derive(Debug, Args)]
pub struct MovementArgs {
    #[arg(long, help = "Stock item id")]
    pub item: String,
    #[arg(long, allow_hyphen_values = true)]
    pub quantity: String,
    #[arg(
        long,
        action = ArgAction::SetTrue,
        help = "Show the movement value without recording it"
    )]
    pub preview: bool,
}

#[derive(Debug, Subcommand)]
pub enum HistoryCommands {
    List(HistoryListArgs),
    Update(HistoryUpdateArgs),
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
pub struct HistoryListArgs {
    #[arg(long, default_value = "", help = "Match description or classification")]
    pub search: String,
    #[arg(long = "type", default_value = "all", help = "all, income or expenses")]
    pub kind: String,
}

#[derive(Debug, Args)]
pub struct HistoryUpdateArgs {
    pub id: String,
    #[arg(long)]
    pub classification: String,
    #[arg(long)]
    pub description: String,
    #[arg(long, help = "Stock item id")]
    pub item: String,
    #[arg(long = "type", help = "income or expenses")]
    pub kind: String,
    #[arg(long, allow_hyphen_values = true)]
    pub value: String,
}
