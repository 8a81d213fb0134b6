use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "taskpage", about = "Headless driver for the todo task-list page")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Override the configured server base URL.
    #[arg(long, global = true)]
    pub server_url: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Send one completion-toggle request and print the JSON result.
    Toggle(ToggleArgs),
    /// Enhance a page snapshot, fire activations, print the final page state.
    Run(RunArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ToggleArgs {
    /// Task identifier, as carried by the control's data attribute.
    pub task_id: String,

    /// CSRF token to send; requests go out without the header when omitted.
    #[arg(long)]
    pub csrf_token: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RunArgs {
    /// Path to the page snapshot JSON.
    #[arg(long)]
    pub page: String,

    /// Task to activate once the page is enhanced. Repeatable.
    #[arg(long = "activate", action = clap::ArgAction::Append)]
    pub activate: Vec<String>,
}
