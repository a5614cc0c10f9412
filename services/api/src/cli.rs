use crate::demo::{run_demo, run_vendor_import, DemoArgs, VendorImportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use procure_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Procurement Workflow Service",
    about = "Demonstrate and run the procurement workflow backend from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Manage the vendor directory
    Vendors {
        #[command(subcommand)]
        command: VendorCommand,
    },
    /// Run an end-to-end CLI demo covering intake, dispatch, and comparison
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum VendorCommand {
    /// Import vendors from a CSV export (Name,Email,Category)
    Import(VendorImportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Vendors {
            command: VendorCommand::Import(args),
        } => run_vendor_import(args),
        Command::Demo(args) => run_demo(args).await,
    }
}
