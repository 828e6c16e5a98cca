use ad_dashboard_feed::cli::{args::Args, commands};
use clap::Parser;
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let shutdown_signal = async {
            if tokio::signal::ctrl_c().await.is_err() {
                // No signal handler; never resolve
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            result = commands::run(args) => result,
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(ad_dashboard_feed::Error::processing_interrupted(
                    "Export interrupted by user",
                )
                .into())
            }
        }
    });

    if let Err(error) = result {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Ad Dashboard Feed - advertising report sheets to dashboard JSON");
    println!("===============================================================");
    println!();
    println!("Reads the ad group, performance and gender report sheets exported as CSV");
    println!("and writes the JSON payload consumed by the campaign dashboard.");
    println!();
    println!("USAGE:");
    println!("    ad-dashboard-feed <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    export      Build the dashboard payload from a directory of sheet exports");
    println!("    schemas     Print the validated sheet schemas");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Write the payload for a directory of exports to stdout:");
    println!("    ad-dashboard-feed export --input ./exports");
    println!();
    println!("    # Pretty-printed, all sheets read concurrently, into a file:");
    println!("    ad-dashboard-feed export -i ./exports -o feed.json --pretty --concurrent");
    println!();
    println!("    # Check a custom sheet configuration:");
    println!("    ad-dashboard-feed schemas --config ./feed.json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    ad-dashboard-feed <COMMAND> --help");
}
