use aurelion::{
    catalog::types::NewProduct,
    cli::commands::{
        add::AddCommand, list::ListCommand, overview::OverviewCommand, stats::StatsCommand,
        stock::StockCommand, CommandContext, CommandHandler,
    },
    cli::{Cli, Commands, LogLevel},
    config::ConfigLoader,
    Result,
};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Initialize tracing from the CLI flags; `RUST_LOG` wins when set.
///
/// Logs go to stderr so stdout stays parseable in JSON mode.
fn initialize_tracing(log_level: LogLevel, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_filter_directive()));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn run(cli: Cli) -> Result<()> {
    let loader = ConfigLoader::new_in_current_dir()?;
    let loaded = loader.load(cli.config.as_deref())?;
    let data_file = loader.resolve_data_file(cli.data_file.as_deref(), &loaded);
    let format = cli.format.unwrap_or(loaded.config.output);
    let ctx = CommandContext::new(data_file, format);

    debug!(
        command = cli.command.name(),
        modifies_files = cli.command.modifies_files(),
        data_file = %ctx.data_file.display(),
        "Running command"
    );

    match cli.command {
        Commands::Overview { top } => {
            OverviewCommand::new(ctx, top).execute()?;
        }
        Commands::List {
            category,
            supplier,
            min_price,
            max_price,
            stock,
            name,
        } => {
            let command = ListCommand::new(
                ctx,
                category,
                supplier,
                min_price,
                max_price,
                stock.map(Into::into),
                name,
            )?;
            command.execute()?;
        }
        Commands::Stats { by } => {
            StatsCommand::new(ctx, by.into()).execute()?;
        }
        Commands::Add {
            name,
            category,
            price,
            stock,
            supplier,
            description,
        } => {
            let fields = NewProduct {
                name,
                category,
                price,
                stock,
                description,
                supplier,
            };
            AddCommand::new(ctx, fields).execute()?;
        }
        Commands::Stock {
            product,
            action,
            amount,
        } => {
            StockCommand::new(ctx, product, action.with_amount(amount)).execute()?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    initialize_tracing(cli.log_level, cli.log_json);

    let command = cli.command.name();
    if let Err(e) = run(cli) {
        debug!(command, error = ?e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
