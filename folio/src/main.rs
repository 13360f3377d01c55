use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use folio::{commands::contact::ContactCommand, environment::Environment};
use folio_utils::folio_version;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Command::Completion { shell } = cli.command {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            env!("CARGO_BIN_NAME"),
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    init_tracing();

    let config = folio_config::load().context("Failed to load config")?;

    match cli.command {
        Command::Contact { command } => command.invoke(config).await?,
        Command::CheckConfig { verbose } => {
            let environment = Environment::new(&config)?;
            if verbose {
                println!("{config:#?}");
                println!("{:#?}", environment.contact_form);
            }
        }
        Command::Completion { .. } => unreachable!(),
    }

    Ok(())
}

#[derive(Debug, Parser)]
#[command(version = folio_version())]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Drive the contact form against the configured email relay
    #[command(aliases(["c"]))]
    Contact {
        #[command(subcommand)]
        command: ContactCommand,
    },
    /// Validate configuration and the services built from it
    #[command(aliases(["check"]))]
    CheckConfig {
        /// Print the config and the resulting contact form setup
        #[arg(short, long)]
        verbose: bool,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    #[cfg(tracing_pretty)]
    let fmt_layer = fmt_layer.pretty();

    tracing_subscriber::registry()
        .with(
            fmt_layer.with_filter(
                EnvFilter::builder()
                    .with_default_directive(LevelFilter::WARN.into())
                    .from_env_lossy(),
            ),
        )
        .init();
}
