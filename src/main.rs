use clap::Parser;
use passvault::cli::{commands, Cli, Commands};
use passvault::password::CharsetFlags;
use tracing_subscriber::EnvFilter;

fn main() {
    // Diagnostics go to stderr; `RUST_LOG=passvault=debug` shows vault and sync decisions.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("passvault=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init::execute(&cli),
        Commands::Add {
            ref title,
            ref username,
            generate,
        } => commands::add::execute(&cli, title, username, generate),
        Commands::List => commands::list::execute(&cli),
        Commands::Show { number } => commands::show::execute(&cli, number),
        Commands::Copy {
            number,
            clear_after,
        } => commands::copy::execute(&cli, number, clear_after),
        Commands::Edit {
            number,
            ref title,
            ref username,
            password,
        } => commands::edit::execute(&cli, number, title.as_deref(), username.as_deref(), password),
        Commands::Delete { number, force } => commands::delete::execute(&cli, number, force),
        Commands::Generate {
            length,
            no_lower,
            no_upper,
            no_digits,
            no_symbols,
        } => commands::generate::execute(
            length,
            CharsetFlags {
                lower: !no_lower,
                upper: !no_upper,
                digits: !no_digits,
                symbols: !no_symbols,
            },
        ),
        Commands::Strength { ref password } => commands::strength::execute(password.as_deref()),
        Commands::Health => commands::health::execute(&cli),
        Commands::Sync => commands::sync::execute(&cli),
        Commands::Upload => commands::upload::execute(&cli),
        Commands::Download { ref name } => commands::download::execute(&cli, name.as_deref()),
        Commands::Account { ref action } => commands::account::execute(action),
        #[cfg(feature = "audit-log")]
        Commands::Audit { last, ref since } => {
            commands::audit_cmd::execute(&cli, last, since.as_deref())
        }
        #[cfg(not(feature = "audit-log"))]
        Commands::Audit { .. } => Err(passvault::errors::PassVaultError::CommandFailed(
            "built without the audit-log feature".into(),
        )),
        Commands::Completions { shell } => commands::completions::execute(shell),
    };

    if let Err(e) = result {
        passvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
