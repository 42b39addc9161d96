use crate::command::Command;
use crate::config::Config;
use crate::error::Error;
use crate::store::{Dialect, Store};
use clap::Parser;
use eyre::{WrapErr, bail};
use std::io::Write;
use std::path::PathBuf;
use tracing::{Level, info};

mod checks;
mod command;
mod config;
mod display;
mod error;
mod model;
mod repl;
mod store;

#[derive(Parser)]
#[command(version, author, about, long_about = None)]
struct Args {
    #[arg(short, long, value_name = "FILE")]
    /// Use FILE instead of hackbright.toml
    config: Option<PathBuf>,
    #[arg(short, long, value_name = "URL")]
    /// Connect to URL instead of the configured database
    database: Option<String>,
    #[arg(long)]
    /// Create missing tables before running
    init: bool,
    #[arg(short, action = clap::ArgAction::Count)]
    /// Set verbosity level
    verbose: u8,
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    /// Run this single command instead of starting the console
    command: Vec<String>,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let level = match args.verbose {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    let mut config = Config::load_or_default(args.config.as_deref())?;
    if let Some(url) = args.database {
        config.database.url = url;
    }
    config.database.create_schema |= args.init;
    let Some(dialect) = Dialect::from_url(&config.database.url) else {
        bail!("unsupported database URL: {}", config.database.url);
    };
    let store = Store::connect(&config, dialect)
        .await
        .wrap_err_with(|| format!("cannot connect to {}", config.database.url))?;
    let result = if args.command.is_empty() {
        repl::run(&store, tokio::io::BufReader::new(tokio::io::stdin()), &mut std::io::stdout()).await
    } else {
        one_shot(&store, &args.command, &mut std::io::stdout()).await
    };
    store.close().await;
    info!("database connection closed");
    result
}

/// Run a single command. Failures are returned so that they end up in the
/// process exit status.
async fn one_shot<W: Write>(store: &Store, tokens: &[String], output: &mut W) -> eyre::Result<()> {
    let tokens = tokens.iter().map(String::as_str).collect::<Vec<_>>();
    let Some((name, args)) = tokens.split_first() else {
        return Ok(());
    };
    let command = Command::from_tokens(name, args).map_err(Error::from)?;
    let text = repl::execute(store, &command).await?;
    if !text.is_empty() {
        writeln!(output, "{text}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(|&a| a.to_owned()).collect()
    }

    #[test]
    fn command_arguments_may_start_with_a_hyphen() {
        let args = Args::try_parse_from(["hbtracker", "-v", "assign_grade", "jhacker", "Markov", "-5"])
            .unwrap();
        assert_eq!(args.verbose, 1);
        assert_eq!(args.command, tokens(&["assign_grade", "jhacker", "Markov", "-5"]));
        let args = Args::try_parse_from([
            "hbtracker",
            "new_project",
            "Markov",
            "50",
            "Tweets",
            "-",
            "--draft",
        ])
        .unwrap();
        assert_eq!(
            args.command,
            tokens(&["new_project", "Markov", "50", "Tweets", "-", "--draft"])
        );
    }

    #[test]
    fn options_before_the_command() {
        let args = Args::try_parse_from(["hbtracker", "-d", "sqlite::memory:", "--init"]).unwrap();
        assert_eq!(args.database.as_deref(), Some("sqlite::memory:"));
        assert!(args.init);
        assert!(args.command.is_empty());
    }

    #[cfg(feature = "sqlite")]
    mod single_command {
        use super::*;
        use crate::store::tests::hackbright_store;

        #[tokio::test]
        async fn successful_command() {
            let store = hackbright_store().await;
            let mut output = Vec::new();
            one_shot(&store, &tokens(&["assign_grade", "jhacker", "Tic-Tac-Toe", "-5"]), &mut output)
                .await
                .unwrap();
            assert_eq!(
                String::from_utf8(output).unwrap(),
                "Successfully added a grade: jhacker got -5 on their project Tic-Tac-Toe\n"
            );
            assert_eq!(store.get_grade("jhacker", "Tic-Tac-Toe").await.unwrap(), -5);
        }

        #[tokio::test]
        async fn unknown_student_fails() {
            let store = hackbright_store().await;
            let mut output = Vec::new();
            let err = one_shot(&store, &tokens(&["student", "nobody"]), &mut output)
                .await
                .unwrap_err();
            assert_eq!(err.to_string(), "no student with GitHub account nobody");
            assert!(output.is_empty());
        }

        #[tokio::test]
        async fn wrong_number_of_arguments_fails() {
            let store = hackbright_store().await;
            let mut output = Vec::new();
            let err = one_shot(&store, &tokens(&["get_grade", "jhacker"]), &mut output)
                .await
                .unwrap_err();
            assert_eq!(err.to_string(), "get_grade expects 2 argument(s), got 1");
            assert!(output.is_empty());
        }
    }
}
