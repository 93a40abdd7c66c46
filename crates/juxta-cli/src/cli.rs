//! Argument parsing and command dispatch.

use clap::{Args, Parser, Subcommand, ValueEnum};
use juxta_core::CompareAction;
use url::Url;
use uuid::Uuid;

use crate::client::{AppContext, CliResult, build_client, parse_url};
use crate::commands::compare::{DeltaIds, handle_clear, handle_delta, handle_show};
use crate::output::{render_counts, render_issued_session, render_snapshot};

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_API_URL: &str = "http://127.0.0.1:7080";

/// Parses CLI arguments, executes the requested command, and returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    let trace_id = Uuid::new_v4().to_string();
    match dispatch(cli, &trace_id).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

async fn dispatch(cli: Cli, trace_id: &str) -> CliResult<()> {
    let ctx = AppContext {
        client: build_client(cli.timeout, trace_id)?,
        base_url: cli.api_url,
        session: cli.session,
    };

    match cli.command {
        Command::Add(args) => {
            let reply = handle_delta(&ctx, CompareAction::Add, args.into()).await?;
            render_issued_session(reply.issued_session);
            render_counts(reply.value, cli.output)
        }
        Command::Remove(args) => {
            let reply = handle_delta(&ctx, CompareAction::Remove, args.into()).await?;
            render_issued_session(reply.issued_session);
            render_counts(reply.value, cli.output)
        }
        Command::Clear => {
            let reply = handle_clear(&ctx).await?;
            render_issued_session(reply.issued_session);
            println!("comparison set cleared");
            Ok(())
        }
        Command::Show => {
            let reply = handle_show(&ctx).await?;
            render_issued_session(reply.issued_session);
            render_snapshot(&reply.value, cli.output)
        }
    }
}

#[derive(Parser)]
#[command(name = "juxta", about = "Manage a Juxta comparison set from the command line")]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "JUXTA_API_URL",
        value_parser = parse_url,
        default_value = DEFAULT_API_URL
    )]
    api_url: Url,
    #[arg(
        long,
        global = true,
        env = "JUXTA_SESSION",
        help = "Session id to operate on (printed when the server issues one)"
    )]
    session: Option<Uuid>,
    #[arg(
        long,
        global = true,
        env = "JUXTA_TIMEOUT",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    timeout: u64,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    output: OutputFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add ids to the comparison set.
    Add(DeltaArgs),
    /// Remove ids from the comparison set.
    Remove(DeltaArgs),
    /// Empty the comparison set.
    Clear,
    /// Print the comparison set.
    Show,
}

#[derive(Args)]
struct DeltaArgs {
    #[arg(long, help = "Comma-separated context ids")]
    contexts: Option<String>,
    #[arg(long, help = "Comma-separated model ids")]
    models: Option<String>,
}

impl From<DeltaArgs> for DeltaIds {
    fn from(args: DeltaArgs) -> Self {
        Self {
            contexts: args.contexts,
            models: args.models,
        }
    }
}

/// Output format for commands that render data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn add_parses_id_lists() {
        let cli = Cli::try_parse_from([
            "juxta",
            "--api-url",
            "http://cmp.example:9000",
            "add",
            "--contexts",
            "c1,c2",
            "--models",
            "m1",
            "--output",
            "json",
        ])
        .expect("parse");
        assert_eq!(cli.api_url.as_str(), "http://cmp.example:9000/");
        assert_eq!(cli.output, OutputFormat::Json);
        let Command::Add(args) = cli.command else {
            panic!("expected add");
        };
        let ids = DeltaIds::from(args);
        assert_eq!(ids.contexts.as_deref(), Some("c1,c2"));
        assert_eq!(ids.models.as_deref(), Some("m1"));
    }

    #[test]
    fn session_must_be_a_uuid() {
        let id = Uuid::new_v4().to_string();
        let cli = Cli::try_parse_from(["juxta", "show", "--session", id.as_str()]).expect("parse");
        assert_eq!(cli.session.map(|s| s.to_string()), Some(id));

        let err = Cli::try_parse_from(["juxta", "show", "--session", "abc"])
            .err()
            .expect("invalid session");
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn invalid_url_is_rejected() {
        let err = Cli::try_parse_from(["juxta", "--api-url", "nope", "clear"])
            .err()
            .expect("invalid url");
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["juxta"]).is_err());
    }
}
