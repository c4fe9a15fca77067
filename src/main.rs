use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use uidnav::client::ApiClient;
use uidnav::command::{parse_action, UserAction, HELP};
use uidnav::config::{self, Config, DEFAULT_API_URL, DEFAULT_POLL, DEFAULT_TIMEOUT_SECS};
use uidnav::{CachedSuggestionPool, ComparisonSession, Selector};

type Session = ComparisonSession<CachedSuggestionPool<ApiClient>>;

#[derive(Parser)]
#[command(name = "uidnav")]
#[command(about = "Browse comparison suggestions back and forth from the terminal")]
struct Args {
    #[arg(long, default_value = DEFAULT_API_URL, help = "Base URL of the API")]
    api_url: String,

    #[arg(long, default_value = DEFAULT_POLL, help = "Poll to browse")]
    poll: String,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, help = "HTTP request timeout")]
    timeout_secs: u64,

    #[arg(long, help = "Initial UID of selector A")]
    uid_a: Option<String>,

    #[arg(long, help = "Initial UID of selector B")]
    uid_b: Option<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = Config::new(
        &args.api_url,
        &args.poll,
        args.timeout_secs,
        config::token_from_env(),
    )?;
    let pool = Arc::new(CachedSuggestionPool::new(ApiClient::new(&config)?));
    let mut session = ComparisonSession::new(config.poll.clone(), pool);

    info!(api_url = %config.api_url, poll = %config.poll, "Starting");
    if let Err(e) = session.auto_fill(args.uid_a, args.uid_b).await {
        error!("Auto-fill failed: {:#}", e);
        println!("Could not load a suggestion.");
    }
    print_comparison(&session);

    run(&mut session).await
}

async fn run(session: &mut Session) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let Some(action) = parse_action(&line) else {
            if !line.trim().is_empty() {
                println!("Unknown command, type 'help'.");
            }
            continue;
        };

        match action {
            UserAction::Quit => break,
            UserAction::Help => println!("{}", HELP),
            UserAction::Show => print_comparison(session),
            UserAction::Logout => {
                session.logout().await;
                println!("Logged out, history cleared.");
            }
            UserAction::Pick(selector, uid) => {
                session.pick(selector, uid);
                print_comparison(session);
            }
            UserAction::Previous(selector) => {
                let result = session.previous(selector).await;
                report_step(session, selector, result);
            }
            UserAction::Next(selector) => {
                let result = session.next(selector).await;
                report_step(session, selector, result);
            }
        }
    }

    Ok(())
}

fn report_step(session: &Session, selector: Selector, result: Result<Option<String>>) {
    match result {
        Ok(Some(_)) => print_comparison(session),
        Ok(None) => println!("Nothing more for selector {}.", selector),
        Err(e) => {
            error!(%selector, "Suggestion lookup failed: {:#}", e);
            println!("Could not load a suggestion.");
        }
    }
}

fn print_comparison(session: &Session) {
    let show = |selector| session.uid(selector).unwrap_or("-").to_string();
    println!(
        "[{}] A: {}  |  B: {}",
        session.poll(),
        show(Selector::A),
        show(Selector::B)
    );
}
