use anyhow::{Context, Result};
use drugcompat::{config::Config, DataSource, Session};
use reqwest::Client;
use std::{env, process::ExitCode};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// What the command line asked for.
#[derive(Debug, PartialEq, Eq)]
enum Query {
    DrugList,
    Candidates(String),
    Classify(String, String),
}

fn parse_args(args: &[String]) -> Result<(Query, bool)> {
    let json = args.iter().any(|a| a == "--json");
    let positional: Vec<&String> = args.iter().filter(|a| *a != "--json").collect();

    let query = match positional.as_slice() {
        [] => Query::DrugList,
        [drug1] => Query::Candidates(drug1.to_string()),
        [drug1, drug2] => Query::Classify(drug1.to_string(), drug2.to_string()),
        _ => anyhow::bail!("usage: drugcompat [--json] [DRUG1 [DRUG2]]"),
    };
    Ok((query, json))
}

fn render(session: &Session, query: &Query, json: bool) -> Result<String> {
    let out = match query {
        Query::DrugList => {
            let drugs = session.drug_list();
            if json {
                serde_json::to_string_pretty(&drugs)?
            } else {
                drugs.join("\n")
            }
        }
        Query::Candidates(drug1) => {
            let list = session.candidates(drug1);
            if json {
                serde_json::to_string_pretty(&list)?
            } else {
                list.iter()
                    .map(|c| {
                        let mark = if c.selectable { "  " } else { "x " };
                        format!("{}{}", mark, c.display_text())
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        Query::Classify(drug1, drug2) => {
            let verdict = session.classify(drug1, drug2);
            if json {
                serde_json::to_string_pretty(&verdict)?
            } else {
                format!("{}\t{}", verdict.style_class, verdict.message)
            }
        }
    };
    Ok(out)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // ─── 1) config + logging ─────────────────────────────────────────
    let cfg = Config::load().context("loading configuration")?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_filter));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (query, json) = parse_args(&args)?;

    // ─── 2) single load; every query depends on it ───────────────────
    let client = Client::new();
    let session = match DataSource::parse(&cfg.source) {
        Ok(source) => Session::load(&client, &source).await,
        Err(e) => Err(e),
    };
    let session = match session {
        Ok(s) => s,
        Err(e) => {
            let msg = e.user_message();
            error!(error = ?anyhow::Error::from(e), "loading compatibility table failed");
            eprintln!("{}", msg);
            return Ok(ExitCode::FAILURE);
        }
    };

    // ─── 3) answer ───────────────────────────────────────────────────
    info!(?query, "answering");
    println!("{}", render(&session, &query, json)?);
    Ok(ExitCode::SUCCESS)
}
