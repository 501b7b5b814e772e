use std::time::Duration;

use chrono::Local;
use clap::Parser;
use lapse_core::output::HumanFormatter;
use lapse_core::{ExpiryProbe, ExpiryQuery, OutputFormat, OutputFormatter, RegistrarClient};
use tracing_subscriber::EnvFilter;

/// Supervisor convention for "probe could not determine a status".
const EXIT_UNKNOWN: i32 = 3;

#[derive(Parser)]
#[command(name = "lapse")]
#[command(about = "Check a domain's registration expiry against warning/critical thresholds")]
#[command(version)]
struct Cli {
    /// Domain name to check (e.g. finja.pk)
    domain: String,

    /// Warning threshold: days remaining below this raise WARNING
    #[arg(short = 'w', long, value_name = "DAYS")]
    warn_days: u32,

    /// Critical threshold: days remaining below this raise CRITICAL
    #[arg(short = 'c', long, value_name = "DAYS")]
    crit_days: u32,

    /// Output format (human or json)
    #[arg(short, long, default_value = "human")]
    format: String,

    /// Registrar lookup URL override
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Lookup request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let output_format: OutputFormat = cli.format.parse().unwrap_or_default();

    let mut client = RegistrarClient::new().with_timeout(Duration::from_secs(cli.timeout_secs));
    if let Some(url) = &cli.url {
        client = client.with_url(url);
    }

    let query = ExpiryQuery::new(&cli.domain, i64::from(cli.warn_days), i64::from(cli.crit_days));
    let probe = ExpiryProbe::with_client(client);
    let today = Local::now().date_naive();

    match probe.check(&query, today).await {
        Ok(Some(evaluation)) => {
            let formatter: Box<dyn OutputFormatter> = match output_format {
                OutputFormat::Human if cli.no_color => {
                    Box::new(HumanFormatter::new().without_colors())
                }
                _ => lapse_core::output::get_formatter(output_format),
            };
            println!("{}", formatter.format_evaluation(&evaluation));
            std::process::exit(evaluation.status.exit_code());
        }
        Ok(None) => {
            // The evaluator produces no status at or past the expiry
            // date. Policy here: a lapsed registration is the loudest
            // alert we have, so report CRITICAL.
            println!("{}", expired_output(&cli.domain, output_format));
            std::process::exit(2);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_UNKNOWN);
        }
    }
}

/// The line reported for a domain at or past its expiry date, in the
/// requested format.
fn expired_output(domain: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::json!({
            "domain": domain,
            "status": "critical",
            "reason": "registration already expired",
        })
        .to_string(),
        OutputFormat::Human => format!("Critical: {} registration has already expired", domain),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expired_output_human() {
        assert_eq!(
            expired_output("finja.pk", OutputFormat::Human),
            "Critical: finja.pk registration has already expired"
        );
    }

    #[test]
    fn test_expired_output_json_is_parseable() {
        let line = expired_output("finja.pk", OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["domain"], "finja.pk");
        assert_eq!(value["status"], "critical");
    }
}
