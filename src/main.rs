use std::fs;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use reqres_check::cli::{CliConfig, OutputFormat};
use reqres_check::http::context::TestContext;
use reqres_check::suite::{reqres_suite, select};
use reqres_check::testing::run_suite;

const EXIT_FAILED: u8 = 1;
const EXIT_SETUP: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("reqres_check=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = CliConfig::parse();

    match run(&cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_FAILED),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_SETUP)
        }
    }
}

async fn run(cli: &CliConfig) -> anyhow::Result<bool> {
    let config = cli.suite_config()?;
    let cases = select(reqres_suite(&config), &cli.only);
    if cases.is_empty() {
        anyhow::bail!("no test case matches {:?}", cli.only);
    }

    let mut ctx =
        TestContext::create_with_timeout(&config.base_url, &config.default_headers(), config.timeout())?;
    let report = run_suite(&ctx, &cases, cli.run_mode()).await;
    ctx.dispose();

    match cli.format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    if let Some(path) = &cli.report {
        fs::write(path, report.to_json()?)
            .with_context(|| format!("failed to write report `{}`", path.display()))?;
    }

    Ok(report.all_passed())
}
