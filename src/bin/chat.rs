use anyhow::Context;
use portfolio_relay::{
    client::{provider::provider_from_config, widget::ChatWidget},
    config::Config,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();
    let provider = provider_from_config(reqwest::Client::new(), &config)
        .context("cannot build reply provider")?;

    let mut widget = ChatWidget::new();
    widget.open();

    let mut stdout = tokio::io::stdout();
    if let Some(lines) = widget.greeting() {
        for line in lines {
            stdout.write_all(format!("{line}\n").as_bytes()).await?;
        }
    }
    stdout.write_all(b"(/quit to leave)\n> ").await?;
    stdout.flush().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "/quit" {
            break;
        }

        widget.set_input(line);
        if widget.send(provider.as_ref()).await {
            if let Some(turn) = widget.scroll_anchor().and_then(|i| widget.transcript().get(i)) {
                stdout.write_all(format!("{}\n", turn.content).as_bytes()).await?;
            }
        }
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
    }

    Ok(())
}
