// --- WASM: the library's #[wasm_bindgen(start)] does the work ---
#[cfg(target_arch = "wasm32")]
fn main() {}

// --- NATIVE ---
#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use std::time::Duration;

    use anyhow::Context;
    use clap::Parser;
    use kline_dash::config::ApiConfig;
    use kline_dash::console::{ConsoleControls, ConsoleSurface};
    use kline_dash::domain::Interval;
    use kline_dash::{Cli, Dashboard, HttpBotClient, HttpKlineFetcher, RenderOutcome};
    use strum::IntoEnumIterator;
    use tokio::runtime::Runtime;

    // A. Init Logging
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {:?}", panic_info);
    }));
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    if args.list_intervals {
        let names: Vec<String> = Interval::iter().map(|i| i.to_string()).collect();
        println!("{}", names.join(" "));
        return Ok(());
    }

    // C. Clients
    let config = ApiConfig::default()
        .with_base_url(args.base_url.clone())
        .with_timeout(Duration::from_secs(args.timeout_secs));
    let fetcher = HttpKlineFetcher::new(config.clone()).context("building kline client")?;
    let bot = HttpBotClient::new(config).context("building bot client")?;
    let controls = ConsoleControls::new(args.symbol.clone(), args.interval.clone());
    let dashboard = Dashboard::new(ConsoleSurface::new(120), controls, fetcher, bot);

    // D. Render (Blocking)
    let rt = Runtime::new().context("Failed to create Tokio runtime")?;
    let outcome = rt.block_on(async {
        if args.stop_bot {
            let (outcome, state) =
                futures::join!(dashboard.refresh_chart(), dashboard.stop_bot_on_market_change());
            log::info!("Bot state after stop request: {}", state);
            outcome
        } else {
            dashboard.page_loaded().await
        }
    });

    match outcome {
        RenderOutcome::Rendered { .. } => {
            if let Some(summary) = dashboard.chart().surface().summary() {
                println!("{}", dashboard.panel().describe(&summary));
            }
            Ok(())
        }
        RenderOutcome::Failed { panel } => {
            anyhow::bail!("{}: {}", panel.title, panel.detail)
        }
        RenderOutcome::Stale { token } => {
            anyhow::bail!("render {} was superseded", token)
        }
    }
}
