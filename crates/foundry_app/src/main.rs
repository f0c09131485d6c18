use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use foundry_api::{AnalysisApi, ApiSettings, HttpAnalysisApi, PollSettings};
use foundry_core::{update, AppState, Msg, PhasePlan, SessionState, StatusNotice};
use foundry_logging::foundry_info;
use tokio::sync::mpsc;

mod cli;
mod driver;
mod logging;
mod render;

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    logging::initialize(args.log_destination());

    let ideas = args.collect_ideas()?;
    anyhow::ensure!(
        !ideas.is_empty(),
        "no ideas to analyze; pass --idea or --ideas-file"
    );

    let api = HttpAnalysisApi::new(ApiSettings::new(args.server.as_str()))
        .context("building the analysis client")?;

    // The controller assumes cooperative single-threaded scheduling; a
    // current-thread runtime interleaves every task on one OS thread.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building the runtime")?;
    runtime.block_on(run(Arc::new(api), ideas))
}

async fn run(api: Arc<dyn AnalysisApi>, ideas: Vec<String>) -> anyhow::Result<()> {
    let (msg_tx, mut msg_rx) = mpsc::unbounded_channel::<Msg>();
    let mut driver = driver::Driver::new(
        api,
        msg_tx.clone(),
        PollSettings::default(),
        PhasePlan::standard(),
    );
    let mut state = AppState::new();

    foundry_info!("analyzing {} idea(s)", ideas.len());
    let _ = msg_tx.send(Msg::SubmitRequested { ideas });

    while let Some(msg) = msg_rx.recv().await {
        let (next, effects) = update(state, msg);
        state = next;
        driver.run(effects);
        if state.consume_dirty() {
            print!("{}", render::render(&state.view()));
            let _ = std::io::stdout().flush();
        }
        if state.is_settled() {
            break;
        }
    }

    if state.view().session == SessionState::Failed {
        let message = match state.view().status {
            Some(StatusNotice::FatalStart { message }) => message,
            _ => "analysis did not start".to_string(),
        };
        anyhow::bail!(message);
    }
    Ok(())
}
