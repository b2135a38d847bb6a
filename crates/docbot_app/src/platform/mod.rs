mod app;
pub mod cli;
mod clipboard;
mod config;
mod effects;
mod input;
mod render;

use std::io;
use std::path::Path;
use std::sync::{mpsc, Arc};

use anyhow::Context;
use docbot_core::chat::ChatState;
use docbot_core::contract::ContractState;
use docbot_engine::{
    ApiSettings, ContractArchive, EngineHandle, NoPacing, Pacer, ReqwestContractApi,
    ReqwestScraperApi, Services, TokioPacer,
};
use docbot_logging::{docbot_info, docbot_warn};
use log::LevelFilter;

use cli::{Cli, Mode};
use config::{read_config, AppConfig};
use effects::EffectRunner;

const LOG_FILE: &str = "./docbot.log";

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let loaded = read_config(&cli.config);
    let mut config = match &loaded {
        Ok(Some(config)) => config.clone(),
        _ => AppConfig::default(),
    };
    config.apply_overrides(&cli);

    docbot_logging::initialize(
        config.log_destination(),
        LevelFilter::Info,
        Path::new(LOG_FILE),
    );
    match loaded {
        Ok(Some(_)) => docbot_info!("loaded config from {:?}", cli.config),
        Ok(None) => docbot_info!("no config at {:?}; using defaults", cli.config),
        Err(err) => docbot_warn!("{}; using defaults", err),
    }

    let pacer: Arc<dyn Pacer> = if config.stage_pause_ms == 0 {
        Arc::new(NoPacing)
    } else {
        Arc::new(TokioPacer)
    };
    let services = Services {
        scraper: Arc::new(
            ReqwestScraperApi::new(&ApiSettings::new(&config.scraper_api))
                .with_context(|| format!("invalid scraper API url {}", config.scraper_api))?,
        ),
        contract: Arc::new(
            ReqwestContractApi::new(&ApiSettings::new(&config.contract_api))
                .with_context(|| format!("invalid contract API url {}", config.contract_api))?,
        ),
        pacer,
    };
    let (engine, events) = EngineHandle::spawn(services).context("failed to start engine")?;

    let (tx, rx) = mpsc::channel();
    app::spawn_stdin_reader(tx.clone()).context("failed to start input thread")?;
    app::spawn_event_pump(events, tx).context("failed to start event thread")?;

    let runner = EffectRunner::new(engine, ContractArchive::new(config.output_dir.clone()));
    let stdout = io::stdout();
    let mut out = stdout.lock();

    docbot_info!("starting {:?} mode", cli.mode);
    match cli.mode {
        Mode::Chat => {
            let state = ChatState::new().with_stage_pause(config.stage_pause());
            app::run_chat(state, runner, rx, &mut out)?;
        }
        Mode::Contract => app::run_contract(ContractState::new(), runner, rx, &mut out)?,
    }
    Ok(())
}
