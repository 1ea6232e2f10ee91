use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use fetch_core::{update, AppState, Msg, Outcome, SessionPhase, DEFAULT_QUERY};
use fetch_logging::fetch_info;
use log::LevelFilter;

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::render::Renderer;
use crate::runner::EffectRunner;

pub(crate) fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = AppConfig::load(cli.config.as_deref())?.with_overrides(&cli);
    fetch_logging::initialize(config.log.into(), LevelFilter::Info);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.print_template {
        writeln!(out, "{DEFAULT_QUERY}")?;
        return Ok(ExitCode::SUCCESS);
    }

    let query = match cli.query_file.as_deref() {
        Some(path) => read_query(path)?,
        None => DEFAULT_QUERY.to_string(),
    };
    let runner =
        EffectRunner::new(config.transport_settings()).context("failed to start engine")?;
    let poll = config.poll_interval();

    let (mut state, effects) = update(AppState::with_query(query), Msg::FetchClicked);
    runner.run(effects);

    let mut renderer = Renderer::default();
    loop {
        if state.consume_dirty() {
            renderer.render(&state.view(), &mut out)?;
        }
        if !state.session().is_active() {
            break;
        }
        let msg = runner.next_msg(poll).unwrap_or(Msg::Tick);
        let (next, effects) = update(state, msg);
        state = next;
        runner.run(effects);
    }

    let view = state.view();
    renderer.render_summary(&view, &mut out)?;
    fetch_info!("Session {} finished as {:?}", view.session_id, view.phase);

    Ok(match view.phase {
        SessionPhase::Terminated(Outcome::Success) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

fn read_query(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read query from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read query {}", path.display()))
}
