use anyhow::{Context, bail};
use canvas_history::canvas::Canvas;
use canvas_history::replay::ReplayScript;
use canvas_history::{EditSession, HistorySettings};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(script_path) = args.next().map(PathBuf::from) else {
        bail!("usage: canvas_history <script.json> [settings.json]");
    };

    let settings = match args.next().map(PathBuf::from).or_else(HistorySettings::default_path) {
        Some(path) => HistorySettings::load(&path)?,
        None => HistorySettings::default(),
    };
    log::info!("history bound: {} records", settings.max_records());

    let json = std::fs::read_to_string(&script_path)
        .with_context(|| format!("reading script {}", script_path.display()))?;
    let script = ReplayScript::from_json(&json)
        .with_context(|| format!("parsing script {}", script_path.display()))?;

    let mut session = EditSession::with_settings(&settings);
    let initial = Canvas::default();
    if settings.record_initial_state {
        session.reset(&initial)?;
    }

    let outcome = script.run(&mut session, initial)?;

    println!(
        "{} edits recorded, {} undone, {} redone, {} no-op, {} skipped, {} failed",
        outcome.recorded,
        outcome.undone,
        outcome.redone,
        outcome.no_ops,
        outcome.skipped,
        outcome.failed
    );
    println!(
        "history: {} of {} entries, position {:?}, can undo: {}, can redo: {}",
        session.history().len(),
        session.history().capacity(),
        session.history().position(),
        session.can_undo(),
        session.can_redo()
    );
    if let Some(active) = session.history().current() {
        println!(
            "active snapshot: {} bytes, recorded at {}",
            active.size(),
            active.recorded_at().to_rfc3339()
        );
    }
    println!("{}", serde_json::to_string_pretty(&outcome.canvas)?);

    Ok(())
}
