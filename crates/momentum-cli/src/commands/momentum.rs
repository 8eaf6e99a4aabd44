//! Momentum commands: status, log, history, reset.
//!
//! Every command that reads momentum attaches a session, so drift for
//! missed days is reconciled and saved before anything is shown.

use momentum_core::clock::parse_date;
use momentum_core::{
    ActivityKind, Clock, Config, FixedClock, MomentumEvent, MomentumReport, MomentumSession,
    StateStore, SystemClock,
};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

fn clock(today: Option<&str>) -> Result<FixedClock, Box<dyn std::error::Error>> {
    let date = match today {
        Some(s) => parse_date(s)?,
        None => SystemClock.today(),
    };
    Ok(FixedClock(date))
}

fn attach(today: Option<&str>) -> Result<MomentumSession, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = StateStore::open_default()?;
    Ok(MomentumSession::attach(store, config, &clock(today)?)?)
}

fn print_report(report: &MomentumReport) {
    println!(
        "Momentum: {:.1} {}",
        report.current_level,
        report.level_bar(20)
    );
    println!("  {}", report.status_message);
    println!("  Peak: {:.1}", report.peak_level);
    println!("  Active days: {}", report.total_active_days);
    println!("  Last active: {}", report.last_active_date);
    println!("  Color: {} ({:?})", report.color_hex, report.color);
    println!(
        "  Days until zero without activity: {}",
        report.days_until_zero
    );
}

pub fn status(today: Option<&str>, json: bool) -> CmdResult {
    let session = attach(today)?;
    let report = session.report();
    if !json {
        if let Some(drift) = session.drift() {
            println!("{}", drift.describe());
        }
    }
    session.commit()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

pub fn log(today: Option<&str>, kind: ActivityKind, json: bool) -> CmdResult {
    let mut session = attach(today)?;
    let event = session.log_activity(kind);
    let report = session.report();
    session.commit()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", event.describe());
        print_report(&report);
    }
    Ok(())
}

pub fn history(limit: usize, json: bool) -> CmdResult {
    let store = StateStore::open_default()?;
    let stored = store.load()?;
    let events: &[MomentumEvent] = stored
        .as_ref()
        .map(|s| s.recent_history(limit))
        .unwrap_or(&[]);

    if json {
        println!("{}", serde_json::to_string_pretty(events)?);
        return Ok(());
    }

    if events.is_empty() {
        println!("No momentum events recorded.");
        return Ok(());
    }
    for event in events {
        println!("{}  {}", event.on(), event.describe());
    }
    Ok(())
}

pub fn reset(today: Option<&str>, purge: bool) -> CmdResult {
    if purge {
        let store = StateStore::open_default()?;
        store.clear()?;
        println!("momentum state deleted");
        return Ok(());
    }

    let mut session = attach(today)?;
    let event = session.reset();
    session.commit()?;
    println!("{}", event.describe());
    println!("momentum reset to defaults");
    Ok(())
}
