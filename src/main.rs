//! Demo driver: spins the site wheel against the real clock, then plays a
//! few rounds of clicky, logging as it goes and printing a JSON summary.
//!
//! Usage: `wheel-demo [seed] [spins]`

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use serde::Serialize;

use nioi_games::clicky::{ClickResult, ClickyEngine, ClickyEvent};
use nioi_games::consts::DEFERRED_LINK_DELAY_MS;
use nioi_games::wheel::{SessionEvent, WheelSession};

/// Host pump cadence; outcomes land on wall-clock deadlines regardless
const PUMP_INTERVAL: Duration = Duration::from_millis(25);

#[derive(Serialize)]
struct Summary {
    seed: u64,
    outcomes: Vec<String>,
    links_opened: Vec<String>,
    respins: usize,
    clicky_clicks: u32,
    clicky_wins: u32,
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(seed_from_time);
    let target_spins: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(3);

    log::info!("session seed: {seed}");
    let mut summary = Summary {
        seed,
        outcomes: Vec::new(),
        links_opened: Vec::new(),
        respins: 0,
        clicky_clicks: 0,
        clicky_wins: 0,
    };

    run_wheel(seed, target_spins, &mut summary);
    run_clicky(seed.wrapping_add(1), 4, &mut summary);

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("summary serialization failed: {e}"),
    }
}

/// Low entropy, but plenty for a demo session
fn seed_from_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn run_wheel(seed: u64, target_spins: usize, summary: &mut Summary) {
    let mut session = WheelSession::site_default(seed);
    let start = Instant::now();

    println!("Spinning the wheel {target_spins} time(s)...");
    session.spin(0);

    while summary.outcomes.len() < target_spins {
        std::thread::sleep(PUMP_INTERVAL);
        let now_ms = start.elapsed().as_millis() as u64;
        session.tick(now_ms);

        for event in session.drain_events() {
            match event {
                SessionEvent::SpinStarted {
                    target_rotation_degrees,
                } => {
                    println!("  spinning to {target_rotation_degrees:.1}°...");
                }
                SessionEvent::OutcomePresented { index, label } => {
                    println!("  -> landed on segment {index}: {label}");
                    summary.outcomes.push(label);
                    if summary.outcomes.len() < target_spins {
                        session.spin(now_ms);
                    }
                }
                SessionEvent::OpenLink { url } => {
                    println!("     (opens {url})");
                    summary.links_opened.push(url);
                }
                SessionEvent::RespinScheduled { .. } => {
                    println!("  re-spin! going again...");
                    summary.respins += 1;
                }
            }
        }
    }
}

fn run_clicky(seed: u64, clicks: u32, summary: &mut Summary) {
    let mut engine = ClickyEngine::new(seed);
    let start = Instant::now();

    println!("Playing clicky {clicks} time(s)...");
    let mut pressed = 0u32;
    // Press as soon as the cooldown allows, pumping in between; the tail
    // gives the last press's deferred link and decoy time to land
    let mut drain_until_ms = 0u64;
    loop {
        let now_ms = start.elapsed().as_millis() as u64;
        if pressed == clicks && engine.decoy().is_none() && now_ms >= drain_until_ms {
            break;
        }
        if pressed < clicks && !engine.on_cooldown(now_ms) {
            engine.click(now_ms);
            pressed += 1;
            summary.clicky_clicks += 1;
            drain_until_ms = now_ms + DEFERRED_LINK_DELAY_MS + 100;
        }
        engine.tick(now_ms);

        for event in engine.drain_events() {
            match event {
                ClickyEvent::Resolved { result } => match result {
                    ClickResult::Win { message } => {
                        println!("  win: {message}");
                        summary.clicky_wins += 1;
                    }
                    ClickResult::Miss => println!("  nothing happened"),
                },
                ClickyEvent::OpenLink { url } => println!("     (opens {url})"),
                ClickyEvent::DecoyStarted => println!("  [decoy download appears]"),
                ClickyEvent::DecoyFinished => println!("  [decoy download gone]"),
            }
        }
        std::thread::sleep(PUMP_INTERVAL);
    }
}
