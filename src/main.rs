//! Batting Practice entry point
//!
//! Native builds run a headless demo session: the auto-batter plays for a
//! couple of simulated minutes and the final state is printed as JSON.

/// Simulated display refresh rate
#[cfg(not(target_arch = "wasm32"))]
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Length of the demo in simulated seconds
#[cfg(not(target_arch = "wasm32"))]
const DEMO_SECONDS: u32 = 120;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use batting_practice::audio::{LogAudio, Volume};
    use batting_practice::{Session, Settings};

    env_logger::init();
    log::info!("Batting Practice (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };

    let mut session = Session::new(&settings, LogAudio::new(Volume::from_settings(&settings)));
    session.set_demo_mode(true);

    // The first swing only starts the session
    session.swing(0.0);

    let mut now = 0.0;
    let mut steps = 0u64;
    for _ in 0..DEMO_SECONDS * 60 {
        now += FRAME_MS;
        steps += u64::from(session.frame(now));
    }
    log::info!("Ran {} simulation steps over {:.1}s", steps, now / 1000.0);

    let snapshot = session.snapshot(now);
    let stats = session.state().stats.clone();
    session.end_session(now);

    println!("{}", snapshot.status);
    match serde_json::to_string_pretty(&stats) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize stats: {e}"),
    }
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts drive `Session` directly on the web; nothing to run here
}
