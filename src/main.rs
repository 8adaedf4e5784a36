//! Portfolio Quest entry point
//!
//! Runs headless: the demo pilot plays every zone, then the game saves and
//! exits.

use portfolio_quest::consts::FRAME_DT;
use portfolio_quest::platform::{ActionState, AssetCatalog, ScriptedInput, SilentAudio};
use portfolio_quest::{Game, GameConfig};

/// Upper bound on simulated frames (an hour of play at 60 FPS)
const MAX_FRAMES: u64 = 60 * 60 * 60;

fn main() {
    env_logger::init();
    log::info!("Portfolio Quest starting...");

    let config = GameConfig::load("config.json");
    let mut game = Game::new(config, Box::new(SilentAudio), Box::new(AssetCatalog::new("assets")));
    game.start_demo();

    // Nobody is at the keyboard: the provider never reports an action
    let keyboard = ScriptedInput::default();
    let mut input = ActionState::default();
    let mut frames = 0u64;

    while game.is_running() && !game.demo_finished() && frames < MAX_FRAMES {
        input.poll(&keyboard);
        game.tick(FRAME_DT, &input);
        game.render();
        frames += 1;
    }

    if !game.demo_finished() {
        log::warn!("Demo stopped after {} frames without clearing every zone", frames);
    }

    let data = &game.session().data;
    log::info!(
        "Demo finished after {} frames: level {}, zones {:?}",
        frames,
        data.player.level,
        data.completed_zones
    );
    game.quit();
}
