use clap::Parser;
use eframe::egui;
use game_explorer::app::GameExplorerApp;
use game_explorer::cli::Cli;
use game_explorer::state::AppState;

fn main() -> eframe::Result {
    env_logger::init();
    let cli = Cli::parse();

    let mut state = AppState::new(cli.preprocess_config());
    if let Some(path) = &cli.data {
        state.load_file(path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Game Explorer – Sales & Reviews",
        options,
        Box::new(|_cc| Ok(Box::new(GameExplorerApp::new(state)))),
    )
}
