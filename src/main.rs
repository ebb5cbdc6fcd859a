use bevy::{
    prelude::*,
    window::{PresentMode, WindowResolution},
};
use clap::Parser;
use gol_paint::{
    camera::CamPlugin,
    config::{Cli, SimulationConfig},
    diagnostics::RateReportPlugin,
    life::LifePlugin,
    prelude::WINDOW_TITLE,
    session::SimulationSession,
    state::GameState,
};

fn main() -> anyhow::Result<()> {
    // a bad configuration never reaches the simulation loop
    let config = SimulationConfig::try_from(Cli::parse())?;
    let (width, height) = config.window_size();
    let session = SimulationSession::from_config(&config);

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(ImagePlugin::default_nearest())
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: WINDOW_TITLE.into(),
                    resizable: false,
                    focused: true,
                    present_mode: PresentMode::AutoVsync,
                    mode: bevy::window::WindowMode::Windowed,
                    resolution: WindowResolution::new(width as f32, height as f32)
                        .with_scale_factor_override(1.0),
                    ..default()
                }),
                ..default()
            }),
    )
    .insert_resource(session)
    .init_state::<GameState>()
    .add_plugins((CamPlugin, LifePlugin));

    if config.show_diagnostics {
        app.add_plugins(RateReportPlugin);
    }

    info!(
        "{}x{} board, {}px cells, {}x{} window, {} generations/s ({:?})",
        config.rows,
        config.columns,
        config.cell_size,
        width,
        height,
        config.simulation_speed,
        config.cadence
    );
    app.insert_resource(config);
    app.run();
    Ok(())
}
