use bevy::{math::vec3, prelude::*, window::PrimaryWindow};

use crate::{
    board::CellCoord,
    camera::{layout_to_world, world_to_layout},
    config::SimulationConfig,
    geometry::{CellRect, GridGeometry, GridLine},
    prelude::*,
    session::{SimulationSession, TickInput, TickOutcome},
    state::GameState,
};

pub struct LifePlugin;

impl Plugin for LifePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Load), spawn_board)
            .add_systems(
                Update,
                (tick_session, (sync_game_state, sync_cell_visibility))
                    .chain()
                    .run_if(in_state(GameState::Drawing).or(in_state(GameState::Playing))),
            )
            .add_systems(OnEnter(GameState::Drawing), retitle_window)
            .add_systems(OnEnter(GameState::Playing), retitle_window);
    }
}

// ——> SYSTEMS

/// spawn one quad per cell, plus the optional grid lines
fn spawn_board(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    config: Res<SimulationConfig>,
    session: Res<SimulationSession>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let geometry = config.geometry();
    let (width, height) = geometry.layout_size();
    let cell_size = geometry.cell_size as f32;

    let cell_mesh = meshes.add(Rectangle::new(cell_size, cell_size));
    let alive_mat = materials.add(ColorMaterial::from_color(CELL_ALIVE_COLOR));

    let board = session.board();
    let cells_to_spawn = (0..board.cell_count())
        .map(|idx| {
            let rect = geometry.cell_rect(board.coord_of(idx));
            (
                Cell,
                CellIndex(idx),
                Mesh2d(cell_mesh.clone()),
                MeshMaterial2d(alive_mat.clone()),
                Transform::from_translation(cell_translation(&geometry, rect)),
                cell_visibility(board.cells()[idx]),
            )
        })
        .collect::<Vec<_>>();
    commands.spawn_batch(cells_to_spawn);

    if config.grid_lines {
        let line_mat = materials.add(ColorMaterial::from_color(GRID_LINE_COLOR));
        let vert_mesh = meshes.add(Rectangle::new(GRID_LINE_WIDTH_PX, height as f32));
        let horiz_mesh = meshes.add(Rectangle::new(width as f32, GRID_LINE_WIDTH_PX));

        let lines = geometry
            .grid_lines()
            .map(|line| {
                let (mesh, pos) = match line {
                    GridLine::Vertical(x) => (
                        vert_mesh.clone(),
                        layout_to_world(x as f32, height as f32 * 0.5, (width, height)),
                    ),
                    GridLine::Horizontal(y) => (
                        horiz_mesh.clone(),
                        layout_to_world(width as f32 * 0.5, y as f32, (width, height)),
                    ),
                };
                (
                    GridLineMarker,
                    Mesh2d(mesh),
                    MeshMaterial2d(line_mat.clone()),
                    Transform::from_translation(pos.extend(5.0)),
                )
            })
            .collect::<Vec<_>>();
        commands.spawn_batch(lines);
    }

    info!(
        "spawned {}x{} board, {}px cells",
        geometry.rows, geometry.columns, geometry.cell_size
    );
    next_state.set(GameState::Drawing);
}

/// Samples input and runs one controller tick.
fn tick_session(
    mut session: ResMut<SimulationSession>,
    time: Res<Time<Real>>,
    keys: Res<ButtonInput<KeyCode>>,
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    config: Res<SimulationConfig>,
) {
    let primary_held = buttons.pressed(PAINT_BUTTON);
    let secondary_held = buttons.pressed(ERASE_BUTTON);
    let pointer = if primary_held || secondary_held {
        pointer_cell(&windows, &cameras, &config.geometry())
    } else {
        None
    };

    let input = TickInput {
        primary_held,
        secondary_held,
        pointer,
        start_pressed: keys.just_pressed(START_KEY),
        reset_pressed: keys.just_pressed(RESET_KEY),
        randomize_pressed: keys.just_pressed(RANDOMIZE_KEY),
    };

    // idle ticks leave the session unchanged for the visibility sync
    let outcome = session
        .bypass_change_detection()
        .tick(&input, time.elapsed());
    if outcome != TickOutcome::default() {
        session.set_changed();
    }
}

fn sync_game_state(
    session: Res<SimulationSession>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let wanted = GameState::from(session.phase());
    if *state.get() != wanted {
        next_state.set(wanted);
    }
}

fn sync_cell_visibility(
    session: Res<SimulationSession>,
    mut cell_query: Query<(&CellIndex, &mut Visibility), With<Cell>>,
) {
    if !session.is_changed() {
        return;
    }
    let cells = session.board().cells();
    for (idx, mut visibility) in cell_query.iter_mut() {
        let Some(&alive) = cells.get(idx.0) else {
            continue;
        };
        let wanted = cell_visibility(alive);
        if *visibility != wanted {
            *visibility = wanted;
        }
    }
}

fn retitle_window(
    state: Res<State<GameState>>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };
    window.title = window_title(state.get());
}

/// Title for the window in the given state; the phase is all it shows.
fn window_title(state: &GameState) -> String {
    let phase = match state {
        GameState::Playing => "playing",
        _ => "drawing",
    };
    format!("{WINDOW_TITLE} ({phase})")
}

// ——> HELPERS

/// Cell under the cursor, if the cursor is over the window.
fn pointer_cell(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cameras: &Query<(&Camera, &GlobalTransform)>,
    geometry: &GridGeometry,
) -> Option<CellCoord> {
    let window = windows.get_single().ok()?;
    let cursor = window.cursor_position()?;
    let (camera, camera_transform) = cameras.get_single().ok()?;
    let world = camera.viewport_to_world_2d(camera_transform, cursor).ok()?;
    let (x, y) = world_to_layout(world, geometry.layout_size());
    geometry.cell_at(x, y)
}

/// Centre of a cell rectangle in world space.
#[inline]
fn cell_translation(geometry: &GridGeometry, rect: CellRect) -> Vec3 {
    let half = rect.size as f32 * 0.5;
    let centre = layout_to_world(
        rect.x as f32 + half,
        rect.y as f32 + half,
        geometry.layout_size(),
    );
    vec3(centre.x, centre.y, 10.0)
}

#[inline]
fn cell_visibility(alive: bool) -> Visibility {
    if alive {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

// ——> COMPONENTS

#[derive(Component)]
struct Cell;

/// row-major index of the cell on the board
#[derive(Component, Debug, Clone, Copy)]
struct CellIndex(usize);

#[derive(Component)]
struct GridLineMarker;
