use bevy::{math::vec2, prelude::*, render::camera::ScalingMode};

use crate::{config::SimulationConfig, prelude::BG_COLOR, state::GameState};

pub struct CamPlugin;

impl Plugin for CamPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(BG_COLOR))
            .add_systems(OnEnter(GameState::Load), spawn_cam);
    }
}

// Init
fn spawn_cam(mut commands: Commands, config: Res<SimulationConfig>) {
    let (width, height) = config.geometry().layout_size();
    // the whole board is always in view, whatever the window size
    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scaling_mode: ScalingMode::Fixed {
                width: width as f32,
                height: height as f32,
            },
            near: -1000.0,
            far: 1000.0,
            ..OrthographicProjection::default_2d()
        },
        Msaa::Off,
    ));
}

/// Converts a world position (origin at the board centre, y up) into layout
/// pixels (origin at the top-left corner, y down).
#[inline]
pub fn world_to_layout(world: Vec2, layout_size: (u32, u32)) -> (i32, i32) {
    let half = vec2(layout_size.0 as f32, layout_size.1 as f32) * 0.5;
    let x = (world.x + half.x).floor() as i32;
    let y = (half.y - world.y).floor() as i32;
    (x, y)
}

/// Inverse of [`world_to_layout`] for a layout point.
#[inline]
pub fn layout_to_world(x: f32, y: f32, layout_size: (u32, u32)) -> Vec2 {
    let half = vec2(layout_size.0 as f32, layout_size.1 as f32) * 0.5;
    vec2(x - half.x, half.y - y)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn world_and_layout_agree() {
        let size = (320, 200);
        assert_eq!(world_to_layout(vec2(-160.0, 100.0), size), (0, 0));
        assert_eq!(world_to_layout(Vec2::ZERO, size), (160, 100));
        assert_eq!(world_to_layout(vec2(159.5, -99.5), size), (319, 199));
        // bottom-right edge maps just past the last pixel
        assert_eq!(world_to_layout(vec2(160.0, -100.0), size), (320, 200));

        assert_eq!(layout_to_world(0.0, 0.0, size), vec2(-160.0, 100.0));
        assert_eq!(layout_to_world(160.0, 100.0, size), Vec2::ZERO);
    }
}
