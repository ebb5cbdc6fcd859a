//! Generations/s as a Bevy diagnostic, logged alongside frames/s once a second.

use std::time::Duration;

use bevy::{
    diagnostic::{
        Diagnostic, DiagnosticPath, Diagnostics, FrameTimeDiagnosticsPlugin,
        LogDiagnosticsPlugin, RegisterDiagnostic,
    },
    prelude::*,
};

use crate::{prelude::DIAGNOSTICS_INTERVAL_SECS, session::SimulationSession};

pub const GENERATIONS_PER_SECOND: DiagnosticPath =
    DiagnosticPath::const_new("generations_per_second");

pub struct RateReportPlugin;

impl Plugin for RateReportPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            FrameTimeDiagnosticsPlugin,
            LogDiagnosticsPlugin {
                wait_duration: Duration::from_secs(DIAGNOSTICS_INTERVAL_SECS),
                ..default()
            },
        ))
        .register_diagnostic(Diagnostic::new(GENERATIONS_PER_SECOND).with_suffix(" gen/s"))
        .add_systems(Update, measure_generations);
    }
}

/// Generations advanced over a frame of length `delta`, per second.
///
/// A counter that went backwards was reset; everything since the reset
/// counts toward the frame. `None` for a zero-length frame.
pub fn generation_rate(previous: u64, current: u64, delta: Duration) -> Option<f64> {
    if delta.is_zero() {
        return None;
    }
    let advanced = current.checked_sub(previous).unwrap_or(current);
    Some(advanced as f64 / delta.as_secs_f64())
}

fn measure_generations(
    time: Res<Time<Real>>,
    session: Res<SimulationSession>,
    mut last_generation: Local<u64>,
    mut diagnostics: Diagnostics,
) {
    let generation = session.generation();
    if let Some(rate) = generation_rate(*last_generation, generation, time.delta()) {
        diagnostics.add_measurement(&GENERATIONS_PER_SECOND, || rate);
    }
    *last_generation = generation;
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::SimulationConfig;

    #[test]
    fn rate_over_one_frame() {
        assert_eq!(
            generation_rate(40, 45, Duration::from_millis(20)),
            Some(250.0)
        );
        assert_eq!(generation_rate(7, 7, Duration::from_millis(16)), Some(0.0));
    }

    #[test]
    fn zero_length_frame_is_skipped() {
        assert_eq!(generation_rate(0, 3, Duration::ZERO), None);
    }

    #[test]
    fn counter_reset_is_not_negative() {
        assert_eq!(
            generation_rate(500, 3, Duration::from_millis(100)),
            Some(30.0)
        );
    }

    #[test]
    fn plugin_registers_the_diagnostic() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(SimulationSession::from_config(&SimulationConfig::default()))
            .add_plugins(RateReportPlugin);
        app.update();

        let store = app.world().resource::<bevy::diagnostic::DiagnosticsStore>();
        assert!(store.get(&GENERATIONS_PER_SECOND).is_some());
    }
}
