//! Startup configuration, parsed from the command line and validated before
//! the app is built.

use bevy::prelude::Resource;
use clap::Parser;

use crate::{error::ConfigError, geometry::GridGeometry, prelude::*, session::CadenceStrategy};

/// Command-line arguments. Numbers are taken signed so that non-positive
/// values reach validation and are reported instead of silently wrapping.
#[derive(Debug, Parser)]
#[command(author, version, about = "Paint a pattern, then watch it live.", long_about = None)]
pub struct Cli {
    /// Board dimensions as ROWSxCOLUMNS (for example 50x80).
    #[arg(short = 's', long = "size", value_name = "ROWSxCOLUMNS", conflicts_with_all = ["rows", "columns"])]
    pub size: Option<String>,
    /// Number of board rows.
    #[arg(long, value_name = "ROWS", allow_negative_numbers = true)]
    pub rows: Option<i64>,
    /// Number of board columns.
    #[arg(long, value_name = "COLUMNS", allow_negative_numbers = true)]
    pub columns: Option<i64>,
    /// Edge length of one cell in pixels.
    #[arg(long, value_name = "PIXELS", default_value_t = DEFAULT_CELL_SIZE as i64, allow_negative_numbers = true)]
    pub cell_size: i64,
    /// Window width in pixels; defaults to columns * cell size.
    #[arg(long, value_name = "PIXELS", allow_negative_numbers = true)]
    pub window_width: Option<i64>,
    /// Window height in pixels; defaults to rows * cell size.
    #[arg(long, value_name = "PIXELS", allow_negative_numbers = true)]
    pub window_height: Option<i64>,
    /// Target generations per second while playing.
    #[arg(long, value_name = "GENERATIONS", default_value_t = DEFAULT_SIMULATION_SPEED as i64, allow_negative_numbers = true)]
    pub speed: i64,
    /// When a generation advance is due while playing.
    #[arg(long, value_enum, default_value_t = CadenceStrategy::WallClock)]
    pub cadence: CadenceStrategy,
    /// Log generations and frames per second once a second.
    #[arg(long)]
    pub diagnostics: bool,
    /// Draw a line at every cell boundary.
    #[arg(long)]
    pub grid_lines: bool,
    /// Seed for the randomize key; random when omitted.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    pub rows: usize,
    pub columns: usize,
    /// edge length of one cell, in pixels
    pub cell_size: u32,
    pub window_width: Option<u32>,
    pub window_height: Option<u32>,
    /// target generations per second
    pub simulation_speed: u32,
    pub cadence: CadenceStrategy,
    pub show_diagnostics: bool,
    pub grid_lines: bool,
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            cell_size: DEFAULT_CELL_SIZE,
            window_width: None,
            window_height: None,
            simulation_speed: DEFAULT_SIMULATION_SPEED,
            cadence: CadenceStrategy::WallClock,
            show_diagnostics: false,
            grid_lines: false,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Rejects zero dimensions, cell size, window size or speed, and boards
    /// whose cell count or pixel layout does not fit the coordinate types.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_zero("rows", self.rows as u64)?;
        non_zero("columns", self.columns as u64)?;
        non_zero("cell size", u64::from(self.cell_size))?;
        non_zero("simulation speed", u64::from(self.simulation_speed))?;
        if let Some(width) = self.window_width {
            non_zero("window width", u64::from(width))?;
        }
        if let Some(height) = self.window_height {
            non_zero("window height", u64::from(height))?;
        }

        let layout_side = |cells: usize| {
            u32::try_from(cells)
                .ok()
                .and_then(|cells| cells.checked_mul(self.cell_size))
        };
        let fits = self.rows.checked_mul(self.columns).is_some()
            && layout_side(self.columns).is_some()
            && layout_side(self.rows).is_some();
        if !fits {
            return Err(ConfigError::LayoutOverflow {
                rows: self.rows,
                columns: self.columns,
                cell_size: self.cell_size,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn geometry(&self) -> GridGeometry {
        GridGeometry::new(self.rows, self.columns, self.cell_size)
    }

    /// Window size in pixels, falling back to the board layout size.
    pub fn window_size(&self) -> (u32, u32) {
        let (layout_w, layout_h) = self.geometry().layout_size();
        (
            self.window_width.unwrap_or(layout_w),
            self.window_height.unwrap_or(layout_h),
        )
    }
}

impl TryFrom<Cli> for SimulationConfig {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let (rows, columns) = match cli.size.as_deref() {
            Some(size) => parse_size(size)?,
            None => (
                cli.rows.unwrap_or(DEFAULT_ROWS as i64),
                cli.columns.unwrap_or(DEFAULT_COLUMNS as i64),
            ),
        };

        let config = Self {
            rows: positive("rows", rows)?,
            columns: positive("columns", columns)?,
            cell_size: positive("cell size", cli.cell_size)?,
            window_width: cli
                .window_width
                .map(|w| positive("window width", w))
                .transpose()?,
            window_height: cli
                .window_height
                .map(|h| positive("window height", h))
                .transpose()?,
            simulation_speed: positive("simulation speed", cli.speed)?,
            cadence: cli.cadence,
            show_diagnostics: cli.diagnostics,
            grid_lines: cli.grid_lines,
            seed: cli.seed,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Checks `value > 0` and that it fits the target integer type.
fn positive<T: TryFrom<i64>>(field: &'static str, value: i64) -> Result<T, ConfigError> {
    if value <= 0 {
        return Err(ConfigError::NonPositive { field, value });
    }
    T::try_from(value).map_err(|_| ConfigError::TooLarge { field, value })
}

fn non_zero(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        Err(ConfigError::NonPositive { field, value: 0 })
    } else {
        Ok(())
    }
}

fn parse_size(value: &str) -> Result<(i64, i64), ConfigError> {
    let malformed = || ConfigError::MalformedSize(value.to_string());
    let (rows, columns) = value.split_once(['x', 'X']).ok_or_else(malformed)?;
    let rows = rows.trim().parse::<i64>().map_err(|_| malformed())?;
    let columns = columns.trim().parse::<i64>().map_err(|_| malformed())?;
    Ok((rows, columns))
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(args: &[&str]) -> Result<SimulationConfig, ConfigError> {
        let cli = Cli::try_parse_from(std::iter::once("gol-paint").chain(args.iter().copied()))
            .expect("arguments should parse");
        SimulationConfig::try_from(cli)
    }

    #[test]
    fn defaults_are_valid() {
        let config = parse(&[]).unwrap();
        assert_eq!(config, SimulationConfig::default());
        assert_eq!(config.simulation_speed, 300);
        assert_eq!(config.cadence, CadenceStrategy::WallClock);
    }

    #[test]
    fn window_size_is_derived_from_layout() {
        let config = parse(&["--rows", "20", "--columns", "30", "--cell-size", "16"]).unwrap();
        assert_eq!(config.window_size(), (480, 320));

        let config = parse(&["--size", "300x300", "--cell-size", "32", "--window-width", "1000"])
            .unwrap();
        assert_eq!((config.rows, config.columns), (300, 300));
        assert_eq!(config.window_size(), (1000, 9600));
    }

    #[test]
    fn non_positive_values_are_rejected() {
        assert_eq!(
            parse(&["--rows", "0"]),
            Err(ConfigError::NonPositive {
                field: "rows",
                value: 0
            })
        );
        assert_eq!(
            parse(&["--cell-size", "-4"]),
            Err(ConfigError::NonPositive {
                field: "cell size",
                value: -4
            })
        );
        assert!(parse(&["--speed", "0"]).is_err());
        assert!(parse(&["--window-height", "0"]).is_err());
        assert!(parse(&["--size", "0x5"]).is_err());
    }

    #[test]
    fn oversized_values_are_rejected_not_truncated() {
        // one past u32::MAX would wrap to 10 with a plain cast
        assert_eq!(
            parse(&["--cell-size", "4294967306"]),
            Err(ConfigError::TooLarge {
                field: "cell size",
                value: 4_294_967_306
            })
        );
        assert!(parse(&["--speed", "4294967296"]).is_err());
    }

    #[test]
    fn layout_overflow_is_rejected() {
        assert_eq!(
            parse(&["--rows", "100000", "--cell-size", "100000"]),
            Err(ConfigError::LayoutOverflow {
                rows: 100_000,
                columns: DEFAULT_COLUMNS,
                cell_size: 100_000
            })
        );

        let config = SimulationConfig {
            rows: usize::MAX,
            columns: 2,
            cell_size: 1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::LayoutOverflow { .. })
        ));

        // the largest layout that still fits is accepted
        let config = SimulationConfig {
            rows: 1,
            columns: 65_536,
            cell_size: 65_535,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn malformed_size_is_rejected() {
        assert_eq!(
            parse(&["--size", "50by50"]),
            Err(ConfigError::MalformedSize("50by50".to_string()))
        );
        assert!(parse(&["--size", "5xfoo"]).is_err());
    }

    #[test]
    fn size_conflicts_with_explicit_dimensions() {
        let res = Cli::try_parse_from(["gol-paint", "--size", "5x5", "--rows", "4"]);
        assert!(res.is_err());
    }

    #[test]
    fn cadence_and_flags() {
        let config = parse(&["--cadence", "per-frame", "--diagnostics", "--grid-lines", "--seed", "9"])
            .unwrap();
        assert_eq!(config.cadence, CadenceStrategy::PerFrame);
        assert!(config.show_diagnostics);
        assert!(config.grid_lines);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn validate_catches_programmatic_zeroes() {
        let config = SimulationConfig {
            columns: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(SimulationConfig::default().validate().is_ok());
    }
}
