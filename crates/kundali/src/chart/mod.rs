pub mod assembler;
pub mod sweep;
pub mod types;

pub use assembler::ChartAssembler;
pub use sweep::{assemble_sweep, grid, MAX_GRID_POINTS};
pub use types::{Chart, Location, PlanetPosition, SiderealTime};
