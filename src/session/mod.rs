mod debouncer;
mod markers;

pub use debouncer::{DwellState, ViewCountDebouncer, ViewIncrement};
pub use markers::SessionMarkers;
