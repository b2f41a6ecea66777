pub mod geojson;
pub mod model;

pub use geojson::*;
pub use model::*;
