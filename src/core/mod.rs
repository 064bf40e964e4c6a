mod engine;
mod types;

pub use engine::run_projection;
pub use types::{
    CompoundingFrequency, Inputs, Projection, Summary, ValidationError, YearlyPoint,
};
