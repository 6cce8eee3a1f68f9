pub mod prediction;
pub mod search_plan;

pub use prediction::{Evidence, MatchMethod, Prediction};
pub use search_plan::{SearchPlan, TimeRange};
