pub mod action_plan;
pub mod engine;

pub use action_plan::{action_plan, ActionPlanEntry};
pub use engine::{generate_recommendations, Priority, Recommendation};
