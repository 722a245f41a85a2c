pub mod prelude;

pub mod favorites;
pub mod feedback;
pub mod searches;
pub mod travel_plans;
