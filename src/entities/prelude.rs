pub use super::favorites::Entity as Favorites;
pub use super::feedback::Entity as Feedback;
pub use super::searches::Entity as Searches;
pub use super::travel_plans::Entity as TravelPlans;
