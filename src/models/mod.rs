pub mod country;
pub mod preferences;
pub mod recommendation;
pub mod weather;
