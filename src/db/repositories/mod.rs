pub mod favorite;
pub mod feedback;
pub mod plan;
pub mod search;
