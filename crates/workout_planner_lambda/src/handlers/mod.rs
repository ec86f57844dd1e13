pub mod response;
pub mod workout;
