pub mod item;
pub mod restaurant;
pub mod search;
