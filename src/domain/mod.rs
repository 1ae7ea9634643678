pub mod absence;
pub mod outcome;
pub mod parameters;
pub mod trial;
