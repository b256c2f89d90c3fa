// Domain layer - calculation rules and saved-calculation types
pub mod driver;
pub mod history;
pub mod units;
