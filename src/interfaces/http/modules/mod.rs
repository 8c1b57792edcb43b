pub mod boundaries;
pub mod health;
pub mod locations;
pub mod lots;
pub mod metrics;
pub mod spaces;
