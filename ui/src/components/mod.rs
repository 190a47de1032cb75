//! Reusable building blocks for the dashboard screen.
pub mod address;
pub mod amount;
pub mod empty_state;
pub mod explorer_link;
pub mod pico;
