pub mod actuator_state;
pub mod api;
pub mod config;
pub mod db;
pub mod sensors;
pub mod trend;
