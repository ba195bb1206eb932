pub mod constants;
pub mod temp_registry;
