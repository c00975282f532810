// Module exports for models

pub mod settings;
pub mod time_block;
