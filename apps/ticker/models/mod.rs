pub mod posts;
pub mod settings;
