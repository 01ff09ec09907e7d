pub mod health;
pub mod nvd;
pub mod sboms;
pub mod settings;
