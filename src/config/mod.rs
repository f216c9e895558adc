pub mod loader;
pub mod reddit;
pub mod settings;
pub mod types;
pub mod validator;
