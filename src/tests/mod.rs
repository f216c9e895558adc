pub mod common;

mod auth_failures;
