// Library for tests to access modules

pub mod config;
pub mod error;
pub mod models;
pub mod name;
pub mod reader;
pub mod session;
pub mod value;
