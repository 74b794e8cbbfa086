pub mod compose;
pub mod error;
pub mod features;
pub mod handlers;
pub mod model;
pub mod models;
pub mod ranking;
pub mod state;
pub mod validator;
