pub mod app;
pub mod client;
pub mod config;
pub mod controller;
pub mod dates;
pub mod errors;
pub mod grid;
pub mod handlers;
pub mod models;
pub mod normalize;
pub mod reconcile;
pub mod session;
pub mod state;
pub mod ui;

pub use app::router;
pub use client::ApiClient;
pub use config::Config;
pub use controller::Controller;
pub use session::Session;
pub use state::AppState;
