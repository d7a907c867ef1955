pub mod errors;
pub mod routes;
pub mod startup;
pub mod state;

pub use startup::{build_app, run, serve};
pub use state::AppState;
