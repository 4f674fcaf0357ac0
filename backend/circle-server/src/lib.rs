pub mod app_state;
pub mod car;
pub mod dartcounter_gateway;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use app_state::AppState;
pub use car::Car;
pub use dartcounter_gateway::DartcounterGateway;
pub use error::{Result, ServerError};
pub use routes::{build_router, registered_routes};

/// Log target of the gateway's SSE server
pub const SSE_LOG_TARGET: &str = "dartcounter-sse";

/// Log target of the gateway itself
pub const LOG_TARGET: &str = "dartcounter";
