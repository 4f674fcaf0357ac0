use circle_sse::{ShutdownCoordinator, SseServer};

/// Shared state for the gateway's handlers
#[derive(Clone)]
pub struct AppState {
    pub sse: SseServer,
    pub shutdown: ShutdownCoordinator,
}
