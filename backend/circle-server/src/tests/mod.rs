
use crate::AppState;

use circle_sse::{ShutdownCoordinator, SseServer};

pub(crate) const SSE_PATH: &str = "/dartcounter/sse";

pub(crate) fn test_state() -> AppState {
    AppState {
        sse: SseServer::new("test-sse", 10),
        shutdown: ShutdownCoordinator::new(),
    }
}
