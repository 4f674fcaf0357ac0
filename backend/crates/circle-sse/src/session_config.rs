/// Configuration for SSE sessions
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Encoded frames buffered between a session task and its response body
    pub send_buffer_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: 16,
        }
    }
}
