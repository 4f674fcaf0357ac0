use crate::{Car, LOG_TARGET, Result};

use std::time::Duration;

use circle_config::DemoConfig;
use circle_sse::{ShutdownGuard, SseServer};
use log::{debug, error, info};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

/// Publishes dartcounter data to the SSE clients.
#[derive(Clone)]
pub struct DartcounterGateway {
    sse: SseServer,
    demo: DemoConfig,
}

impl DartcounterGateway {
    pub fn new(sse: SseServer, demo: DemoConfig) -> Self {
        Self { sse, demo }
    }

    /// Serialize `car` and send it to every connected client under the
    /// configured event id and type.
    pub fn publish_car(&self, car: &Car) -> Result<usize> {
        let payload = serde_json::to_vec(car)?;
        let delivered = self
            .sse
            .send_event(&self.demo.event_id, &self.demo.event_type, payload);

        debug!(target: LOG_TARGET, "car published to {} client(s)", delivered);
        Ok(delivered)
    }

    /// Publish the demo car right away and then every `interval_secs` until
    /// `guard` fires.
    pub fn spawn_demo_ticker(self, mut guard: ShutdownGuard) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs(self.demo.interval_secs));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let car = Car::demo();

            info!(
                target: LOG_TARGET,
                "demo ticker started, publishing every {}s",
                self.demo.interval_secs
            );

            loop {
                tokio::select! {
                    biased;

                    _ = guard.wait() => {
                        info!(target: LOG_TARGET, "demo ticker stopped");
                        break;
                    }

                    _ = ticker.tick() => {
                        if let Err(e) = self.publish_car(&car) {
                            error!(target: LOG_TARGET, "serializing demo car failed: {}", e);
                        }
                    }
                }
            }
        })
    }
}
