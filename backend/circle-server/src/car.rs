use serde::{Deserialize, Serialize};

/// Car record published by the demo ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub marke: String,
    pub baujahr: u16,
}

impl Car {
    pub fn demo() -> Self {
        Self {
            marke: "Volkswagen".to_string(),
            baujahr: 2023,
        }
    }
}
