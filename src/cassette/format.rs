//! Cassette data structures for recording and replaying sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded interaction with a port or with the registry itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Port name (e.g. "random", "registry").
    pub port: String,
    /// Method name invoked on the port.
    pub method: String,
    /// Input data sent to the port.
    pub input: serde_json::Value,
    /// Output data returned from the port.
    pub output: serde_json::Value,
}

/// A cassette containing a sequence of recorded interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Seed of the recorded registry, if it was seeded.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Interactions recorded for `port`, in recording order.
    pub fn port_interactions<'a>(&'a self, port: &'a str) -> impl Iterator<Item = &'a Interaction> {
        self.interactions.iter().filter(move |i| i.port == port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_cassette() -> Cassette {
        Cassette {
            name: "test-cassette".into(),
            recorded_at: Utc::now(),
            seed: Some(42),
            interactions: vec![
                Interaction {
                    seq: 0,
                    port: "random".into(),
                    method: "draw".into(),
                    input: json!({"upper": 2_147_483_647}),
                    output: json!(1_608_637_542),
                },
                Interaction {
                    seq: 1,
                    port: "registry".into(),
                    method: "allocate".into(),
                    input: json!({"op": "allocate"}),
                    output: json!({"result": "allocated", "id": 1_608_637_542}),
                },
            ],
        }
    }

    #[test]
    fn yaml_round_trip() {
        let cassette = sample_cassette();
        let yaml = serde_yaml::to_string(&cassette).expect("serialize");
        let deserialized: Cassette = serde_yaml::from_str(&yaml).expect("deserialize");
        assert_eq!(cassette, deserialized);
    }

    #[test]
    fn missing_seed_defaults_to_none() {
        let yaml = "name: legacy\nrecorded_at: 2025-03-15T14:30:00Z\ninteractions: []\n";
        let cassette: Cassette = serde_yaml::from_str(yaml).expect("deserialize");
        assert_eq!(cassette.seed, None);
        assert!(cassette.interactions.is_empty());
    }

    #[test]
    fn port_interactions_filters_by_port() {
        let cassette = sample_cassette();
        let registry: Vec<_> = cassette.port_interactions("registry").collect();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry[0].method, "allocate");
    }
}
