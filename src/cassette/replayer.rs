//! Replays recorded interactions from a cassette.

use std::collections::HashMap;

use super::format::{Cassette, Interaction};

/// Key for indexing interactions by port and method.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct StreamKey {
    port: String,
    method: String,
}

impl StreamKey {
    fn new(port: &str, method: &str) -> Self {
        Self { port: port.to_string(), method: method.to_string() }
    }
}

/// One port/method stream and how far it has been consumed.
#[derive(Debug, Default)]
struct Stream {
    interactions: Vec<Interaction>,
    cursor: usize,
}

/// Replays interactions from a loaded cassette, serving them sequentially
/// per port/method pair.
#[derive(Debug)]
pub struct CassetteReplayer {
    streams: HashMap<StreamKey, Stream>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut streams: HashMap<StreamKey, Stream> = HashMap::new();
        for interaction in &cassette.interactions {
            streams
                .entry(StreamKey::new(&interaction.port, &interaction.method))
                .or_default()
                .interactions
                .push(interaction.clone());
        }
        Self { streams }
    }

    /// Number of interactions not yet served for the given port and method.
    #[must_use]
    pub fn remaining(&self, port: &str, method: &str) -> usize {
        self.streams
            .get(&StreamKey::new(port, method))
            .map_or(0, |s| s.interactions.len() - s.cursor)
    }

    /// Return the next interaction for the given port and method, or `None`
    /// when the cassette holds no (more) interactions for that pair.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Option<&Interaction> {
        let stream = self.streams.get_mut(&StreamKey::new(port, method))?;
        let interaction = stream.interactions.get(stream.cursor)?;
        stream.cursor += 1;
        Some(interaction)
    }
}
