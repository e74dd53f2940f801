//! Recording adapter for the `RandomSource` port.

use std::sync::{Arc, Mutex};

use serde_json::json;

use super::record_interaction;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::RandomSource;

/// Port name under which draws are recorded.
pub const PORT: &str = "random";
/// Method name under which draws are recorded.
pub const METHOD: &str = "draw";

/// Records every draw while delegating to an inner source.
pub struct RecordingRandom {
    inner: Box<dyn RandomSource>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingRandom {
    /// Creates a new recording source wrapping the given implementation.
    pub fn new(inner: Box<dyn RandomSource>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl RandomSource for RecordingRandom {
    fn draw(&mut self, upper: i32) -> i32 {
        let value = self.inner.draw(upper);
        record_interaction(&self.recorder, PORT, METHOD, &json!({ "upper": upper }), &value);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::SeededRandom;
    use crate::cassette::format::Cassette;

    #[test]
    fn records_each_draw() {
        let dir = std::env::temp_dir().join("idreg_rec_random_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("random.cassette.yaml");

        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "test", Some(9))));

        // Scope the adapter so it's dropped before we try to unwrap
        let drawn = {
            let mut source =
                RecordingRandom::new(Box::new(SeededRandom::seeded(9)), Arc::clone(&recorder));
            vec![source.draw(100), source.draw(100)]
        };

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let cassette: Cassette = serde_yaml::from_str(&content).unwrap();
        assert_eq!(cassette.seed, Some(9));
        assert_eq!(cassette.interactions.len(), 2);
        assert_eq!(cassette.interactions[0].port, PORT);
        assert_eq!(cassette.interactions[0].input, json!({ "upper": 100 }));
        assert_eq!(cassette.interactions[0].output, json!(drawn[0]));
        assert_eq!(cassette.interactions[1].output, json!(drawn[1]));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
