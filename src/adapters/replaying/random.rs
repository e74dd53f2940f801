//! Replaying adapter for the `RandomSource` port.

use std::sync::{Arc, Mutex};

use crate::adapters::live::SeededRandom;
use crate::adapters::recording::random::{METHOD, PORT};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::RandomSource;

/// Recorded draws plus the first fault hit while serving them.
#[derive(Debug)]
pub struct DrawStream {
    replayer: CassetteReplayer,
    fault: Option<String>,
}

impl DrawStream {
    /// Recorded draws not yet served.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.replayer.remaining(PORT, METHOD)
    }

    /// Takes the fault recorded since the last call, if any.
    pub fn take_fault(&mut self) -> Option<String> {
        self.fault.take()
    }
}

/// Replays recorded draws from a cassette.
///
/// Once the recording cannot serve a draw (exhausted, or a value outside the
/// requested range) the fault is kept on the shared [`DrawStream`] and
/// further draws come from a fixed-seed generator, so allocation still
/// terminates and the caller decides how to report the fault.
pub struct ReplayingRandom {
    stream: Arc<Mutex<DrawStream>>,
    fallback: SeededRandom,
}

impl ReplayingRandom {
    /// Creates a new replaying source from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self {
            stream: Arc::new(Mutex::new(DrawStream { replayer, fault: None })),
            fallback: SeededRandom::seeded(0),
        }
    }

    /// Handle for auditing the draw stream while the registry owns this source.
    #[must_use]
    pub fn stream(&self) -> Arc<Mutex<DrawStream>> {
        Arc::clone(&self.stream)
    }
}

impl RandomSource for ReplayingRandom {
    fn draw(&mut self, upper: i32) -> i32 {
        let mut stream = self.stream.lock().expect("draw stream lock poisoned");
        if stream.fault.is_none() {
            let next = stream
                .replayer
                .next_interaction(PORT, METHOD)
                .map(|i| (i.seq, i.output.as_i64()));
            let fault = match next {
                None => "cassette ran out of recorded draws".to_string(),
                Some((seq, value)) => {
                    match value.and_then(|v| i32::try_from(v).ok()) {
                        Some(v) if (0..upper).contains(&v) => return v,
                        _ => format!("recorded draw at seq={seq} is not an id in [0, {upper})"),
                    }
                }
            };
            stream.fault = Some(fault);
        }
        drop(stream);
        self.fallback.draw(upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn draw_interaction(seq: u64, value: serde_json::Value) -> Interaction {
        Interaction {
            seq,
            port: PORT.into(),
            method: METHOD.into(),
            input: json!({ "upper": i32::MAX }),
            output: value,
        }
    }

    fn make_source(interactions: Vec<Interaction>) -> ReplayingRandom {
        let cassette =
            Cassette { name: "test".into(), recorded_at: Utc::now(), seed: None, interactions };
        ReplayingRandom::new(CassetteReplayer::new(&cassette))
    }

    #[test]
    fn replays_draws_in_order() {
        let mut source =
            make_source(vec![draw_interaction(0, json!(17)), draw_interaction(1, json!(4))]);
        let stream = source.stream();
        assert_eq!(stream.lock().unwrap().remaining(), 2);
        assert_eq!(source.draw(i32::MAX), 17);
        assert_eq!(source.draw(i32::MAX), 4);
        assert_eq!(stream.lock().unwrap().remaining(), 0);
        assert!(stream.lock().unwrap().take_fault().is_none());
    }

    #[test]
    fn out_of_range_value_is_a_fault() {
        let mut source = make_source(vec![draw_interaction(3, json!(50))]);
        let v = source.draw(10);
        assert!((0..10).contains(&v));
        let fault = source.stream().lock().unwrap().take_fault().unwrap();
        assert!(fault.contains("seq=3"), "{fault}");
    }

    #[test]
    fn non_numeric_value_is_a_fault() {
        let mut source = make_source(vec![draw_interaction(0, json!("seven"))]);
        let _ = source.draw(i32::MAX);
        assert!(source.stream().lock().unwrap().take_fault().is_some());
    }

    #[test]
    fn exhausted_stream_falls_back_and_reports_once() {
        let mut source = make_source(vec![draw_interaction(0, json!(1))]);
        assert_eq!(source.draw(i32::MAX), 1);
        let v = source.draw(100);
        assert!((0..100).contains(&v));
        let stream = source.stream();
        let fault = stream.lock().unwrap().take_fault().unwrap();
        assert!(fault.contains("ran out"), "{fault}");
        assert!(stream.lock().unwrap().take_fault().is_none());
    }
}
