//! Random source port feeding id allocation.

/// Supplies candidate ids to the registry.
///
/// Abstracting the number stream allows deterministic replay by substituting
/// a recorded sequence during tests and cassette playback.
pub trait RandomSource: Send {
    /// Draws a value uniformly from `[0, upper)`.
    ///
    /// Callers always pass a positive `upper`.
    fn draw(&mut self, upper: i32) -> i32;
}
