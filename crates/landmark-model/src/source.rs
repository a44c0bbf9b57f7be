//! The landmark extractor boundary.

use crate::landmarks::LandmarkObservation;

/// Anything that can hand the pointer core one observation per poll.
///
/// Implementations own camera acquisition and inference; failures there are
/// theirs to handle and surface here only as
/// [`LandmarkObservation::NotDetected`].
pub trait LandmarkSource {
    /// Produce the observation for the next frame.
    fn poll(&mut self) -> LandmarkObservation;

    /// Source name for logging.
    fn name(&self) -> &str;
}

impl<S: LandmarkSource + ?Sized> LandmarkSource for &mut S {
    fn poll(&mut self) -> LandmarkObservation {
        (**self).poll()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<S: LandmarkSource + ?Sized> LandmarkSource for Box<S> {
    fn poll(&mut self) -> LandmarkObservation {
        (**self).poll()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
