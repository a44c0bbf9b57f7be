//! One activation per click hold.
//!
//! A blink or pinch holds the click for several frames; a button should
//! fire once per hold, not once per frame.

/// Rising-edge detector over the per-frame click signal.
#[derive(Debug, Clone, Default)]
pub struct ClickLatch {
    latched: bool,
}

impl ClickLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` only on the frame the click becomes active.
    pub fn update(&mut self, click_active: bool) -> bool {
        let fired = click_active && !self.latched;
        self.latched = click_active;
        fired
    }

    /// Whether a hold is currently latched.
    pub fn is_latched(&self) -> bool {
        self.latched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_per_hold() {
        let mut latch = ClickLatch::new();
        let fired: Vec<bool> = [false, true, true, true, false, true, false]
            .into_iter()
            .map(|active| latch.update(active))
            .collect();
        assert_eq!(fired, vec![false, true, false, false, false, true, false]);
    }

    #[test]
    fn test_latched_state() {
        let mut latch = ClickLatch::new();
        latch.update(true);
        assert!(latch.is_latched());
        latch.update(false);
        assert!(!latch.is_latched());
    }
}
