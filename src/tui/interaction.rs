//! User interaction tracking for console views
//!
//! A view suppresses automatic full scrolls while the user is in control:
//! - **touching**: a drag is in progress, or the user pinned the view
//! - **settling**: a wheel/key scroll happened recently and the view is still
//!   inside the settle window (the terminal stand-in for fling deceleration)

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Interaction {
    touching: bool,
    settle_until: Option<Instant>,
    settle: Duration,
}

impl Interaction {
    pub fn new(settle: Duration) -> Self {
        Self {
            touching: false,
            settle_until: None,
            settle,
        }
    }

    pub fn set_touching(&mut self, touching: bool) {
        self.touching = touching;
    }

    pub fn is_touching(&self) -> bool {
        self.touching
    }

    /// Record a momentum-style scroll at `now`
    pub fn fling(&mut self, now: Instant) {
        self.settle_until = Some(now + self.settle);
    }

    pub fn is_settling(&self, now: Instant) -> bool {
        self.settle_until.is_some_and(|until| now < until)
    }

    pub fn is_interacting(&self, now: Instant) -> bool {
        self.touching || self.is_settling(now)
    }
}

impl Default for Interaction {
    fn default() -> Self {
        Self::new(Duration::from_millis(300))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_by_default() {
        let interaction = Interaction::default();
        assert!(!interaction.is_interacting(Instant::now()));
    }

    #[test]
    fn test_touching_until_released() {
        let mut interaction = Interaction::default();
        interaction.set_touching(true);
        assert!(interaction.is_interacting(Instant::now()));
        interaction.set_touching(false);
        assert!(!interaction.is_interacting(Instant::now()));
    }

    #[test]
    fn test_fling_settles_after_window() {
        let mut interaction = Interaction::new(Duration::from_millis(100));
        let start = Instant::now();
        interaction.fling(start);

        assert!(interaction.is_settling(start + Duration::from_millis(50)));
        assert!(interaction.is_interacting(start + Duration::from_millis(99)));
        assert!(!interaction.is_interacting(start + Duration::from_millis(100)));
    }
}
