/// Accepts at most `target_fps` frames per second of host time
#[derive(Clone, Copy, Debug)]
pub(crate) struct FrameLimiter {
    interval_ms: f64,
    last_ms: Option<f64>,
}

impl FrameLimiter {
    pub(crate) fn new(target_fps: u32) -> Self {
        Self { interval_ms: 1000.0 / target_fps.max(1) as f64, last_ms: None }
    }

    pub(crate) fn set_target_fps(&mut self, target_fps: u32) {
        self.interval_ms = 1000.0 / target_fps.max(1) as f64;
    }

    /// Whether a tick should run for a frame at `now_ms`
    pub(crate) fn accept(&mut self, now_ms: f64) -> bool {
        match self.last_ms {
            // Half a millisecond of slack for rAF jitter
            Some(last) if now_ms - last < self.interval_ms - 0.5 => false,
            _ => {
                self.last_ms = Some(now_ms);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirty_fps_skips_every_other_sixty_hz_frame() {
        let mut limiter = FrameLimiter::new(30);
        let accepted = (0..10).filter(|i| limiter.accept(*i as f64 * 16.667)).count();
        assert_eq!(accepted, 5);
    }

    #[test]
    fn first_frame_always_runs() {
        let mut limiter = FrameLimiter::new(1);
        assert!(limiter.accept(1234.0));
        assert!(!limiter.accept(1300.0));
    }
}
