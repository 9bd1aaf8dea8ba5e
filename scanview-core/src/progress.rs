//! Estimated scan progress.
//!
//! The scan service reports nothing until the scan is done, so progress is
//! simulated: it creeps towards 95% over about 35 seconds and jumps to 100%
//! when the request settles.

/// Interval between progress ticks in milliseconds.
pub const TICK_MS: u32 = 100;
/// Progress never passes this value before the scan finishes.
pub const PROGRESS_CEILING: f64 = 95.0;
/// Percent added per tick (95% over 350 ticks).
pub const PROGRESS_STEP: f64 = 95.0 / 350.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanPhase {
    #[default]
    Idle,
    Scanning,
    Done,
    Failed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScanProgress {
    percent: f64,
    phase: ScanPhase,
}

impl ScanProgress {
    pub fn start() -> Self {
        Self {
            percent: 0.0,
            phase: ScanPhase::Scanning,
        }
    }

    /// Advance one tick. Has no effect once the scan has settled.
    pub fn tick(&mut self) {
        if self.phase == ScanPhase::Scanning {
            self.percent = (self.percent + PROGRESS_STEP).min(PROGRESS_CEILING);
        }
    }

    pub fn complete(&mut self) {
        self.settle(ScanPhase::Done);
    }

    pub fn fail(&mut self) {
        self.settle(ScanPhase::Failed);
    }

    fn settle(&mut self, phase: ScanPhase) {
        self.percent = 100.0;
        self.phase = phase;
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    pub fn is_scanning(&self) -> bool {
        self.phase == ScanPhase::Scanning
    }

    /// Status line while scanning, e.g. `Scanning... 42%`.
    pub fn status(&self) -> String {
        format!("Scanning... {}%", self.percent.round() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let p = ScanProgress::start();
        assert_eq!(p.percent(), 0.0);
        assert!(p.is_scanning());
        assert_eq!(p.status(), "Scanning... 0%");
    }

    #[test]
    fn reaches_ceiling_after_350_ticks() {
        let mut p = ScanProgress::start();
        for _ in 0..349 {
            p.tick();
        }
        assert!(p.percent() < PROGRESS_CEILING);

        for _ in 0..100 {
            p.tick();
        }
        assert_eq!(p.percent(), PROGRESS_CEILING);
        assert_eq!(p.status(), "Scanning... 95%");
    }

    #[test]
    fn complete_jumps_to_full_and_stops() {
        let mut p = ScanProgress::start();
        p.tick();
        p.complete();
        p.tick();

        assert_eq!(p.percent(), 100.0);
        assert_eq!(p.phase(), ScanPhase::Done);
        assert!(!p.is_scanning());
    }

    #[test]
    fn failure_also_fills_bar() {
        let mut p = ScanProgress::start();
        p.fail();
        assert_eq!(p.percent(), 100.0);
        assert_eq!(p.phase(), ScanPhase::Failed);
    }

    #[test]
    fn idle_progress_does_not_tick() {
        let mut p = ScanProgress::default();
        p.tick();
        assert_eq!(p.percent(), 0.0);
    }
}
