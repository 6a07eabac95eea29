use maze_common::util::config::StepMode;

/// How fine-grained a progress event is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepLevel {
    /// Expansion rounds and traceback steps.
    Wave,
    /// One target pin connected.
    Destination,
    /// A net routed, found unroutable, or ripped up.
    Net,
}

pub fn reports(mode: StepMode, level: StepLevel) -> bool {
    match mode {
        StepMode::Wave => true,
        StepMode::Destination => level != StepLevel::Wave,
        StepMode::Net => level == StepLevel::Net,
        StepMode::RouteAll => false,
    }
}

/// Receives routing progress. Its return value never feeds back into routing.
pub trait StepObserver {
    fn on_step(&mut self, status: &str);
}

/// Headless default.
pub struct NoObserver;

impl StepObserver for NoObserver {
    #[inline(always)]
    fn on_step(&mut self, _status: &str) {}
}

/// Keeps every status line; handy for replaying a run.
#[derive(Debug, Default)]
pub struct StepRecorder {
    pub steps: Vec<String>,
}

impl StepObserver for StepRecorder {
    fn on_step(&mut self, status: &str) {
        self.steps.push(status.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coarser_modes_report_fewer_levels() {
        use StepLevel::*;
        let levels = [Wave, Destination, Net];
        let count = |mode| levels.iter().filter(|&&l| reports(mode, l)).count();
        assert_eq!(count(StepMode::Wave), 3);
        assert_eq!(count(StepMode::Destination), 2);
        assert_eq!(count(StepMode::Net), 1);
        assert_eq!(count(StepMode::RouteAll), 0);
        assert!(reports(StepMode::Destination, Net));
        assert!(!reports(StepMode::Net, Destination));
    }
}
