//! Step Wizard
//!
//! Shows exactly one of N form panels at a time.

/// Visibility derived from the current step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardView {
    pub active_step: u32,
    pub show_previous: bool,
    pub show_next: bool,
    pub show_submit: bool,
}

impl WizardView {
    pub fn is_active(&self, step: u32) -> bool {
        self.active_step == step
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepWizard {
    current: u32,
    total: u32,
}

impl StepWizard {
    /// Starts at step 1; a form always has at least one step
    pub fn new(total: u32) -> Self {
        Self { current: 1, total: total.max(1) }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Advance one step; no-op at the last step. Returns whether it moved.
    pub fn next(&mut self) -> bool {
        if self.current < self.total {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Go back one step; no-op at the first step. Returns whether it moved.
    pub fn previous(&mut self) -> bool {
        if self.current > 1 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    pub fn view(&self) -> WizardView {
        WizardView {
            active_step: self.current,
            show_previous: self.current > 1,
            show_next: self.current < self.total,
            show_submit: self.current == self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_count(view: &WizardView, total: u32) -> usize {
        (1..=total).filter(|s| view.is_active(*s)).count()
    }

    #[test]
    fn test_next_reaches_last_step_and_stops() {
        let total = 3;
        let mut wizard = StepWizard::new(total);
        for _ in 0..total - 1 {
            assert!(wizard.next());
            assert_eq!(active_count(&wizard.view(), total), 1);
        }
        assert_eq!(wizard.current(), total);
        assert!(!wizard.next());
        assert_eq!(wizard.current(), total);

        let view = wizard.view();
        assert!(!view.show_next);
        assert!(view.show_submit);
        assert!(view.show_previous);
    }

    #[test]
    fn test_previous_at_first_step_is_noop() {
        let mut wizard = StepWizard::new(3);
        assert!(!wizard.previous());
        let view = wizard.view();
        assert_eq!(view.active_step, 1);
        assert!(!view.show_previous);
        assert!(view.show_next);
        assert!(!view.show_submit);
    }

    #[test]
    fn test_round_trip_keeps_one_active_step() {
        let mut wizard = StepWizard::new(4);
        wizard.next();
        wizard.next();
        wizard.previous();
        assert_eq!(wizard.current(), 2);
        assert_eq!(active_count(&wizard.view(), 4), 1);
    }

    #[test]
    fn test_single_step_form() {
        let mut wizard = StepWizard::new(0);
        assert_eq!(wizard.total(), 1);
        assert!(!wizard.next());
        let view = wizard.view();
        assert!(!view.show_previous && !view.show_next && view.show_submit);
    }
}
