/// Process-wide suspension of interrupts and preemptive scheduling.
///
/// Suspension affects the whole system, not only the strip's pin.
/// Nesting is only safe if the implementation says so.
pub trait InterruptControl {
    /// Whatever is needed to restore the previous interrupt state.
    type State;

    /// Suspends all interrupt sources.
    fn suspend_all(&mut self) -> Self::State;

    /// Restores the interrupt state saved by [suspend_all](InterruptControl::suspend_all).
    fn resume_all(&mut self, state: Self::State);
}

/// Interrupt control through the [critical_section] crate.
///
/// Requires a `critical-section` implementation for the target,
/// usually provided by the HAL or the runtime crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct CriticalSectionInterrupts;

impl InterruptControl for CriticalSectionInterrupts {
    type State = critical_section::RestoreState;

    fn suspend_all(&mut self) -> Self::State {
        // SAFETY: only ever called through `InterruptsSuspended`, which
        // releases in `Drop` and cannot be nested by the driver.
        unsafe { critical_section::acquire() }
    }

    fn resume_all(&mut self, state: Self::State) {
        // SAFETY: `state` comes from the matching `acquire` above.
        unsafe { critical_section::release(state) }
    }
}

/// Keeps interrupts suspended until dropped.
pub(crate) struct InterruptsSuspended<'a, I: InterruptControl> {
    control: &'a mut I,
    state: Option<I::State>,
}

impl<'a, I: InterruptControl> InterruptsSuspended<'a, I> {
    pub(crate) fn new(control: &'a mut I) -> Self {
        let state = control.suspend_all();
        Self {
            control,
            state: Some(state),
        }
    }
}

impl<I: InterruptControl> Drop for InterruptsSuspended<'_, I> {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            self.control.resume_all(state);
        }
    }
}
