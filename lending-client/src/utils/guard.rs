use std::sync::atomic::{AtomicBool, Ordering};
use tokio_util::sync::CancellationToken;

/// Single-flag debounce: at most one submission of an action in flight.
#[derive(Debug, Default)]
pub struct SubmitGuard {
    in_flight: AtomicBool,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` while another permit is alive.
    pub fn try_acquire(&self) -> Option<SubmitPermit<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitPermit { guard: self })
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Releases the guard when dropped, whatever path the submission took.
#[derive(Debug)]
pub struct SubmitPermit<'a> {
    guard: &'a SubmitGuard,
}

impl Drop for SubmitPermit<'_> {
    fn drop(&mut self) {
        self.guard.in_flight.store(false, Ordering::Release);
    }
}

/// Lifetime of one mounted screen instance. Async results that complete
/// after `unmount()` must be discarded.
#[derive(Debug, Clone, Default)]
pub struct ScreenScope {
    token: CancellationToken,
}

impl ScreenScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mounted(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn unmount(&self) {
        self.token.cancel();
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_until_release() {
        let guard = SubmitGuard::new();
        let permit = guard.try_acquire().expect("first acquire");
        assert!(guard.is_in_flight());
        assert!(guard.try_acquire().is_none());

        drop(permit);
        assert!(!guard.is_in_flight());
        assert!(guard.try_acquire().is_some());
    }

    #[test]
    fn permit_released_on_early_return() {
        fn fails(guard: &SubmitGuard) -> Result<(), &'static str> {
            let _permit = guard.try_acquire().ok_or("busy")?;
            Err("backend down")
        }

        let guard = SubmitGuard::new();
        assert_eq!(fails(&guard), Err("backend down"));
        assert!(!guard.is_in_flight());
    }

    #[test]
    fn unmount_is_visible_to_clones() {
        let scope = ScreenScope::new();
        let captured = scope.clone();
        assert!(captured.is_mounted());

        scope.unmount();
        assert!(!captured.is_mounted());
        assert!(captured.token().is_cancelled());
    }
}
