//! Render loop lifecycle.

/// Lifecycle states of the scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Loaded,
    Rendering,
    Closed,
}

/// Tracks the `Uninitialized -> Loaded -> Rendering -> Closed` progression
/// and whether a close has been requested.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    state: LifecycleState,
    close_requested: bool,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            state: LifecycleState::Uninitialized,
            close_requested: false,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_close_requested(&self) -> bool {
        self.close_requested
    }

    /// True while frames should be produced.
    pub fn is_running(&self) -> bool {
        matches!(
            self.state,
            LifecycleState::Loaded | LifecycleState::Rendering
        ) && !self.close_requested
    }

    /// Move from `Uninitialized` to `Loaded`. Returns false from any other state.
    pub fn load(&mut self) -> bool {
        if self.state != LifecycleState::Uninitialized {
            return false;
        }
        self.state = LifecycleState::Loaded;
        true
    }

    /// Enter `Rendering` for the next frame. Returns false if no frame should be drawn.
    pub fn begin_frame(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = LifecycleState::Rendering;
        true
    }

    /// Record a close request. Returns true only for the first request.
    pub fn request_close(&mut self) -> bool {
        if self.close_requested || self.state == LifecycleState::Closed {
            return false;
        }
        self.close_requested = true;
        true
    }

    /// Move to `Closed`. Returns true only on the first call.
    pub fn close(&mut self) -> bool {
        if self.state == LifecycleState::Closed {
            return false;
        }
        self.close_requested = true;
        self.state = LifecycleState::Closed;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_progression() {
        let mut lifecycle = Lifecycle::new();
        assert_eq!(lifecycle.state(), LifecycleState::Uninitialized);
        assert!(!lifecycle.begin_frame());

        assert!(lifecycle.load());
        assert_eq!(lifecycle.state(), LifecycleState::Loaded);
        assert!(!lifecycle.load());

        assert!(lifecycle.begin_frame());
        assert!(lifecycle.begin_frame());
        assert_eq!(lifecycle.state(), LifecycleState::Rendering);

        assert!(lifecycle.close());
        assert_eq!(lifecycle.state(), LifecycleState::Closed);
        assert!(!lifecycle.close());
        assert!(!lifecycle.begin_frame());
    }

    #[test]
    fn test_close_request_is_idempotent() {
        let mut lifecycle = Lifecycle::new();
        lifecycle.load();
        assert!(!lifecycle.is_close_requested());

        assert!(lifecycle.request_close());
        assert!(lifecycle.is_close_requested());
        assert!(!lifecycle.request_close());
        assert!(!lifecycle.is_running());
        assert!(!lifecycle.begin_frame());

        // Still needs the final close
        assert_eq!(lifecycle.state(), LifecycleState::Loaded);
        assert!(lifecycle.close());
        assert!(!lifecycle.request_close());
    }
}
