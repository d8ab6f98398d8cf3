//! Connection lifecycle state machine.
//!
//! Pure state machine: it consumes [`LifecycleEvent`] observations and
//! produces
//! [`IndicatorAction`] instructions for the runtime to execute against the
//! busy indicator. No I/O dependencies, fully testable.
//!
//! `Closed` is terminal and absorbs every further event, which is what
//! makes repeated shutdown signals idempotent at this layer.

/// Spinner text shown while no remote connection exists.
pub const WAITING_TEXT: &str = "Waiting for connection";

/// Lifecycle of the remote source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No remote connection yet. Initial state.
    Disconnected,
    /// Remote connection established.
    Connected,
    /// Remote source finished or shutdown requested. Terminal.
    Closed,
}

/// Observations fed into the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Remote source reports an active connection.
    RemoteConnected,
    /// Remote source reports no active connection (transient, not closed).
    RemoteDisconnected,
    /// Remote source reports closed.
    RemoteClosed,
    /// Interrupt/termination signal or exit hook.
    ShutdownRequested,
}

/// Instructions for the busy indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndicatorAction {
    /// Show the spinner with the given text.
    Show {
        /// Spinner message.
        text: &'static str,
    },
    /// Hide the spinner.
    Hide,
}

/// Connection/shutdown state machine driving the busy indicator.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    state: ConnectionState,
}

impl Lifecycle {
    /// New machine in `Disconnected`.
    pub fn new() -> Self {
        Self { state: ConnectionState::Disconnected }
    }

    /// Current state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Whether the terminal state has been reached.
    pub fn is_closed(&self) -> bool {
        self.state == ConnectionState::Closed
    }

    /// Process an observation and return indicator instructions.
    pub fn handle(&mut self, event: LifecycleEvent) -> Vec<IndicatorAction> {
        if self.state == ConnectionState::Closed {
            return vec![];
        }

        match event {
            LifecycleEvent::RemoteConnected => {
                self.state = ConnectionState::Connected;
                vec![IndicatorAction::Hide]
            },
            LifecycleEvent::RemoteDisconnected => {
                // Transient loss while not closed: the spinner reappears,
                // but a previously connected source stays Connected.
                vec![IndicatorAction::Show { text: WAITING_TEXT }]
            },
            LifecycleEvent::RemoteClosed | LifecycleEvent::ShutdownRequested => {
                self.state = ConnectionState::Closed;
                vec![IndicatorAction::Hide]
            },
        }
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_disconnected() {
        assert_eq!(Lifecycle::new().state(), ConnectionState::Disconnected);
    }

    #[test]
    fn connected_event_transitions_and_hides_indicator() {
        let mut lifecycle = Lifecycle::new();
        let actions = lifecycle.handle(LifecycleEvent::RemoteConnected);

        assert_eq!(lifecycle.state(), ConnectionState::Connected);
        assert_eq!(actions, vec![IndicatorAction::Hide]);
    }

    #[test]
    fn closed_is_reachable_from_any_state() {
        let mut from_disconnected = Lifecycle::new();
        let _ = from_disconnected.handle(LifecycleEvent::RemoteClosed);
        assert!(from_disconnected.is_closed());

        let mut from_connected = Lifecycle::new();
        let _ = from_connected.handle(LifecycleEvent::RemoteConnected);
        let _ = from_connected.handle(LifecycleEvent::RemoteClosed);
        assert!(from_connected.is_closed());
    }

    #[test]
    fn transient_disconnect_shows_spinner_without_state_change() {
        let mut lifecycle = Lifecycle::new();
        let _ = lifecycle.handle(LifecycleEvent::RemoteConnected);
        let actions = lifecycle.handle(LifecycleEvent::RemoteDisconnected);

        assert_eq!(lifecycle.state(), ConnectionState::Connected);
        assert_eq!(actions, vec![IndicatorAction::Show { text: WAITING_TEXT }]);
    }

    #[test]
    fn close_twice_matches_close_once() {
        let mut once = Lifecycle::new();
        let _ = once.handle(LifecycleEvent::ShutdownRequested);

        let mut twice = Lifecycle::new();
        let _ = twice.handle(LifecycleEvent::ShutdownRequested);
        let repeat = twice.handle(LifecycleEvent::ShutdownRequested);

        assert_eq!(once.state(), twice.state());
        assert!(repeat.is_empty());
    }

    #[test]
    fn no_transition_leaves_closed() {
        let mut lifecycle = Lifecycle::new();
        let _ = lifecycle.handle(LifecycleEvent::RemoteClosed);
        let _ = lifecycle.handle(LifecycleEvent::RemoteConnected);

        assert!(lifecycle.is_closed());
    }
}
