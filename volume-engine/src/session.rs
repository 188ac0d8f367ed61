use volume_physics::TriggerEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Running,
    Won,
}

/// Host-side session bookkeeping driven by trigger events.
#[derive(Debug, Clone)]
pub struct Session {
    pickups: u32,
    pickups_to_win: u32,
    scares: u32,
    scare_duration: f32,
    scare_remaining: f32,
    state: SessionState,
}

impl Session {
    pub fn new(pickups_to_win: u32, scare_duration: f32) -> Self {
        Self {
            pickups: 0,
            pickups_to_win,
            scares: 0,
            scare_duration,
            scare_remaining: 0.0,
            state: SessionState::Running,
        }
    }

    pub fn handle(&mut self, event: TriggerEvent) {
        match event {
            TriggerEvent::Pickup => {
                self.pickups += 1;
                log::info!("Pickup {}/{}", self.pickups, self.pickups_to_win);
                if self.pickups >= self.pickups_to_win && self.state == SessionState::Running {
                    self.state = SessionState::Won;
                    log::info!("All pickups collected");
                }
            }
            TriggerEvent::Scare => {
                self.scares += 1;
                self.scare_remaining = self.scare_duration;
                log::info!("Scare overlay shown");
            }
            TriggerEvent::Custom(id) => log::debug!("Unhandled custom trigger {}", id),
        }
    }

    /// Counts down the scare overlay.
    pub fn advance(&mut self, dt: f32) {
        if self.scare_remaining > 0.0 {
            self.scare_remaining = (self.scare_remaining - dt).max(0.0);
            if self.scare_remaining == 0.0 {
                log::info!("Scare overlay hidden");
            }
        }
    }

    pub fn pickups(&self) -> u32 {
        self.pickups
    }

    pub fn pickups_to_win(&self) -> u32 {
        self.pickups_to_win
    }

    pub fn scares(&self) -> u32 {
        self.scares
    }

    pub fn is_scare_visible(&self) -> bool {
        self.scare_remaining > 0.0
    }

    pub fn is_over(&self) -> bool {
        self.state == SessionState::Won
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wins_after_required_pickups() {
        let mut session = Session::new(4, 2.0);
        for _ in 0..3 {
            session.handle(TriggerEvent::Pickup);
        }
        assert!(!session.is_over());
        session.handle(TriggerEvent::Pickup);
        assert!(session.is_over());
        assert_eq!(session.pickups(), 4);
    }

    #[test]
    fn test_scare_overlay_times_out() {
        let mut session = Session::new(4, 2.0);
        session.handle(TriggerEvent::Scare);
        assert!(session.is_scare_visible());

        session.advance(1.5);
        assert!(session.is_scare_visible());
        session.advance(0.6);
        assert!(!session.is_scare_visible());
        assert_eq!(session.scares(), 1);
    }

    #[test]
    fn test_custom_events_do_not_count() {
        let mut session = Session::new(1, 2.0);
        session.handle(TriggerEvent::Custom(7));
        assert_eq!(session.pickups(), 0);
        assert!(!session.is_over());
    }
}
