use serde::{Deserialize, Serialize};
use tracing::warn;
use warden_types::{Identifier, PauseState, WardenError, WardenResult};

use crate::admins::AdminRegistry;

/// Emergency switch between `Active` and `Paused`.
///
/// Starts `Paused`. Only an admin may toggle it, and toggling into the state
/// the gate is already in is rejected with `NoOpState`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauseGate {
    state: PauseState,
}

impl PauseGate {
    pub fn new() -> Self {
        Self {
            state: PauseState::Paused,
        }
    }

    pub fn state(&self) -> PauseState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    pub fn pause(&mut self, admins: &AdminRegistry, caller: Identifier) -> WardenResult<()> {
        self.transition(admins, caller, PauseState::Paused)
    }

    pub fn unpause(&mut self, admins: &AdminRegistry, caller: Identifier) -> WardenResult<()> {
        self.transition(admins, caller, PauseState::Active)
    }

    fn transition(
        &mut self,
        admins: &AdminRegistry,
        caller: Identifier,
        target: PauseState,
    ) -> WardenResult<()> {
        admins.require_admin(caller)?;
        if self.state == target {
            return Err(WardenError::NoOpState(match target {
                PauseState::Paused => "already paused",
                PauseState::Active => "already active",
            }));
        }

        self.state = target;
        warn!(state = %target, by = %caller, "Pause gate toggled");
        Ok(())
    }

    /// Fails with `WrongPauseState` unless the gate is in `required`.
    pub fn require(&self, required: PauseState) -> WardenResult<()> {
        if self.state == required {
            Ok(())
        } else {
            Err(WardenError::WrongPauseState {
                current: self.state,
            })
        }
    }

    pub fn require_paused(&self) -> WardenResult<()> {
        self.require(PauseState::Paused)
    }

    pub fn require_active(&self) -> WardenResult<()> {
        self.require(PauseState::Active)
    }

    /// Run `op` only while paused.
    pub fn when_paused<T>(&self, op: impl FnOnce() -> WardenResult<T>) -> WardenResult<T> {
        self.require_paused()?;
        op()
    }

    /// Run `op` only while active.
    pub fn when_not_paused<T>(&self, op: impl FnOnce() -> WardenResult<T>) -> WardenResult<T> {
        self.require_active()?;
        op()
    }
}

impl Default for PauseGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Identifier {
        Identifier::derive("admin")
    }

    fn setup() -> (AdminRegistry, PauseGate) {
        (AdminRegistry::new(admin()).unwrap(), PauseGate::new())
    }

    #[test]
    fn starts_paused() {
        let (_, gate) = setup();
        assert!(gate.is_paused());
        assert_eq!(gate.state(), PauseState::Paused);
    }

    #[test]
    fn normal_process_runs_when_active() {
        let (admins, mut gate) = setup();
        gate.unpause(&admins, admin()).unwrap();

        let mut count = 0;
        gate.when_not_paused(|| {
            count += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn normal_process_blocked_when_paused() {
        let (_, gate) = setup();
        let mut count = 0;
        let err = gate
            .when_not_paused(|| {
                count += 1;
                Ok(())
            })
            .unwrap_err();
        assert_eq!(
            err,
            WardenError::WrongPauseState {
                current: PauseState::Paused
            }
        );
        assert_eq!(count, 0);
    }

    #[test]
    fn drastic_measure_only_when_paused() {
        let (admins, mut gate) = setup();
        let mut taken = false;
        gate.when_paused(|| {
            taken = true;
            Ok(())
        })
        .unwrap();
        assert!(taken);

        gate.unpause(&admins, admin()).unwrap();
        let mut taken_again = false;
        assert!(gate
            .when_paused(|| {
                taken_again = true;
                Ok(())
            })
            .is_err());
        assert!(!taken_again);
    }

    #[test]
    fn resumes_after_pause_is_over() {
        let (admins, mut gate) = setup();
        gate.unpause(&admins, admin()).unwrap();
        gate.pause(&admins, admin()).unwrap();
        gate.unpause(&admins, admin()).unwrap();
        assert!(gate.require_active().is_ok());
        assert!(gate.require_paused().is_err());
    }

    #[test]
    fn repeat_transition_is_rejected() {
        let (admins, mut gate) = setup();
        assert_eq!(
            gate.pause(&admins, admin()).unwrap_err(),
            WardenError::NoOpState("already paused")
        );
        gate.unpause(&admins, admin()).unwrap();
        assert_eq!(
            gate.unpause(&admins, admin()).unwrap_err(),
            WardenError::NoOpState("already active")
        );
    }

    #[test]
    fn non_admin_cannot_toggle() {
        let (admins, mut gate) = setup();
        let mallory = Identifier::derive("mallory");
        assert!(gate.unpause(&admins, mallory).unwrap_err().is_unauthorized());
        assert!(gate.is_paused());
    }
}
