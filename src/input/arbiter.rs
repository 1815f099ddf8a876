//! Exclusive pointer-to-role binding.
//!
//! Each [`PointerRole`] holds at most one pointer at a time. The first
//! pointer to go down in a role's region owns the role until that same
//! pointer lifts or is cancelled; any other pointer competing for the role
//! in the meantime is ignored outright (not queued, not promoted later).

use glam::Vec2;

use super::event::{PointerId, PointerRole};

/// Exclusive association of one pointer with one role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerBinding {
    /// The role this pointer drives.
    pub role: PointerRole,
    /// The bound pointer.
    pub pointer: PointerId,
    /// Where the pointer went down.
    pub origin: Vec2,
    /// Most recent position seen for this pointer.
    pub last: Vec2,
}

/// Movement of a bound pointer, as routed to its role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerMotion {
    /// Role the moving pointer is bound to.
    pub role: PointerRole,
    /// Where the pointer went down.
    pub origin: Vec2,
    /// Current position.
    pub position: Vec2,
    /// Movement since the previous event for this pointer.
    pub delta: Vec2,
}

/// Binding table keyed by role.
#[derive(Debug, Default)]
pub struct PointerArbiter {
    look: Option<PointerBinding>,
    joystick: Option<PointerBinding>,
}

impl PointerArbiter {
    /// Create an arbiter with both roles free.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, role: PointerRole) -> &mut Option<PointerBinding> {
        match role {
            PointerRole::Look => &mut self.look,
            PointerRole::Joystick => &mut self.joystick,
        }
    }

    fn find_mut(&mut self, pointer: PointerId) -> Option<&mut PointerBinding> {
        [&mut self.look, &mut self.joystick]
            .into_iter()
            .filter_map(Option::as_mut)
            .find(|b| b.pointer == pointer)
    }

    /// The current binding for `role`, if any.
    #[must_use]
    pub fn binding(&self, role: PointerRole) -> Option<&PointerBinding> {
        match role {
            PointerRole::Look => self.look.as_ref(),
            PointerRole::Joystick => self.joystick.as_ref(),
        }
    }

    /// The role `pointer` is bound to, if any.
    #[must_use]
    pub fn role_of(&self, pointer: PointerId) -> Option<PointerRole> {
        [&self.look, &self.joystick]
            .into_iter()
            .flatten()
            .find(|b| b.pointer == pointer)
            .map(|b| b.role)
    }

    /// Try to bind `pointer` to `role`. Returns `true` when the binding was
    /// created; `false` when the role is already held (or the pointer
    /// already owns a role), in which case nothing changes.
    pub fn press(
        &mut self,
        pointer: PointerId,
        position: Vec2,
        role: PointerRole,
    ) -> bool {
        if self.role_of(pointer).is_some() {
            log::trace!("pointer {pointer:?} already bound, ignoring down");
            return false;
        }
        let slot = self.slot_mut(role);
        if slot.is_some() {
            log::trace!("{role:?} already held, ignoring pointer {pointer:?}");
            return false;
        }
        *slot = Some(PointerBinding {
            role,
            pointer,
            origin: position,
            last: position,
        });
        log::debug!("pointer {pointer:?} bound to {role:?}");
        true
    }

    /// Route a move to the role bound to `pointer`. Moves from unbound
    /// pointers are dropped.
    pub fn motion(
        &mut self,
        pointer: PointerId,
        position: Vec2,
    ) -> Option<PointerMotion> {
        let Some(binding) = self.find_mut(pointer) else {
            log::trace!("stale move from pointer {pointer:?}");
            return None;
        };
        let delta = position - binding.last;
        binding.last = position;
        Some(PointerMotion {
            role: binding.role,
            origin: binding.origin,
            position,
            delta,
        })
    }

    /// Release whichever role `pointer` holds. Unmatched releases are
    /// no-ops and return `None`.
    pub fn release(&mut self, pointer: PointerId) -> Option<PointerRole> {
        let role = self.role_of(pointer)?;
        *self.slot_mut(role) = None;
        log::debug!("pointer {pointer:?} released {role:?}");
        Some(role)
    }

    /// Drop every binding (surface detached or lost focus).
    pub fn clear(&mut self) {
        self.look = None;
        self.joystick = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: PointerId = PointerId(1);
    const B: PointerId = PointerId(2);

    #[test]
    fn first_claimant_wins() {
        let mut arbiter = PointerArbiter::new();
        assert!(arbiter.press(A, Vec2::new(10.0, 10.0), PointerRole::Look));
        assert!(!arbiter.press(B, Vec2::new(50.0, 50.0), PointerRole::Look));

        // B's moves go nowhere while A holds the role.
        assert_eq!(arbiter.motion(B, Vec2::new(60.0, 50.0)), None);
        let binding = arbiter.binding(PointerRole::Look).unwrap();
        assert_eq!(binding.pointer, A);
        assert_eq!(binding.last, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn loser_is_not_promoted_after_release() {
        let mut arbiter = PointerArbiter::new();
        assert!(arbiter.press(A, Vec2::ZERO, PointerRole::Look));
        assert!(!arbiter.press(B, Vec2::ZERO, PointerRole::Look));
        assert_eq!(arbiter.release(A), Some(PointerRole::Look));
        assert!(arbiter.binding(PointerRole::Look).is_none());
        assert_eq!(arbiter.motion(B, Vec2::ONE), None);
    }

    #[test]
    fn stale_release_is_a_no_op() {
        let mut arbiter = PointerArbiter::new();
        assert!(arbiter.press(A, Vec2::ZERO, PointerRole::Joystick));
        assert_eq!(arbiter.release(B), None);
        assert_eq!(arbiter.role_of(A), Some(PointerRole::Joystick));
    }

    #[test]
    fn roles_bind_independently() {
        let mut arbiter = PointerArbiter::new();
        assert!(arbiter.press(
            A,
            Vec2::new(40.0, 600.0),
            PointerRole::Joystick
        ));
        assert!(arbiter.press(B, Vec2::new(500.0, 300.0), PointerRole::Look));

        let look = arbiter.motion(B, Vec2::new(510.0, 295.0)).unwrap();
        assert_eq!(look.role, PointerRole::Look);
        assert_eq!(look.delta, Vec2::new(10.0, -5.0));

        let joy = arbiter.motion(A, Vec2::new(40.0, 560.0)).unwrap();
        assert_eq!(joy.role, PointerRole::Joystick);
        assert_eq!(joy.origin, Vec2::new(40.0, 600.0));
    }

    #[test]
    fn bound_pointer_cannot_claim_second_role() {
        let mut arbiter = PointerArbiter::new();
        assert!(arbiter.press(A, Vec2::ZERO, PointerRole::Look));
        assert!(!arbiter.press(A, Vec2::ZERO, PointerRole::Joystick));
        assert!(arbiter.binding(PointerRole::Joystick).is_none());
    }

    #[test]
    fn deltas_accumulate_from_last_position() {
        let mut arbiter = PointerArbiter::new();
        assert!(arbiter.press(A, Vec2::new(100.0, 100.0), PointerRole::Look));
        let first = arbiter.motion(A, Vec2::new(110.0, 100.0)).unwrap();
        let second = arbiter.motion(A, Vec2::new(115.0, 90.0)).unwrap();
        assert_eq!(first.delta, Vec2::new(10.0, 0.0));
        assert_eq!(second.delta, Vec2::new(5.0, -10.0));
    }
}
