use bitflags::bitflags;

bitflags! {
    /// Held movement keys.  The input layer sets a flag on key-down and
    /// clears it on key-up; the integrator reads the set once per tick.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Controls: u8 {
        const ADVANCE      = 0x01;
        const RETREAT      = 0x02;
        const STRAFE_LEFT  = 0x04;
        const STRAFE_RIGHT = 0x08;
        const TURN_LEFT    = 0x10;
        const TURN_RIGHT   = 0x20;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_press_is_idempotent() {
        let mut c = Controls::empty();
        c.insert(Controls::ADVANCE);
        c.insert(Controls::ADVANCE);
        assert_eq!(c, Controls::ADVANCE);
        c.remove(Controls::ADVANCE);
        assert!(c.is_empty());
    }
}
