//! Enum-context tracking.

use crate::markers::Findings;

/// Whether the current line lies inside an enum body.
///
/// One value belongs to exactly one file session. Enum bodies do not nest,
/// and a message is never expected to open while the context is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnumContext {
    inside: bool,
}

impl EnumContext {
    /// Creates a context outside of any enum.
    #[must_use]
    pub const fn new() -> Self {
        Self { inside: false }
    }

    /// Returns true while inside an enum body.
    #[must_use]
    pub const fn is_inside(&self) -> bool {
        self.inside
    }

    /// Returns true if the line opens an enum outside of any comment.
    #[must_use]
    pub fn should_enter(findings: &Findings) -> bool {
        findings.enters_enum()
    }

    /// Returns true if the line closes the enum currently being tracked.
    #[must_use]
    pub fn should_exit(&self, findings: &Findings) -> bool {
        self.inside && findings.block_close.is_some()
    }

    /// Enters the enum body if the line opens one.
    pub fn observe_entry(&mut self, findings: &Findings) {
        if Self::should_enter(findings) {
            self.inside = true;
        }
    }

    /// Leaves the enum body.
    pub fn leave(&mut self) {
        self.inside = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_outside() {
        assert!(!EnumContext::new().is_inside());
        assert_eq!(EnumContext::default(), EnumContext::new());
    }

    #[test]
    fn test_enter_on_enum_keyword() {
        let mut ctx = EnumContext::new();
        ctx.observe_entry(&Findings::classify("enum Color {"));
        assert!(ctx.is_inside());
    }

    #[test]
    fn test_commented_enum_does_not_enter() {
        let mut ctx = EnumContext::new();
        ctx.observe_entry(&Findings::classify("// enum Color {"));
        assert!(!ctx.is_inside());
    }

    #[test]
    fn test_exit_requires_being_inside() {
        let closing = Findings::classify("}");
        let outside = EnumContext::new();
        assert!(!outside.should_exit(&closing));

        let mut inside = EnumContext::new();
        inside.observe_entry(&Findings::classify("enum Color {"));
        assert!(inside.should_exit(&closing));
        assert!(!inside.should_exit(&Findings::classify("RED = 0;")));
    }

    #[test]
    fn test_leave() {
        let mut ctx = EnumContext::new();
        ctx.observe_entry(&Findings::classify("enum Color {"));
        ctx.leave();
        assert!(!ctx.is_inside());
    }
}
