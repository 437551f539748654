//! Style resolution trait consumed by the renderer.

use crate::StyleRole;

/// Resolves style roles to terminal escape sequences.
///
/// Implementations must be infallible: a role without a dedicated sequence
/// resolves to the reset sequence. Resolvers are shared read-only across
/// render calls.
pub trait StyleResolver {
    /// Escape sequence for a role.
    fn resolve(&self, role: StyleRole) -> &str;

    /// Escape sequence that clears all styling.
    fn reset(&self) -> &str {
        self.resolve(StyleRole::Reset)
    }

    /// Wrap `text` in the role's sequence followed by a reset.
    fn style(&self, text: &str, role: StyleRole) -> String {
        let mut out = self.style_no_reset(text, role);
        out.push_str(self.reset());
        out
    }

    /// Prefix `text` with the role's sequence without resetting afterwards.
    fn style_no_reset(&self, text: &str, role: StyleRole) -> String {
        let start = self.resolve(role);
        let mut out = String::with_capacity(start.len() + text.len() + 4);
        out.push_str(start);
        out.push_str(text);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Brackets;

    impl StyleResolver for Brackets {
        fn resolve(&self, role: StyleRole) -> &str {
            match role {
                StyleRole::Reset => "]",
                _ => "[",
            }
        }
    }

    #[test]
    fn test_default_methods() {
        assert_eq!(Brackets.reset(), "]");
        assert_eq!(Brackets.style("x", StyleRole::Bold), "[x]");
        assert_eq!(Brackets.style_no_reset("x", StyleRole::Bold), "[x");
    }
}
