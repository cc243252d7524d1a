//! Display adapters for payloads that have no `Display` impl of their own.
//!
//! Facade operations accept any `T: Display`. Wrap other values:
//!
//! ```
//! use crumb_log::payload::{Debugged, Joined};
//!
//! assert_eq!(Debugged(Some(3)).to_string(), "Some(3)");
//! assert_eq!(Joined(&[1, 2, 3]).to_string(), "[1, 2, 3]");
//! ```

use std::fmt;

/// Renders the wrapped value with its `Debug` impl.
#[derive(Clone, Copy)]
pub struct Debugged<T>(pub T);

impl<T: fmt::Debug> fmt::Display for Debugged<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Renders a collection of `Display` items as `[a, b, c]`.
#[derive(Clone, Copy)]
pub struct Joined<I>(pub I);

impl<I> fmt::Display for Joined<I>
where
    I: IntoIterator + Copy,
    I::Item: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.0.into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", item)?;
        }
        f.write_str("]")
    }
}
