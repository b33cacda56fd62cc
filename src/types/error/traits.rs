use super::Error;
use core::fmt::{self, Debug, Display};
use std::error::Error as StdError;

impl Display for Error {
    /// `{}` writes the message, plus the invisible identity marker for root
    /// errors. `{:#}` writes the full multi-line trace.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return self.multi_line_printer().write_all(f);
        }
        f.write_str(self.message())?;
        if let Some(marker) = self.marker() {
            f.write_str(marker)?;
        }
        Ok(())
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("id", &self.id())
            .field("kind", &self.kind())
            .field("message", &self.message())
            .field("data", &self.data())
            .field("context", self.context())
            .field("cause", &self.source())
            .finish()
    }
}

impl StdError for Error {
    /// `None` for root errors: they have nothing to unwrap to.
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.cause.as_ref().map(|cause| cause.as_dyn())
    }
}

impl PartialEq for Error {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Error {}
