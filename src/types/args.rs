//! Message templates and the arguments substituted into them.
//!
//! Templates use positional `{}` placeholders. `{{` and `}}` produce literal
//! braces; any other brace, and a `{}` with no argument left, is copied
//! verbatim. Surplus arguments do not appear in the message.

use super::display_safe;
use core::fmt::Display;
use smallvec::SmallVec;
use std::error::Error as StdError;

/// Boxed error type accepted as a cause.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// One template argument, already classified.
pub enum Arg {
    Text(String),
    Error(BoxError),
}

impl Arg {
    #[inline]
    pub fn text(value: impl Display) -> Self {
        Self::Text(value.to_string())
    }

    #[inline]
    pub fn error(error: impl StdError + Send + Sync + 'static) -> Self {
        Self::Error(Box::new(error))
    }

    pub(crate) fn into_error(self) -> Option<BoxError> {
        match self {
            Self::Error(e) => Some(e),
            Self::Text(_) => None,
        }
    }

    fn write_to(&self, out: &mut String) {
        match self {
            Self::Text(s) => out.push_str(s),
            Self::Error(e) => out.push_str(&display_safe(&**e)),
        }
    }
}

impl core::fmt::Debug for Arg {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Self::Error(e) => f.debug_tuple("Error").field(e).finish(),
        }
    }
}

/// Inline storage for the handful of arguments a message usually has.
pub type ArgVec = SmallVec<[Arg; 4]>;

/// Substitutes `args` into `template`.
pub fn render(template: &str, args: &[Arg]) -> String {
    let mut out = String::with_capacity(template.len() + args.len() * 16);
    let mut args = args.iter();
    let mut rest = template;

    while let Some(i) = rest.find(['{', '}']) {
        out.push_str(&rest[..i]);
        let tail = &rest[i..];
        if tail.starts_with("{{") {
            out.push('{');
            rest = &tail[2..];
        } else if tail.starts_with("}}") {
            out.push('}');
            rest = &tail[2..];
        } else if tail.starts_with("{}") {
            match args.next() {
                Some(arg) => arg.write_to(&mut out),
                None => out.push_str("{}"),
            }
            rest = &tail[2..];
        } else {
            out.push_str(&tail[..1]);
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

/// Autoref dispatch used by [`new!`](crate::new).
///
/// The macro wraps each argument in [`Tag`] and calls `errtrail_arg_kind` on
/// `&&&Tag<T>`. Method lookup tries the impls below in this order and stops
/// at the first that applies:
///
/// 1. `&Error`: the shared handle is cloned and becomes the cause.
/// 2. any other reference to a `Display` value: rendered as text, since a
///    borrowed foreign error cannot be stored.
/// 3. an owned `std::error::Error`: becomes the cause.
/// 4. any other `Display` value: rendered as text.
#[doc(hidden)]
pub mod kind {
    use super::Arg;
    use crate::types::Error;
    use core::fmt::Display;
    use std::error::Error as StdError;

    pub struct Tag<T>(pub T);

    pub struct LibraryRefArg;

    pub trait LibraryRefArgKind {
        #[inline]
        fn errtrail_arg_kind(&self) -> LibraryRefArg {
            LibraryRefArg
        }
    }

    impl LibraryRefArgKind for &&Tag<&Error> {}

    impl LibraryRefArg {
        #[inline]
        pub fn into_arg(self, error: &Error) -> Arg {
            Arg::error(error.clone())
        }
    }

    pub struct BorrowedTextArg;

    pub trait BorrowedTextArgKind {
        #[inline]
        fn errtrail_arg_kind(&self) -> BorrowedTextArg {
            BorrowedTextArg
        }
    }

    impl<T: ?Sized + Display> BorrowedTextArgKind for &&&Tag<&T> {}

    impl BorrowedTextArg {
        #[inline]
        pub fn into_arg<T: ?Sized + Display>(self, value: &T) -> Arg {
            Arg::text(value)
        }
    }

    pub struct ErrorArg;

    pub trait ErrorArgKind {
        #[inline]
        fn errtrail_arg_kind(&self) -> ErrorArg {
            ErrorArg
        }
    }

    impl<E> ErrorArgKind for &Tag<E> where E: StdError + Send + Sync + 'static {}

    impl ErrorArg {
        #[inline]
        pub fn into_arg<E>(self, error: E) -> Arg
        where
            E: StdError + Send + Sync + 'static,
        {
            Arg::error(error)
        }
    }

    pub struct TextArg;

    pub trait TextArgKind {
        #[inline]
        fn errtrail_arg_kind(&self) -> TextArg {
            TextArg
        }
    }

    impl<T: Display> TextArgKind for Tag<T> {}

    impl TextArg {
        #[inline]
        pub fn into_arg<T: Display>(self, value: T) -> Arg {
            Arg::text(value)
        }
    }

    #[inline]
    pub fn collect<const N: usize>(args: [Arg; N]) -> super::ArgVec {
        args.into_iter().collect()
    }
}
