//! The [`new!`](crate::new) constructor macro.

/// Creates an [`Error`](crate::Error) from a message template.
///
/// Each argument replaces the next `{}` in the template using its `Display`
/// output. An owned argument whose type implements `std::error::Error`, or a
/// borrowed [`Error`](crate::Error), is also kept as the cause; the first
/// such argument wins and turns the result into a wrapping error. Without one
/// the result is a root error. Other borrowed errors are rendered as text
/// only.
///
/// The call stack is captured at the macro invocation.
///
/// # Examples
///
/// ```
/// use errtrail::new;
/// use std::error::Error as _;
///
/// let root = new!("Hello {}", "There");
/// assert!(root.to_string().starts_with("Hello There"));
/// assert!(root.source().is_none());
///
/// let cause = std::io::Error::other("World");
/// let err = new!("Hello {}", cause);
/// assert_eq!(err.message(), "Hello World");
/// assert_eq!(err.clean_message(), "Hello {}");
/// assert!(err.is_caused_by::<std::io::Error>());
/// ```
#[macro_export]
macro_rules! new {
    ($template:expr $(,)?) => {
        $crate::Error::new($template)
    };
    ($template:expr, $($arg:expr),+ $(,)?) => {{
        #[allow(unused_imports)]
        use $crate::types::args::kind::{
            BorrowedTextArgKind as _, ErrorArgKind as _, LibraryRefArgKind as _, TextArgKind as _,
        };
        $crate::Error::from_args(
            $template,
            $crate::types::args::kind::collect([$(
                match $arg {
                    arg => {
                        let tag = $crate::types::args::kind::Tag(arg);
                        (&&&tag).errtrail_arg_kind().into_arg(tag.0)
                    },
                }
            ),+]),
        )
    }};
}
