use errtrail::{new, wrap, Error, Link};
use std::error::Error as _;
use std::fmt;
use std::io;

#[derive(Debug)]
struct Wrapper {
    inner: Error,
}

impl fmt::Display for Wrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wrapper around {}", self.inner.message())
    }
}

impl std::error::Error for Wrapper {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.inner)
    }
}

#[test]
fn root_has_no_source() {
    assert!(Error::new("root").source().is_none());
    assert!(Error::new("root").cause().is_none());
}

#[test]
fn wrapping_has_source() {
    let err = new!("outer: {}", Error::new("inner"));
    assert!(err.source().is_some());
    assert!(matches!(err.cause(), Some(Link::Root(_))));
}

#[test]
fn root_cause_reaches_deepest_foreign_error() {
    let d = io::Error::new(io::ErrorKind::TimedOut, "d");
    let c = new!("c: {}", d);
    let b = new!("b: {}", c);
    let a = new!("a: {}", b);

    let root = a.root_cause().downcast_ref::<io::Error>().expect("io error at the end");
    assert_eq!(root.kind(), io::ErrorKind::TimedOut);
    assert_eq!(a.chain().count(), 4);
}

#[test]
fn root_cause_of_root_is_itself() {
    let err = Error::new("alone");
    let root = err.root_cause().downcast_ref::<Error>().expect("library error");
    assert!(root.ptr_eq(&err));
}

#[test]
fn chain_classifies_links() {
    let err = new!("top: {}", new!("mid: {}", io::Error::other("bottom")));
    let kinds: Vec<&str> = err
        .chain()
        .map(|link| match link {
            Link::Root(_) => "root",
            Link::Wrapping(_) => "wrapping",
            Link::Foreign(_) => "foreign",
        })
        .collect();
    assert_eq!(kinds, ["wrapping", "wrapping", "foreign"]);
}

#[test]
fn find_cause_sees_through_wrap() {
    let err = wrap(io::Error::other("inner"));
    let err = new!("outer: {}", err);
    assert!(err.is_caused_by::<io::Error>());
    assert!(!err.is_caused_by::<fmt::Error>());
}

#[test]
fn chain_continues_through_foreign_links() {
    let inner = new!("inner: {}", io::Error::other("io"));
    let err = new!("outer: {}", Wrapper { inner });
    assert!(err.is_caused_by::<Wrapper>());
    assert!(err.is_caused_by::<io::Error>());
    assert_eq!(err.chain().filter(|link| link.library().is_some()).count(), 2);
}
