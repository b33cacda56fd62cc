use super::{Error, Kind};
use core::iter::FusedIterator;
use std::error::Error as StdError;

/// One element of a causal chain.
#[derive(Debug, Clone, Copy)]
pub enum Link<'a> {
    Root(&'a Error),
    Wrapping(&'a Error),
    /// Any error not produced by this crate.
    Foreign(&'a (dyn StdError + 'static)),
}

impl<'a> Link<'a> {
    pub fn new(error: &'a (dyn StdError + 'static)) -> Self {
        match error.downcast_ref::<Error>() {
            Some(e) if e.kind() == Kind::Root => Self::Root(e),
            Some(e) => Self::Wrapping(e),
            None => Self::Foreign(error),
        }
    }

    #[inline]
    pub fn as_error(&self) -> &'a (dyn StdError + 'static) {
        match *self {
            Self::Root(e) | Self::Wrapping(e) => e,
            Self::Foreign(e) => e,
        }
    }

    /// The library error at this link, if it is one.
    #[inline]
    pub fn library(&self) -> Option<&'a Error> {
        match *self {
            Self::Root(e) | Self::Wrapping(e) => Some(e),
            Self::Foreign(_) => None,
        }
    }

    #[inline]
    pub fn is_foreign(&self) -> bool {
        matches!(self, Self::Foreign(_))
    }
}

/// Iterator over an error and its transitive causes, following
/// [`source`](StdError::source).
#[derive(Clone)]
pub struct Chain<'a> {
    next: Option<&'a (dyn StdError + 'static)>,
}

impl<'a> Chain<'a> {
    #[inline]
    pub fn new(head: &'a (dyn StdError + 'static)) -> Self {
        Self { next: Some(head) }
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = Link<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(Link::new(current))
    }
}

impl FusedIterator for Chain<'_> {}
