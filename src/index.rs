mod private {
    pub trait Sealed {}
    impl Sealed for usize {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl<T> Sealed for &T where T: ?Sized + Sealed {}
}

/// A lookup into a container: integers index arrays, `str`/`String` keys
/// index maps.
///
/// Signed indices are accepted so that plain integer literals work. An integer
/// that does not fit `usize` (any negative index, for instance) is looked up as
/// `usize::MAX`: it never matches an element, and a strict lookup reports it as
/// [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange) with
/// `index: usize::MAX`.
///
/// This trait is sealed and cannot be implemented outside this crate.
pub trait Index: private::Sealed {
    #[doc(hidden)]
    fn index_dispatch<R>(&self, n: impl FnOnce(usize) -> R, s: impl FnOnce(&str) -> R) -> R;
}

impl Index for usize {
    #[inline]
    fn index_dispatch<R>(&self, n: impl FnOnce(usize) -> R, _: impl FnOnce(&str) -> R) -> R {
        n(*self)
    }
}

macro_rules! impl_index_for_int {
    ($($t:ty),*) => {
        $(
            impl Index for $t {
                #[inline]
                fn index_dispatch<R>(
                    &self,
                    n: impl FnOnce(usize) -> R,
                    _: impl FnOnce(&str) -> R,
                ) -> R {
                    n(usize::try_from(*self).unwrap_or(usize::MAX))
                }
            }
        )*
    };
}

impl_index_for_int!(u32, u64, i32, i64);

impl Index for str {
    #[inline]
    fn index_dispatch<R>(&self, _: impl FnOnce(usize) -> R, s: impl FnOnce(&str) -> R) -> R {
        s(self)
    }
}

impl Index for String {
    #[inline]
    fn index_dispatch<R>(&self, _: impl FnOnce(usize) -> R, s: impl FnOnce(&str) -> R) -> R {
        s(self.as_str())
    }
}

impl<T: ?Sized + Index> Index for &T {
    #[inline]
    fn index_dispatch<R>(&self, n: impl FnOnce(usize) -> R, s: impl FnOnce(&str) -> R) -> R {
        (**self).index_dispatch(n, s)
    }
}
