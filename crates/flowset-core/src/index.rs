use std::num::NonZero;

#[cold]
#[inline(never)]
#[cfg_attr(debug_assertions, track_caller)]
pub const fn panic_idx_overflow() -> ! {
    panic!("Overflowed 32-bits for a dense index");
}

/// Safety: Implementor guarantees that their implementations of `from_raw` & `to_raw` are
/// injective. Meaning for all `x: Self`, `from_raw(to_raw(x)) == x`.
pub unsafe trait IdxInner: Ord + Eq + Copy + std::fmt::Debug {
    fn from_raw(raw: NonZero<u32>) -> Self;
    fn to_raw(self) -> NonZero<u32>;
}

/// Declares `u32`-backed index newtypes that implement [`Idx`].
///
/// The index is stored off by one in a `NonZero<u32>` so `Option<MyIdx>` stays 4 bytes.
#[macro_export]
macro_rules! newtype_index {
    () => {};
    ($(#[$attr:meta])* struct $name:ident; $($rest:tt)*) => {
        $crate::newtype_index! {
            $(#[$attr])*
            pub(self) struct $name;
            $($rest)*
        }
    };
    ($(#[$attr:meta])* $vis:vis struct $name:ident; $($rest:tt)*) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        $vis struct $name(::core::num::NonZero<u32>);

        unsafe impl $crate::index::IdxInner for $name {
            fn from_raw(raw: ::core::num::NonZero<u32>) -> $name {
                $name(raw)
            }

            fn to_raw(self) -> ::core::num::NonZero<u32> {
                self.0
            }
        }

        $crate::newtype_index!($($rest)*);
    };
}

pub trait Idx: Ord + Copy + std::fmt::Debug {
    fn new(x: u32) -> Self;
    fn get(self) -> u32;

    #[inline]
    fn idx(self) -> usize {
        self.get() as usize
    }

    #[inline]
    fn from_usize(x: usize) -> Self {
        let x = u32::try_from(x).unwrap_or_else(|_| panic_idx_overflow());
        Self::new(x)
    }
}

impl<I: IdxInner> Idx for I {
    fn new(x: u32) -> Self {
        let nz = NonZero::new(x.wrapping_add(1)).unwrap_or_else(|| panic_idx_overflow());
        Self::from_raw(nz)
    }

    fn get(self) -> u32 {
        // Safety: `NonZero<u32>` guarantees `.get()` yields a value that's at least 1.
        unsafe { self.to_raw().get().unchecked_sub(1) }
    }
}
