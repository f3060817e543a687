//! Logging macros.
//!
//! Embedded builds without `std` log through `defmt`; every other build goes
//! through the `log` facade. Arguments must therefore implement both
//! `defmt::Format` and `core::fmt::Display`.

#![allow(unused_macros)]

macro_rules! trace {
    ($($arg:tt)+) => {{
        #[cfg(all(feature = "embedded", not(feature = "std")))]
        ::defmt::trace!($($arg)+);
        #[cfg(not(all(feature = "embedded", not(feature = "std"))))]
        ::log::trace!($($arg)+);
    }};
}

macro_rules! debug {
    ($($arg:tt)+) => {{
        #[cfg(all(feature = "embedded", not(feature = "std")))]
        ::defmt::debug!($($arg)+);
        #[cfg(not(all(feature = "embedded", not(feature = "std"))))]
        ::log::debug!($($arg)+);
    }};
}

macro_rules! info {
    ($($arg:tt)+) => {{
        #[cfg(all(feature = "embedded", not(feature = "std")))]
        ::defmt::info!($($arg)+);
        #[cfg(not(all(feature = "embedded", not(feature = "std"))))]
        ::log::info!($($arg)+);
    }};
}

macro_rules! warn {
    ($($arg:tt)+) => {{
        #[cfg(all(feature = "embedded", not(feature = "std")))]
        ::defmt::warn!($($arg)+);
        #[cfg(not(all(feature = "embedded", not(feature = "std"))))]
        ::log::warn!($($arg)+);
    }};
}

macro_rules! error {
    ($($arg:tt)+) => {{
        #[cfg(all(feature = "embedded", not(feature = "std")))]
        ::defmt::error!($($arg)+);
        #[cfg(not(all(feature = "embedded", not(feature = "std"))))]
        ::log::error!($($arg)+);
    }};
}
