//! Sealed trait marker for Transport implementations.
//!
//! Credentials travel through every transport, so implementations are kept
//! inside this crate.

pub(crate) mod private {
    /// Sealed trait marker.
    pub trait Sealed {}
}
