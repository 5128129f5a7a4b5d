//! Name-value-pair payload handling.
//!
//! Both gateway families speak the same wire format in both directions: an
//! `application/x-www-form-urlencoded` body of upper-case protocol keys, where
//! list-style fields may repeat a key.
//!
//! - [`FieldMultimap`]: ordered key to one-or-more values collection
//! - [`FieldMultimap::encode`]: request body encoder
//! - [`FieldMultimap::parse`]: strict response body decoder
//!
//! # Examples
//!
//! ```
//! use nvp_gateway::nvp::FieldMultimap;
//!
//! let mut fields = FieldMultimap::new();
//! fields.set("METHOD", "SetExpressCheckout");
//! fields.add("L_PAYMENTREQUEST_0_NAME0", "Ebook");
//! fields.add("L_PAYMENTREQUEST_0_NAME1", "Audio book");
//!
//! let body = fields.encode();
//! assert_eq!(
//!     body,
//!     "METHOD=SetExpressCheckout&L_PAYMENTREQUEST_0_NAME0=Ebook&L_PAYMENTREQUEST_0_NAME1=Audio+book"
//! );
//! assert_eq!(FieldMultimap::parse(body.as_bytes()).unwrap(), fields);
//! ```

mod codec;
mod multimap;

pub use multimap::FieldMultimap;

#[cfg(test)]
mod tests;
