//! Runtime constraint validation for decoded [`prost`] messages, plus a
//! decode-then-validate packet filter for raw protobuf payloads.
//!
//! Rules are declared per field family ([`rules::NumericRule`],
//! [`rules::StringRule`], [`rules::BytesRule`], [`rules::EnumRule`],
//! [`rules::RepeatedRule`]) and evaluated by a small engine with bounded
//! memory: a fixed-capacity [`ViolationSink`] collects structured
//! [`Violation`] records, and a [`ValidationContext`] tracks the dotted
//! `peers[2].host` field path as generated validators recurse.
//!
//! # Quick start
//!
//! A message type gets a [`ValidatedMessage`] impl (normally emitted by the
//! code generator) and validates against a sink:
//!
//! ```rust,no_run
//! use prost_packetfilter::{ValidatedMessage, ViolationSink};
//! # fn example(msg: &impl ValidatedMessage) {
//! let mut sink = ViolationSink::new();
//! if !msg.validate(&mut sink) {
//!     for violation in sink.violations() {
//!         eprintln!("{violation}");
//!     }
//! }
//! # }
//! ```
//!
//! # Packet filtering
//!
//! The [`filter`] module turns a validated message type into a boundary
//! filter for raw bytes: register a [`FilterSpec`] once, then call
//! [`filter_tcp`]/[`filter_udp`] per packet and branch on the returned
//! [`FilterStatus`]:
//!
//! ```rust,no_run
//! use prost_packetfilter::{Direction, FilterSpec, filter_tcp, register_filter};
//! # #[derive(Clone, PartialEq, prost::Message)]
//! # struct Handshake {}
//! # impl prost_packetfilter::ValidatedMessage for Handshake {
//! #     fn validate_with(&self, _: &mut prost_packetfilter::ValidationContext<'_>) -> bool { true }
//! # }
//! register_filter(FilterSpec::<Handshake>::for_message());
//! # let payload: &[u8] = &[];
//! if !filter_tcp(payload, Direction::ToServer).is_accept() {
//!     // drop the packet
//! }
//! ```
//!
//! # Error types
//!
//! | Type | When |
//! |------|------|
//! | [`ValidationError`] | One or more constraint violations detected |
//! | [`Error`] | Any decode-then-validate pipeline failure, including registration gaps |
//!
//! [`Error::status`] maps each case onto the integer-compatible
//! [`FilterStatus`] codes the dispatcher returns.

#![warn(missing_docs)]

mod context;
mod error;
pub mod filter;
pub mod formats;
pub mod rules;
mod validate;
mod violation;

pub use context::{MAX_NESTING_DEPTH, MAX_PATH_LEN, ValidationContext};
pub use error::{Error, ValidationError};
pub use filter::{
    Direction, FilterRegistry, FilterSpec, FilterStatus, clear_filter, filter_tcp, filter_udp,
    global_registry, register_filter,
};
pub use validate::{ValidatedMessage, validate_message};
pub use violation::{DEFAULT_SINK_CAPACITY, Violation, ViolationSink};
