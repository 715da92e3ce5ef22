//! Decode-then-validate packet filtering at a trust boundary.
//!
//! A [`FilterSpec`] ties one prost message type to its validator (and an
//! optional pre-decode hook). A [`FilterRegistry`] holds the single active
//! spec; `filter_tcp`/`filter_udp` decode raw bytes against it and reduce the
//! outcome to one integer-compatible [`FilterStatus`]. A process-wide
//! registry backs the free-function entry points for callers that want the
//! classic register-once-then-filter flow.

use std::sync::{Arc, PoisonError, RwLock};

use prost::Message;
use tracing::debug;

use crate::error::Error;
use crate::validate::ValidatedMessage;
use crate::violation::ViolationSink;

/// Traffic direction of the packet being filtered, forwarded to the spec's
/// prepare-decode hook for direction-specific setup.
///
/// The dispatcher itself keeps a single active spec and never selects a
/// schema by direction; registering distinct per-direction specs is the
/// application's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Client-to-server traffic.
    ToServer,
    /// Server-to-client traffic.
    ToClient,
}

impl Direction {
    /// Whether this is client-to-server traffic.
    #[must_use]
    pub fn is_to_server(self) -> bool {
        matches!(self, Self::ToServer)
    }
}

/// Outcome of one filter call, with stable integer codes for embedding in
/// C-style status plumbing.
///
/// Decode failure and constraint violation deliberately share
/// [`Rejected`](Self::Rejected): at the trust boundary both mean "do not let
/// this packet through," and the cheap status code does not distinguish them.
/// Use [`FilterRegistry::check`] when the caller needs to know which it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum FilterStatus {
    /// The packet decoded and passed every configured rule.
    Accept = 0,
    /// The input buffer was empty.
    InvalidInput = -1,
    /// No filter spec is registered.
    NotRegistered = -2,
    /// The packet failed to decode, or decoded but violated a rule.
    Rejected = -3,
    /// The registered spec carries no validator.
    NoValidator = -4,
}

impl FilterStatus {
    /// The stable integer code for this status.
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Whether the packet should be let through.
    #[must_use]
    pub fn is_accept(self) -> bool {
        self == Self::Accept
    }
}

type ValidateFn<M> = Arc<dyn Fn(&M, &mut ViolationSink) -> bool + Send + Sync>;
type PrepareDecodeFn<M> = Arc<dyn Fn(&mut M, Direction) + Send + Sync>;

/// One message schema bound to its validator and optional pre-decode hook.
///
/// The message type parameter subsumes the schema handle and scratch-struct
/// size of C-style filter registrations: `M::default()` is the
/// zero-initialised struct the payload is decoded into.
pub struct FilterSpec<M> {
    validate: Option<ValidateFn<M>>,
    prepare_decode: Option<PrepareDecodeFn<M>>,
}

impl<M> FilterSpec<M> {
    /// A spec with no validator; filtering against it yields
    /// [`FilterStatus::NoValidator`] until one is attached.
    #[must_use]
    pub fn new() -> Self {
        Self {
            validate: None,
            prepare_decode: None,
        }
    }

    /// Attach a validator function.
    #[must_use]
    pub fn with_validator(
        mut self,
        validate: impl Fn(&M, &mut ViolationSink) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.validate = Some(Arc::new(validate));
        self
    }

    /// Attach a hook that runs on the zero-initialised scratch message
    /// before decoding, e.g. to seed direction-specific defaults.
    #[must_use]
    pub fn with_prepare_decode(
        mut self,
        prepare: impl Fn(&mut M, Direction) + Send + Sync + 'static,
    ) -> Self {
        self.prepare_decode = Some(Arc::new(prepare));
        self
    }
}

impl<M: ValidatedMessage> FilterSpec<M> {
    /// A spec whose validator is the message type's own
    /// [`ValidatedMessage::validate`].
    #[must_use]
    pub fn for_message() -> Self {
        Self::new().with_validator(|msg: &M, sink: &mut ViolationSink| msg.validate(sink))
    }
}

impl<M> Default for FilterSpec<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Clone for FilterSpec<M> {
    fn clone(&self) -> Self {
        Self {
            validate: self.validate.clone(),
            prepare_decode: self.prepare_decode.clone(),
        }
    }
}

/// Decode-and-validate pipeline for one registered message type, with the
/// type erased so the registry can hold any spec.
trait ErasedFilter: Send + Sync {
    fn check(&self, bytes: &[u8], direction: Direction) -> Result<(), Error>;
}

struct TypedFilter<M> {
    spec: FilterSpec<M>,
}

impl<M: Message + Default> ErasedFilter for TypedFilter<M> {
    fn check(&self, bytes: &[u8], direction: Direction) -> Result<(), Error> {
        let Some(validate) = &self.spec.validate else {
            return Err(Error::NoValidator);
        };

        let mut msg = M::default();
        if let Some(prepare) = &self.spec.prepare_decode {
            prepare(&mut msg, direction);
        }
        msg.merge(bytes)?;

        let mut sink = ViolationSink::new();
        if validate(&msg, &mut sink) {
            Ok(())
        } else {
            // A validator can fail without recording (absent message, path
            // overflow); surface that as a violation-free validation error.
            match sink.into_result() {
                Err(err) => Err(err.into()),
                Ok(()) => Err(Error::Validation(crate::error::ValidationError {
                    violations: Vec::new(),
                    truncated: false,
                })),
            }
        }
    }
}

/// Holder of the single active [`FilterSpec`].
///
/// Registration replaces the active spec unconditionally: last registration
/// wins, with no versioning. The slot is behind an `RwLock`, so a
/// registration racing an in-flight filter call swaps atomically instead of
/// tearing. Filtering itself is reentrant; any number of threads may filter
/// concurrently against the same registered spec.
pub struct FilterRegistry {
    active: RwLock<Option<Arc<dyn ErasedFilter>>>,
}

impl FilterRegistry {
    /// An empty registry. Usable in `static` position.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            active: RwLock::new(None),
        }
    }

    /// Install `spec` as the active filter, replacing any previous one.
    pub fn register<M: Message + Default + 'static>(&self, spec: FilterSpec<M>) {
        debug!(
            message_type = std::any::type_name::<M>(),
            "packet filter registered"
        );
        *self
            .active
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(TypedFilter { spec }));
    }

    /// Remove the active filter, if any.
    pub fn clear(&self) {
        *self
            .active
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Whether a spec is currently registered.
    #[must_use]
    pub fn is_registered(&self) -> bool {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Run the full decode-then-validate pipeline, preserving the error
    /// taxonomy that [`FilterStatus`] collapses.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyInput`] for an empty buffer, [`Error::NotRegistered`] /
    /// [`Error::NoValidator`] for registration gaps, [`Error::Decode`] for
    /// malformed bytes, and [`Error::Validation`] for well-formed but
    /// rule-violating packets.
    pub fn check(&self, bytes: &[u8], direction: Direction) -> Result<(), Error> {
        if bytes.is_empty() {
            return Err(Error::EmptyInput);
        }
        let filter = self
            .active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(Error::NotRegistered)?;
        filter.check(bytes, direction)
    }

    /// Filter one TCP payload. `direction` reaches the spec's prepare-decode
    /// hook only; see [`Direction`].
    pub fn filter_tcp(&self, bytes: &[u8], direction: Direction) -> FilterStatus {
        self.status(bytes, direction)
    }

    /// Filter one UDP datagram. The prepare-decode hook, if any, observes
    /// [`Direction::ToServer`].
    pub fn filter_udp(&self, bytes: &[u8]) -> FilterStatus {
        self.status(bytes, Direction::ToServer)
    }

    fn status(&self, bytes: &[u8], direction: Direction) -> FilterStatus {
        match self.check(bytes, direction) {
            Ok(()) => FilterStatus::Accept,
            Err(err) => {
                debug!(error = %err, "packet rejected");
                err.status()
            }
        }
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_REGISTRY: FilterRegistry = FilterRegistry::new();

/// The process-wide registry behind [`register_filter`], [`filter_tcp`] and
/// [`filter_udp`].
#[must_use]
pub fn global_registry() -> &'static FilterRegistry {
    &GLOBAL_REGISTRY
}

/// Install `spec` on the process-wide registry. Last registration wins.
pub fn register_filter<M: Message + Default + 'static>(spec: FilterSpec<M>) {
    GLOBAL_REGISTRY.register(spec);
}

/// Remove the process-wide registry's active filter.
pub fn clear_filter() {
    GLOBAL_REGISTRY.clear();
}

/// Filter one TCP payload against the process-wide registry.
pub fn filter_tcp(bytes: &[u8], direction: Direction) -> FilterStatus {
    GLOBAL_REGISTRY.filter_tcp(bytes, direction)
}

/// Filter one UDP datagram against the process-wide registry.
pub fn filter_udp(bytes: &[u8]) -> FilterStatus {
    GLOBAL_REGISTRY.filter_udp(bytes)
}
