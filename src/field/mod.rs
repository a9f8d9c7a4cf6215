//! The geocoder form field.
//!
//! The host pushes address edits with [`GeocoderField::set_address`]; each
//! non-empty edit starts one resolution and every resolution that is still
//! current when it completes publishes exactly one [`ValueChange`].
mod notify;

pub use notify::{FnNotifier, ValueChange, ValueChangeNotifier};

use crate::domain::{CoordinateResult, NormalizedAddress};
use crate::geocoding::{GeocodeResolver, GeocodingProvider};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Where the field is in its resolution lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionState {
    #[default]
    Idle,
    Resolving,
    Resolved,
    NotFound,
    Failed,
}

impl From<&CoordinateResult> for ResolutionState {
    fn from(result: &CoordinateResult) -> Self {
        match result {
            CoordinateResult::Coordinates(_) => Self::Resolved,
            CoordinateResult::NotAvailable => Self::NotFound,
            CoordinateResult::GeocodingError => Self::Failed,
        }
    }
}

pub struct GeocoderField<P, N> {
    inner: Arc<Inner<P, N>>,
    read_only: bool,
}

struct Inner<P, N> {
    resolver: GeocodeResolver<P>,
    notifier: N,
    slot: Mutex<Slot>,
}

#[derive(Default)]
struct Slot {
    latest_token: u64,
    address: Option<NormalizedAddress>,
    state: ResolutionState,
    value: Option<CoordinateResult>,
}

impl<P, N> GeocoderField<P, N>
where
    P: GeocodingProvider,
    N: ValueChangeNotifier,
{
    /// `notifier` is invoked while the field's state is locked and must not
    /// call back into the field.
    pub fn new(resolver: GeocodeResolver<P>, notifier: N) -> Self {
        Self {
            inner: Arc::new(Inner {
                resolver,
                notifier,
                slot: Mutex::new(Slot::default()),
            }),
            read_only: false,
        }
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Handle an address edit from the host.
    ///
    /// Blank input is ignored and returns `None`. Otherwise a resolution is
    /// spawned and its handle returned. Earlier in-flight resolutions keep
    /// running, but their results are dropped once they complete.
    ///
    /// # Panics
    ///
    /// Must be called from within a tokio runtime.
    pub fn set_address(&self, raw: &str) -> Option<JoinHandle<()>> {
        let Ok(address) = NormalizedAddress::parse(raw) else {
            tracing::debug!("Blank address, skipping resolution");
            return None;
        };

        let token = {
            let mut slot = self.inner.slot.lock();
            slot.latest_token += 1;
            slot.address = Some(address.clone());
            slot.state = ResolutionState::Resolving;
            slot.latest_token
        };

        let span = tracing::info_span!(
            "Geocoder field resolution",
            request_token = token,
            address = %address
        );
        let inner = Arc::clone(&self.inner);

        Some(tokio::spawn(
            async move {
                let result = inner.resolver.resolve(&address).await;
                inner.complete(token, result);
            }
            .instrument(span),
        ))
    }

    /// Publish a value typed directly into the field.
    ///
    /// Returns `false`, publishing nothing, when the field is read-only.
    pub fn commit_edit(&self, value: impl Into<String>) -> bool {
        if self.read_only {
            tracing::debug!("Field is read-only, ignoring manual edit");
            return false;
        }
        self.inner.notifier.notify(ValueChange::new(value));
        true
    }

    pub fn value(&self) -> Option<CoordinateResult> {
        self.inner.slot.lock().value.clone()
    }

    pub fn state(&self) -> ResolutionState {
        self.inner.slot.lock().state
    }

    /// The most recently requested address.
    pub fn address(&self) -> Option<NormalizedAddress> {
        self.inner.slot.lock().address.clone()
    }
}

impl<P, N> Inner<P, N>
where
    N: ValueChangeNotifier,
{
    fn complete(&self, token: u64, result: CoordinateResult) {
        let mut slot = self.slot.lock();
        if token != slot.latest_token {
            tracing::debug!(
                latest_token = slot.latest_token,
                discarded = %result,
                "Discarding stale resolution"
            );
            return;
        }

        slot.state = ResolutionState::from(&result);
        slot.value = Some(result.clone());
        // Published under the lock so an older completion can never overtake a newer one
        self.notifier.notify(ValueChange::new(result.as_value()));
    }
}
