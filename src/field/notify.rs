use tokio::sync::mpsc::UnboundedSender;

/// Generic "value changed" notification sent to the hosting form engine.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ValueChange {
    #[serde(rename = "type")]
    pub event_name: &'static str,
    pub bubbles: bool,
    pub cancelable: bool,
    pub composed: bool,
    pub detail: String,
}

impl ValueChange {
    pub const EVENT_NAME: &'static str = "ntx-value-change";

    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            event_name: Self::EVENT_NAME,
            bubbles: true,
            cancelable: false,
            composed: true,
            detail: detail.into(),
        }
    }
}

/// Receives every value the field publishes.
pub trait ValueChangeNotifier: Send + Sync + 'static {
    fn notify(&self, change: ValueChange);
}

impl ValueChangeNotifier for UnboundedSender<ValueChange> {
    fn notify(&self, change: ValueChange) {
        if let Err(e) = self.send(change) {
            tracing::warn!(detail = %e.0.detail, "Value change receiver is gone, dropping value");
        }
    }
}

/// Adapts a closure into a [`ValueChangeNotifier`].
pub struct FnNotifier<F>(pub F);

impl<F> ValueChangeNotifier for FnNotifier<F>
where
    F: Fn(ValueChange) + Send + Sync + 'static,
{
    fn notify(&self, change: ValueChange) {
        (self.0)(change)
    }
}
