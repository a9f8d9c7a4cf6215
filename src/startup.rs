use crate::configuration::Settings;
use crate::field::{GeocoderField, ValueChange};
use crate::geocoding::{ArcGisProvider, GeocodeResolver};
use anyhow::Context;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::{JoinError, JoinSet};

pub type ArcGisField = GeocoderField<ArcGisProvider, UnboundedSender<ValueChange>>;

/// Line-oriented host: one address per input line, one JSON value change per output line.
pub struct Application {
    field: ArcGisField,
    notifications: UnboundedReceiver<ValueChange>,
}

impl Application {
    pub fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let provider = ArcGisProvider::new(&configuration.geocoder)
            .context("Failed to build the ArcGIS provider.")?;
        let (sender, notifications) = mpsc::unbounded_channel();
        let field = GeocoderField::new(GeocodeResolver::new(provider), sender)
            .with_read_only(configuration.field.read_only);

        tracing::info!(
            control = crate::plugin::ELEMENT_NAME,
            endpoint = %configuration.geocoder.endpoint,
            "Geocoder field ready"
        );

        Ok(Self {
            field,
            notifications,
        })
    }

    pub fn field(&self) -> &ArcGisField {
        &self.field
    }

    pub async fn run_until_stopped(self) -> Result<(), anyhow::Error> {
        self.run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Feeds every line of `input` to the field until EOF, waits for the
    /// resolutions still in flight, then returns.
    ///
    /// Values already published are written out even when reading fails.
    pub async fn run<R, W>(self, input: R, output: W) -> Result<(), anyhow::Error>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let Application {
            field,
            notifications,
        } = self;
        let printer = tokio::spawn(print_value_changes(notifications, output));

        let fed = feed_addresses(&field, input).await;
        // Closes the channel so the printer drains and stops
        drop(field);

        let printed = printer.await.context("Value change printer panicked.")?;
        fed.and(printed)
    }
}

async fn feed_addresses<R>(field: &ArcGisField, input: R) -> Result<(), anyhow::Error>
where
    R: AsyncBufRead + Unpin,
{
    let mut in_flight = JoinSet::new();
    let mut lines = input.lines();
    let read = loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if let Some(handle) = field.set_address(&line) {
                    in_flight.spawn(handle);
                }
                while let Some(finished) = in_flight.try_join_next() {
                    reaped(finished)?;
                }
            }
            Ok(None) => break Ok(()),
            Err(e) => {
                break Err(anyhow::Error::from(e).context("Failed to read address from input."));
            }
        }
    };

    while let Some(finished) = in_flight.join_next().await {
        reaped(finished)?;
    }
    read
}

// The outer result is the forwarding task, the inner one the resolution itself
fn reaped(finished: Result<Result<(), JoinError>, JoinError>) -> Result<(), anyhow::Error> {
    finished
        .context("Failed to join geocoder resolution.")?
        .context("Geocoder resolution task panicked.")
}

async fn print_value_changes<W>(
    mut notifications: UnboundedReceiver<ValueChange>,
    mut output: W,
) -> Result<(), anyhow::Error>
where
    W: AsyncWrite + Unpin,
{
    while let Some(change) = notifications.recv().await {
        let mut line = serde_json::to_vec(&change).context("Failed to serialize value change.")?;
        line.push(b'\n');
        output
            .write_all(&line)
            .await
            .context("Failed to write value change.")?;
        output.flush().await.context("Failed to flush output.")?;
    }
    Ok(())
}
