use geocoder_field::configuration::get_configuration;
use geocoder_field::startup::Application;
use geocoder_field::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr, stdout carries the published values
    let subscriber = get_subscriber("geocoder-field".into(), "info".into(), std::io::stderr);
    init_subscriber(subscriber);

    let configuration = get_configuration()?;
    let application = Application::build(configuration)?;
    application.run_until_stopped().await?;

    Ok(())
}
