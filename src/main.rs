use clap::Parser;
use std::net::SocketAddr;
use tracing::info;
use tyche::adapters::api_handler::AppState;
use tyche::adapters::output;
use tyche::adapters::store::MockStore;
use tyche::cli::{Cli, Command};
use tyche::config::Settings;
use tyche::faker::{generate_instances, FakeProvider};
use tyche::schema::loader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let settings = Settings::new()?;

    match cli.command {
        Command::Generate {
            schema,
            count,
            output_file,
            locale,
            seed,
        } => {
            let count = count.unwrap_or(settings.generate.count);
            let locale = locale.or_else(|| settings.generate.locale.clone());

            let handle = loader::resolve(&schema)?;
            info!(
                "generating {} instance(s) for schema '{}'",
                count,
                handle.name()
            );

            let mut provider = FakeProvider::new(locale.as_deref(), seed)?;
            let instances = generate_instances(&handle, count as usize, &mut provider)?;
            output::write_instances(&instances, output_file.as_deref())?;
        }

        Command::Serve {
            schema,
            count,
            locale,
            seed,
            host,
            port,
        } => {
            let count = count.unwrap_or(settings.server.count);
            let locale = locale.or_else(|| settings.generate.locale.clone());
            let host = host.unwrap_or(settings.server.host);
            let port = port.unwrap_or(settings.server.port);

            let handle = loader::resolve(&schema)?;
            let mut provider = FakeProvider::new(locale.as_deref(), seed)?;
            let instances = generate_instances(&handle, count as usize, &mut provider)?;

            let store = MockStore::new();
            let state = AppState::new(handle.clone(), store.clone());
            store.populate(&state.resource, instances).await;

            let app = tyche::create_app(state.clone());

            let addr: SocketAddr = format!("{host}:{port}").parse()?;
            info!(
                "serving {} instance(s) of '{}' at http://{}/{}",
                count,
                handle.name(),
                addr,
                state.resource
            );
            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
