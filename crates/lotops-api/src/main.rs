mod api_doc;
mod constants;
mod error;
mod handlers;
mod services;
mod setup;
mod state;
mod telemetry;

use lotops_core::Config;

// mimalloc keeps allocation overhead low while feed files are parsed
// concurrently, notably on musl builds in containers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;
    let (_state, router) = setup::initialize_app(config.clone()).await?;
    setup::server::start_server(&config, router).await?;
    Ok(())
}
