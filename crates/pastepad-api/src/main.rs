use pastepad_core::ServerConfig;

// Use mimalloc as the global allocator for better performance and lower fragmentation,
// especially when running on musl-based systems inside containers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = ServerConfig::from_env()?;

    // Initialize the application (settings, database, routes)
    let (state, router) = pastepad_api::setup::initialize_app(config).await?;

    // Start the server
    pastepad_api::setup::server::start_server(&state.config, router).await?;

    Ok(())
}
