use jsserve::{logger, Config, Server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;
    logger::init(&cfg.logging)?;

    // One thread: connections are served strictly one after another
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let server = Server::start(&cfg)?;
    logger::log_server_start(&server.local_addr()?);

    server.serve_forever().await?;
    Ok(())
}
