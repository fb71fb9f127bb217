use anyhow::Result;
use sqlmask_server::{MaskServer, ServerOptions};
use std::sync::Arc;

use super::Context;

pub async fn handle(
    ctx: &Context,
    host: Option<String>,
    port: Option<u16>,
    read_only: bool,
) -> Result<()> {
    let options = server_options(ctx, host, port, read_only);
    let storage = ctx.storage().await?;

    println!(
        "Serving sqlmask API on http://{}:{}{}",
        options.host,
        options.port,
        if options.read_only { " (read-only)" } else { "" }
    );

    MaskServer::serve(Arc::new(storage), ctx.masker(), options).await
}

/// Command-line flags win over the `[server]` config section
fn server_options(
    ctx: &Context,
    host: Option<String>,
    port: Option<u16>,
    read_only: bool,
) -> ServerOptions {
    let server = &ctx.config.server;
    ServerOptions {
        host: host.unwrap_or_else(|| server.host.clone()),
        port: port.unwrap_or(server.port),
        read_only: read_only || server.read_only,
        preview_chars: ctx.config.history.preview_chars,
    }
}
