use crate::prelude::{eprintln, *};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

pub async fn run_stdio(global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Starting MCP server with stdio transport...");
    }

    serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout(), &global).await
}

/// Answer newline-delimited JSON-RPC messages from `reader` until end of
/// input, one response line per request.
pub async fn serve<R, W>(reader: R, mut writer: W, global: &crate::Global) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        log::debug!("mcp <- {message}");

        // Notifications are consumed without a reply
        let Some(response) = super::handle_request(message, global).await else {
            continue;
        };

        let mut payload = serde_json::to_vec(&response)?;
        payload.push(b'\n');
        log::debug!("mcp -> {} bytes", payload.len());

        writer.write_all(&payload).await?;
        writer.flush().await?;
    }

    Ok(())
}
