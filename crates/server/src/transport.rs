//! Newline-delimited JSON over stdio.
//!
//! Each stdin line is one client message. The latest broadcast snapshot and
//! every decode error are written to stdout as one line each, by a single
//! writer task so lines never interleave.
use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

use runtime::{RuntimeHandle, ServerMessage, SnapshotReceiver};

/// Pending error replies allowed before the reader waits on the writer.
const REPLY_BUFFER: usize = 32;

/// Serves the runtime over the process's stdin and stdout until stdin closes.
pub async fn serve_stdio(handle: RuntimeHandle) -> Result<()> {
    let input = BufReader::new(tokio::io::stdin());
    serve(handle, input, tokio::io::stdout()).await
}

pub async fn serve<R, W>(handle: RuntimeHandle, input: R, output: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (subscription, snapshots) = handle
        .subscribe_channel()
        .await
        .context("subscribing transport")?;
    let (reply_tx, reply_rx) = mpsc::channel::<ServerMessage>(REPLY_BUFFER);
    let writer = tokio::spawn(write_loop(snapshots, reply_rx, output));
    tracing::info!(target: "runtime::protocol", %subscription, "stdio transport ready");

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        if let Some(reply) = handle.handle_message(&line).await? {
            // The writer only stops on an output error, reported below.
            let _ = reply_tx.send(reply).await;
        }
    }

    tracing::info!(target: "runtime::protocol", "stdin closed, stopping transport");
    handle.unsubscribe(subscription).await?;
    drop(reply_tx);
    writer.await.context("joining writer task")??;
    Ok(())
}

/// Writes the latest snapshot and every reply until both sources close.
///
/// Snapshots the writer falls behind on are skipped; only the newest one is
/// written.
async fn write_loop<W>(
    mut snapshots: SnapshotReceiver,
    mut replies: mpsc::Receiver<ServerMessage>,
    mut output: W,
) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    loop {
        let message = tokio::select! {
            Some(snapshot) = snapshots.recv() => ServerMessage::state_update(&snapshot),
            Some(reply) = replies.recv() => reply,
            else => break,
        };
        let mut line = message.encode()?;
        line.push('\n');
        output.write_all(line.as_bytes()).await?;
        output.flush().await?;
    }
    Ok(())
}
