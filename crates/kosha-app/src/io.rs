use kanal::AsyncSender;
use kosha_core::types::AppEvent;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

/// Feed stdin lines to the event loop
pub async fn watch_stdin(
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    watch_lines(BufReader::new(tokio::io::stdin()), cancel, event_tx).await
}

pub async fn watch_lines<R>(
    reader: R,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    tracing::info!("Reading words from input");
    let mut lines = reader.lines();

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(text) => {
                    event_tx
                        .send(AppEvent::TextInput { text })
                        .await?;
                }
                None => {
                    event_tx.send(AppEvent::EndOfInput).await?;
                    break;
                }
            },
            _ = cancel.cancelled() => {
                tracing::info!("Input watcher stopping");
                break;
            }
        }
    }

    Ok(())
}
