use std::sync::Arc;

use anyhow::Context;
use quill_cache::{CacheStream, KeyValueCache};
use quill_common::{Message, internal, tracing};
use quill_transport::ChannelPool;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Cache item holding the message body while it is being assembled
pub const BODY_ITEM: &str = "body";

/// Stream `input` into the cache, then deliver it through `pool`
///
/// The body is accumulated under `(envelope.id, BODY_ITEM)` in chunks of at
/// most `chunk_size` bytes. The cache entry is released before returning,
/// whether or not delivery succeeded. Failing to release it is logged and
/// never changes the result: a delivered message is reported as delivered.
///
/// This is a dry run of the streaming path. The assembled body is read back
/// into memory before it is handed to the pool, so memory use is bounded by
/// the message size rather than by `chunk_size`.
///
/// Returns the number of recipients accepted.
///
/// # Errors
/// If reading `input` fails, the cache rejects the content, or the pool
/// cannot deliver the message
pub async fn relay<R>(
    pool: &mut ChannelPool,
    cache: Arc<dyn KeyValueCache>,
    input: R,
    envelope: Message,
    chunk_size: usize,
) -> anyhow::Result<usize>
where
    R: AsyncRead + Unpin,
{
    let stream = CacheStream::new(Arc::clone(&cache), envelope.id.clone(), BODY_ITEM);

    let outcome = match assemble(&stream, input, chunk_size).await {
        Ok(total) => {
            internal!(
                level = DEBUG,
                message_id = %envelope.id,
                bytes = total,
                "Message content assembled"
            );
            deliver(pool, cache.as_ref(), envelope).await
        }
        Err(err) => Err(err),
    };

    if let Err(err) = stream.flush_buffers().await {
        tracing::warn!(
            key = %stream.key(),
            error = %err,
            "Failed to release cache entry after relaying"
        );
    }

    outcome
}

async fn assemble<R>(stream: &CacheStream, mut input: R, chunk_size: usize) -> anyhow::Result<usize>
where
    R: AsyncRead + Unpin,
{
    let mut chunk = vec![0; chunk_size.max(1)];
    let mut total = 0;

    loop {
        let read = input
            .read(&mut chunk)
            .await
            .context("Failed to read message content")?;
        if read == 0 {
            return Ok(total);
        }

        stream.write(&chunk[..read]).await?;
        total += read;
    }
}

async fn deliver(
    pool: &mut ChannelPool,
    cache: &dyn KeyValueCache,
    envelope: Message,
) -> anyhow::Result<usize> {
    let body = cache
        .get_value(&envelope.id, BODY_ITEM)
        .await?
        .unwrap_or_default();
    let message = Message {
        data: body.into(),
        ..envelope
    };

    Ok(pool.send(&message).await?)
}
