//! Dry-run relay: reads a message from stdin and pushes it through the
//! configured channel pool.
//!
//! ```text
//! quill recipient@example.com [recipient@example.org ...] < message.eml
//! ```

use quill::{common::Message, config::Quill};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    quill::common::logging::init();

    let config_path = find_config_file()?;
    let config_content = std::fs::read_to_string(&config_path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read config from {}: {}",
            config_path.display(),
            e
        )
    })?;
    let config: Quill = ron::from_str(&config_content)?;

    let recipients = std::env::args().skip(1).collect::<Vec<_>>();
    if recipients.is_empty() {
        anyhow::bail!("Usage: quill <recipient>... < message");
    }

    let mut envelope = Message::new(ulid::Ulid::new().to_string(), Vec::<u8>::new())
        .with_recipients(recipients);
    envelope.sender.clone_from(&config.sender);

    let mut pool = config.build_pool();
    let cache = config.cache.clone().into_cache();

    let delivered = quill::relay(
        &mut pool,
        cache,
        tokio::io::stdin(),
        envelope,
        config.chunk_size,
    )
    .await;

    if let Err(err) = pool.stop().await {
        quill::common::tracing::warn!(error = %err, "Failed to stop channel pool");
    }

    println!("{} recipient(s) accepted", delivered?);
    Ok(())
}

/// `QUILL_CONFIG` if set, otherwise `./quill.config.ron`
fn find_config_file() -> anyhow::Result<std::path::PathBuf> {
    let path = std::env::var("QUILL_CONFIG").map_or_else(
        |_| std::path::PathBuf::from("./quill.config.ron"),
        std::path::PathBuf::from,
    );

    if !path.exists() {
        anyhow::bail!("No configuration file found at {}", path.display());
    }

    Ok(path)
}
