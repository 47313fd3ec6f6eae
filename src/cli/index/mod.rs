//! Build-index command - loads the persisted index or builds it from sources

use clap::Args;
use tracing::info;

#[derive(Debug, Args)]
pub struct BuildIndexArgs {
    /// Rebuild from sources even when a persisted index exists
    #[arg(long)]
    pub rebuild: bool,
}

pub async fn run(args: BuildIndexArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let embedder = crate::create_embedding_provider(&config)?;
    let manager = crate::create_index_manager(&config, embedder)?;

    let index = if args.rebuild {
        manager.rebuild().await?
    } else {
        manager.get().await?
    };

    info!(
        chunks = index.len(),
        model = %index.metadata().model,
        path = %config.index.path.display(),
        "Index ready"
    );

    println!(
        "{} chunks indexed with {} at {}",
        index.len(),
        index.metadata().model,
        config.index.path.display()
    );

    Ok(())
}
