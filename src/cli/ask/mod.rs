//! Ask command - answers one query and prints the response as JSON

use clap::Args;

use crate::infrastructure::services::QueryServiceTrait;

#[derive(Debug, Args)]
pub struct AskArgs {
    /// Query text; multiple words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

impl AskArgs {
    pub fn query(&self) -> String {
        self.text.join(" ")
    }
}

/// Exits with an error after printing when the response category is `ERROR`
pub async fn run(args: AskArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let components = crate::create_components(&config)?;
    let response = components.query_service.handle(&args.query()).await;

    println!("{}", serde_json::to_string_pretty(&response)?);

    if response.is_error() {
        anyhow::bail!("query failed: {}", response.reply);
    }

    Ok(())
}
