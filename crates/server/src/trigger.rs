//! The delivery cycle: configuration, generation, fan-out.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use channels::{ChannelManager, GithubChannel, SlackChannel};
use github::{GithubClient, WorkflowRunEvent};
use roast_config::ConfigLoader;
use roaster::{RoastGenerator, RoastOptions};

use crate::config::ServerConfig;

/// Run one delivery cycle for a failed workflow run.
///
/// Configuration and generation failures abort the cycle before any send is
/// attempted and are surfaced to the caller; they are never retried for the
/// same event. Once the fan-out starts, the cycle always completes.
///
/// # Errors
///
/// Returns an error when configuration cannot be resolved or no roasts
/// could be generated.
pub async fn run_delivery_cycle(
    config: &ServerConfig,
    event: &WorkflowRunEvent,
) -> anyhow::Result<()> {
    let repo = &event.repository;
    let run = &event.workflow_run;

    let mut client = GithubClient::new(&config.github_token)?;
    if let Some(url) = &config.github_api_url {
        client = client.with_base_url(url);
    }
    let client = Arc::new(client);

    let loader = ConfigLoader::new(
        Arc::clone(&client),
        repo.owner.login.clone(),
        repo.name.clone(),
    );
    let app_config = loader
        .load_config()
        .await
        .context("failed to load repository configuration")?;

    let mut generator = RoastGenerator::new(app_config.openai.api_key.clone());
    if let Some(url) = &config.openai_api_url {
        generator = generator.with_base_url(url);
    }

    let options = RoastOptions {
        uncensored: app_config.roaster.uncensored,
        maximum_roast_length: app_config.roaster.maximum_roast_length,
        maximum_roasts: app_config.roaster.maximum_roasts,
    };
    let messages = generator
        .generate(run, &repo.full_name, &options)
        .await
        .context("failed to generate roasts")?;

    info!(
        repo = %repo.full_name,
        count = messages.len(),
        "Generated roast(s)"
    );

    let mut manager = ChannelManager::new(app_config);
    manager.register_channel(Arc::new(GithubChannel::new(
        Arc::clone(&client),
        repo.owner.login.clone(),
        repo.name.clone(),
    )));
    let mut slack = SlackChannel::new(repo.name.clone());
    if let Some(url) = &config.slack_api_url {
        slack = slack.with_base_url(url);
    }
    manager.register_channel(Arc::new(slack));

    manager.send_roasts(&messages, run).await;

    Ok(())
}
