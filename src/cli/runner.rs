//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, RequestArgs};
use crate::config::ClientConfig;
use crate::error::{Result, ResultExt};
use crate::http::ApiClient;
use crate::params::Params;
use crate::types::Method;
use futures::TryStreamExt;
use std::io::Write;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing JSON lines to stdout
    pub async fn run(&self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.run_with_output(&mut out).await
    }

    /// Run the CLI command, writing JSON lines to `out`
    pub async fn run_with_output<W: Write>(&self, out: &mut W) -> Result<()> {
        let client = ApiClient::with_config(self.client_config()?)?;

        let result = match &self.cli.command {
            Commands::Get { request } => self.get(&client, request, out).await,
            Commands::Pages { request, max_pages } => {
                self.pages(&client, request, *max_pages, out).await
            }
            Commands::Items { request, max_items } => {
                self.items(&client, request, *max_items, out).await
            }
        };

        match client.rate_limit_remaining() {
            Some(remaining) => info!("Rate limit remaining: {remaining}"),
            None => info!("Rate limit remaining: unknown"),
        }
        result
    }

    /// Config file, then command-line overrides
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => ClientConfig::default(),
        };

        if let Some(base_url) = &self.cli.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(key) = &self.cli.api_key {
            config.default_params.insert("api_key", key.clone());
        }
        for pair in &self.cli.default_params {
            let (key, value) = Params::parse_pair(pair)?;
            config.default_params.insert(key, value);
        }

        config.validate()?;
        Ok(config)
    }

    async fn get<W: Write>(&self, client: &ApiClient, request: &RequestArgs, out: &mut W) -> Result<()> {
        let (method, params) = request_parts(request)?;
        let body = client.json(&request.resource, method, &params).await?;
        writeln!(out, "{}", serde_json::to_string(&body)?)?;
        Ok(())
    }

    async fn pages<W: Write>(
        &self,
        client: &ApiClient,
        request: &RequestArgs,
        max_pages: Option<usize>,
        out: &mut W,
    ) -> Result<()> {
        let (method, params) = request_parts(request)?;
        let mut pages = client.pages(request.resource.clone(), method, params);
        let mut count = 0usize;

        while max_pages.map_or(true, |max| count < max) {
            let Some(page) = pages.next_page().await? else {
                break;
            };
            writeln!(out, "{}", serde_json::to_string(&page)?)?;
            count += 1;
        }

        info!("Fetched {count} page(s) of {}", request.resource);
        Ok(())
    }

    async fn items<W: Write>(
        &self,
        client: &ApiClient,
        request: &RequestArgs,
        max_items: Option<usize>,
        out: &mut W,
    ) -> Result<()> {
        let (method, params) = request_parts(request)?;
        let mut items = client.items(request.resource.clone(), method, params);
        let mut count = 0usize;

        while max_items.map_or(true, |max| count < max) {
            let Some(item) = items.try_next().await? else {
                break;
            };
            writeln!(out, "{}", serde_json::to_string(&item)?)?;
            count += 1;
        }

        info!("Fetched {count} item(s) of {}", request.resource);
        Ok(())
    }
}

fn request_parts(request: &RequestArgs) -> Result<(Method, Params)> {
    let method: Method = request.method.parse()?;
    let mut params = Params::new();
    for pair in &request.params {
        let (key, value) = Params::parse_pair(pair)?;
        params.insert(key, value);
    }
    Ok((method, params))
}
