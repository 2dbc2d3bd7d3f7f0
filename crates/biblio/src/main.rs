/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

mod cli;
mod overrides;
mod settings;

use anyhow::{Context, Result};
use biblio_core::{BiblioEntry, ReferenceKey};
use biblio_processor::{
    render_document, scan_document, Diagnostic, FormattedReferences, Formatter,
};
use biblio_resolver::{
    CacheGateway, MemoryCache, ReferenceRequest, ReferenceStore, ResolutionReport,
    ResolveOptions, Resolver,
};
use clap::Parser;
use cli::{CacheAction, Cli, Command};
use indexmap::IndexMap;
use overrides::load_overrides;
use serde::Serialize;
use settings::Settings;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = std::env::current_dir().context("failed to read the working directory")?;
    let settings = Settings::load(cli.config.as_deref(), &cwd)?;

    match cli.command {
        Command::Render {
            file,
            local,
            json,
            force_update,
            no_cache,
        } => {
            render(
                &settings,
                &file,
                local.as_deref(),
                json,
                ResolveOptions { force_update },
                no_cache,
            )
            .await?
        }
        Command::Lookup { keys, force_update } => lookup(&settings, keys, force_update).await?,
        Command::Cache { action } => match action {
            CacheAction::Clear => {
                let gateway = CacheGateway::open(&settings.cache).await;
                if !gateway.is_available() {
                    eprintln!("warning: no persistent cache is configured");
                } else if gateway.clear().await {
                    println!("Cache cleared.");
                } else {
                    eprintln!("warning: the cache could not be cleared");
                }
            }
            CacheAction::Path => match settings.cache.resolved_path() {
                Some(path) => println!("{}", path.display()),
                None => eprintln!("warning: no cache directory on this platform"),
            },
        },
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn build_resolver(settings: &Settings, no_cache: bool) -> Result<Resolver> {
    let mut config = settings.resolver_config();
    if no_cache {
        config.cache.enabled = false;
    }
    let resolver = Resolver::from_config(&config)
        .await
        .context("failed to set up the reference sources")?;
    Ok(if no_cache {
        resolver.with_cache(CacheGateway::new(Arc::new(MemoryCache::new())))
    } else {
        resolver
    })
}

#[derive(Serialize)]
struct RenderOutput<'a> {
    report: &'a ResolutionReport,
    #[serde(flatten)]
    references: &'a FormattedReferences,
}

async fn render(
    settings: &Settings,
    file: &Path,
    local: Option<&Path>,
    json: bool,
    options: ResolveOptions,
    no_cache: bool,
) -> Result<()> {
    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
    let local = match local {
        Some(path) => load_overrides(path)?,
        None => IndexMap::new(),
    };

    let scan = scan_document(&content, &settings.render);
    let resolver = build_resolver(settings, no_cache).await?;
    let store = ReferenceStore::new();
    let mut request =
        ReferenceRequest::new(scan.normative.clone(), scan.informative.clone()).with_local(local);
    let report = resolver.resolve(&mut request, &store, options).await?;

    let formatted = Formatter::new(&store)?
        .with_options(settings.render.clone())
        .format(&request.normative, &request.informative, &scan.citations);
    print_diagnostics(&formatted.diagnostics);

    if json {
        let output = RenderOutput {
            report: &report,
            references: &formatted,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!(
            "{}",
            render_document(&content, &scan, &formatted, &settings.render)
        );
    }
    Ok(())
}

async fn lookup(settings: &Settings, keys: Vec<String>, force_update: bool) -> Result<()> {
    let keys: Vec<ReferenceKey> = keys.into_iter().map(ReferenceKey::new).collect();
    let resolver = build_resolver(settings, false).await?;

    let found: IndexMap<ReferenceKey, Option<BiblioEntry>> = if force_update {
        let Some(fetched) = resolver.update_from_network(&keys).await else {
            eprintln!("warning: no reference source could be reached");
            return Ok(());
        };
        keys.iter()
            .map(|key| (key.clone(), fetched.get(key).cloned()))
            .collect()
    } else {
        let store = ReferenceStore::new();
        let mut request = ReferenceRequest::new(keys.clone(), Vec::<ReferenceKey>::new());
        resolver
            .resolve(&mut request, &store, ResolveOptions::default())
            .await?;
        let mut found = IndexMap::new();
        for key in &keys {
            found.insert(key.clone(), store.get(key.as_str()).await);
        }
        found
    };

    for key in found.iter().filter(|(_, entry)| entry.is_none()).map(|(k, _)| k) {
        eprintln!("warning: no entry for {}", key);
    }
    println!("{}", serde_json::to_string_pretty(&found)?);
    Ok(())
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("warning: {}", diagnostic);
    }
}
