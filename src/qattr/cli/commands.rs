use super::render::{print_grouped, print_json};
use super::setup::{init_tracing, Cli, Commands};
use clap::Parser;
use qattr::definitions::sanitize_value;
use qattr::error::{QattrError, Result};
use qattr::{AttributeResolver, MemorySource, ResolveRequest, ResolverConfig};
use std::fs;
use std::path::{Path, PathBuf};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Resolve {
            bundle,
            question,
            locale,
            theme,
            advanced,
            grouped,
        } => {
            let resolver = init_resolver(&bundle, cli.config)?;
            let options = ResolveOptions {
                question,
                locale,
                theme,
                advanced,
                grouped,
            };
            handle_resolve(&resolver, options)
        }
        Commands::Plugins {
            bundle,
            question_type,
        } => {
            let resolver = init_resolver(&bundle, cli.config)?;
            handle_plugins(&resolver, &question_type)
        }
        Commands::Sanitize { file } => handle_sanitize(&file),
    }
}

struct ResolveOptions {
    question: u64,
    locale: Option<String>,
    theme: Option<String>,
    advanced: bool,
    grouped: bool,
}

fn init_resolver(bundle: &Path, config: Option<PathBuf>) -> Result<AttributeResolver<MemorySource>> {
    let config_path = config.or_else(ResolverConfig::default_path);
    let config = ResolverConfig::load(config_path.as_deref())?;
    let source = MemorySource::from_path(bundle)?;
    tracing::debug!(bundle = %bundle.display(), "Loaded bundle");
    Ok(AttributeResolver::new(source, config))
}

fn handle_resolve(resolver: &AttributeResolver<MemorySource>, options: ResolveOptions) -> Result<()> {
    let question = resolver
        .source()
        .question(options.question)
        .ok_or_else(|| {
            QattrError::Source(format!("Question {} not found in bundle", options.question))
        })?;

    let mut request = ResolveRequest::new(question).advanced_only(options.advanced);
    if let Some(locale) = options.locale {
        request = request.locale(locale);
    }
    if let Some(theme) = options.theme {
        request = request.theme(theme);
    }

    let resolved = resolver.resolve_request(&request)?;
    if options.grouped {
        print_grouped(&resolved);
        Ok(())
    } else {
        print_json(&resolved)
    }
}

fn handle_plugins(resolver: &AttributeResolver<MemorySource>, question_type: &str) -> Result<()> {
    let plugins = resolver.plugin_attributes(question_type)?;
    print_json(&plugins)
}

fn handle_sanitize(file: &Path) -> Result<()> {
    let content = fs::read_to_string(file)?;
    let raw: serde_json::Value = serde_json::from_str(&content)?;
    print_json(&sanitize_value(raw))
}
