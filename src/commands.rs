use serde::Serialize;
use tracing::info;

use browserselect::config::Config;
use browserselect::input::classify;
use browserselect::{Coordinator, ResolutionResult};

use crate::cli::{ClassifyArgs, ResolveArgs};

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Serialize)]
struct Candidate<'a> {
    id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ResolveOutput<'a> {
    stage: &'static str,
    final_string: &'a str,
    was_unshortened: bool,
    candidates: Vec<Candidate<'a>>,
}

pub fn classify_input(args: ClassifyArgs) -> Result<(), AnyError> {
    let classified = classify(&args.input);
    println!("{}", serde_json::to_string_pretty(&classified)?);
    Ok(())
}

pub async fn resolve_input(config: &Config, args: ResolveArgs) -> Result<(), AnyError> {
    let mut opts = config.resolve_options();
    opts.unshorten |= args.unshorten;
    opts.canonicalize |= args.canonicalize;
    if let Some(append_text) = args.append_text {
        opts.append_text = append_text;
    }
    if let Some(user_agent) = args.user_agent {
        opts.user_agent = user_agent;
    }

    let coordinator = Coordinator::with_http(config.http_config())?;
    let (immediate, pending) =
        coordinator.resolve_pending(&args.input, &opts, config.registries());
    print_result(config, "immediate", &immediate)?;

    if let Some(pending) = pending {
        info!(input = %args.input, "Waiting for expansion");
        if let Some(expanded) = pending.wait().await {
            print_result(config, "expanded", &expanded)?;
        }
    }

    Ok(())
}

pub fn show_config(config: &Config) -> Result<(), AnyError> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

fn print_result(
    config: &Config,
    stage: &'static str,
    result: &ResolutionResult,
) -> Result<(), AnyError> {
    let output = ResolveOutput {
        stage,
        final_string: &result.final_string,
        was_unshortened: result.was_unshortened,
        candidates: result
            .candidate_handler_ids
            .iter()
            .map(|id| Candidate {
                id: id.as_str(),
                name: config.browser_name(id),
            })
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
