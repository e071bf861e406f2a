//! Subcommand execution: fill the form from arguments, press one action.

use std::path::Path;

use anyhow::{Context, Result, bail};
use api::HttpClient;
use core_types::config::{self, AppConfig};
use tracing::info;
use ui::views::{render_collections, render_results};
use ui::{ActionKind, FormController, FormField, FormState, VectorStore};

use crate::args::{Cli, Command, ConfigAction, Target};
use crate::notify::ConsoleNotifier;
use crate::shell;

type Controller = FormController<HttpClient, ConsoleNotifier>;

/// Effective configuration: file (or defaults), environment, then `--base-url`.
pub fn prepare_config(config_path: Option<&Path>, base_url: Option<&str>) -> Result<AppConfig> {
    let mut cfg = config::load_config(config_path)?;
    if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
        cfg.backend.base_url = url.to_string();
    }
    Ok(cfg)
}

fn controller(cfg: &AppConfig) -> Result<Controller> {
    let client = HttpClient::from_config(&cfg.backend)
        .with_context(|| format!("backend address {}", cfg.backend.base_url))?;
    let store = VectorStore::new(client, cfg.client.concurrency);
    Ok(FormController::new(
        FormState::with_defaults(&cfg.form),
        store,
        ConsoleNotifier,
    ))
}

fn apply_target(form: &mut FormState, target: &Target) {
    if let Some(id) = target.id {
        form.id = id;
    }
    if let Some(pc) = &target.pc {
        form.pc = pc.clone();
    }
}

/// Fill the form for a one-shot command. `None` for commands that are not
/// form actions.
fn fill_form(form: &mut FormState, command: &Command) -> Result<Option<ActionKind>> {
    let kind = match command {
        Command::Search {
            target,
            collection,
            vector_field,
            embeddings,
            metric,
            limit,
        } => {
            apply_target(form, target);
            form.set(FormField::Collection, collection)?;
            form.set(FormField::VectorField, vector_field)?;
            form.set(FormField::Embeddings, embeddings)?;
            if let Some(metric) = metric {
                form.metric_type = *metric;
            }
            if let Some(limit) = limit {
                form.limit = *limit;
            }
            ActionKind::Search
        }
        Command::Insert {
            target,
            collection,
            data,
        } => {
            apply_target(form, target);
            form.set(FormField::Collection, collection)?;
            form.set(FormField::Data, data)?;
            ActionKind::Insert
        }
        Command::Delete {
            target,
            collection,
            conditions,
        } => {
            apply_target(form, target);
            form.set(FormField::Collection, collection)?;
            form.set(FormField::Conditions, conditions)?;
            ActionKind::Delete
        }
        Command::CreateCollection { target, name } => {
            apply_target(form, target);
            form.set(FormField::Collection, name)?;
            ActionKind::CreateCollection
        }
        Command::DeleteCollection { target, name } => {
            apply_target(form, target);
            form.set(FormField::Collection, name)?;
            ActionKind::DeleteCollection
        }
        Command::Details { cids } => {
            form.set(FormField::Cids, cids)?;
            ActionKind::GetDetails
        }
        Command::Resources { target } => {
            apply_target(form, target);
            ActionKind::GetResources
        }
        Command::Shell | Command::Config { .. } => return Ok(None),
    };
    Ok(Some(kind))
}

async fn one_shot(mut controller: Controller, command: &Command) -> Result<()> {
    let Some(kind) = fill_form(&mut controller.form, command)? else {
        return Ok(());
    };
    info!(action = %kind, base_url = controller.store().backend().base_url(), "running");
    if !controller.press_and_wait(kind).await {
        bail!("{kind} was not sent");
    }
    match kind {
        ActionKind::Search => println!("{}", render_results(&controller.store().results())),
        ActionKind::CreateCollection | ActionKind::DeleteCollection => {
            println!("{}", render_collections(&controller.store().collections()));
        }
        _ => {}
    }
    Ok(())
}

fn config_command(action: ConfigAction, config_path: Option<&Path>, cfg: &AppConfig) -> Result<()> {
    match action {
        ConfigAction::Show => print!("{}", cfg.to_toml()?),
        ConfigAction::Init => {
            let path = config::resolve_config_path(config_path);
            let existed = path.exists();
            config::load_or_create_config(Some(&path))?;
            if existed {
                println!("config already exists at {}", path.display());
            } else {
                println!("wrote {}", path.display());
            }
        }
    }
    Ok(())
}

pub async fn execute(cli: Cli, cfg: AppConfig) -> Result<()> {
    match &cli.command {
        Command::Config { action } => config_command(*action, cli.config.as_deref(), &cfg),
        Command::Shell => {
            let mut controller = controller(&cfg)?;
            shell::run_shell(&mut controller).await
        }
        command => one_shot(controller(&cfg)?, command).await,
    }
}
