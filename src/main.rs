//! access-sync - administration CLI for the access-control backend
//!
//! Inspect and edit the role/permission matrix, classify the current session
//! and remove roles from users.

#![allow(missing_docs)]

use access_sync::auth::rbac::Vocabulary;
use access_sync::utils::logging::init_logging;
use access_sync::{
    AccessApi, ActionKind, Config, DeleteOutcome, DeletionController, HttpAccessApi, Liveness,
    MatrixSession, MatrixViewState, PrincipalResolver, PrivilegeClassifier, RoleId,
    SessionContext, SessionUser, ToggleOutcome, UserId, UserRoleRef,
};
use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use std::collections::HashSet;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", ",
    env!("RUST_VERSION"),
    ")"
);

#[derive(Debug, Parser)]
#[command(name = "access-sync", version, long_version = LONG_VERSION, about)]
struct Cli {
    /// YAML configuration file; environment variables only when omitted
    #[arg(short, long, env = "ACCESS_SYNC_CONFIG")]
    config: Option<PathBuf>,

    /// Override the backend base URL
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the role catalog
    Roles,
    /// Print the permission matrix
    Matrix {
        /// Only resources whose identifier or label contains this term
        #[arg(short, long, default_value = "")]
        search: String,
        /// Only these roles (repeatable); all roles when omitted
        #[arg(short, long = "role")]
        roles: Vec<i64>,
        /// Emit JSON rows
        #[arg(long)]
        json: bool,
    },
    /// Flip one cell of the matrix
    Toggle {
        role: i64,
        resource: String,
        action: ActionKind,
    },
    /// Classify the principal behind the configured token
    Whoami,
    /// Remove a role from a user
    RevokeRole {
        user: i64,
        role: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path).await?,
        None => Config::from_env()?,
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
        config.validate()?;
    }

    init_logging(&config.logging)?;

    let api: Arc<dyn AccessApi> = Arc::new(
        HttpAccessApi::from_config(&config.api).context("Failed to create backend client")?,
    );

    match cli.command {
        Command::Roles => {
            for role in api.list_roles().await? {
                println!("{}\t{}", role.id, role.name);
            }
        }
        Command::Matrix {
            search,
            roles,
            json,
        } => {
            let session = MatrixSession::load(api, config.matrix.clone()).await?;
            let mut state = MatrixViewState::default();
            state.set_search(search);
            roles
                .into_iter()
                .for_each(|id| state.toggle_role(RoleId(id)));

            let rows = session.with_view(|view| view.rows(&state, &HashSet::new()));
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for row in &rows {
                    println!("{} ({})", row.label, row.resource);
                    for role in &row.roles {
                        let marks: String = role
                            .cells
                            .iter()
                            .map(|cell| match (cell.available(), cell.granted) {
                                (false, _) => '-',
                                (true, true) => 'x',
                                (true, false) => '.',
                            })
                            .collect();
                        println!(
                            "  {:<24} [{}] {}/{}",
                            role.role_name, marks, role.coverage.granted, role.coverage.total
                        );
                    }
                }
            }
            session.teardown();
        }
        Command::Toggle {
            role,
            resource,
            action,
        } => {
            let session = MatrixSession::load(api, config.matrix.clone()).await?;
            let outcome = session
                .cells()
                .toggle(RoleId(role), &resource, action)
                .await?;
            match outcome {
                ToggleOutcome::Committed { granted: true } => {
                    println!("Granted {}.{} to role {}", resource, action, role)
                }
                ToggleOutcome::Committed { granted: false } => {
                    println!("Revoked {}.{} from role {}", resource, action, role)
                }
                other => println!("{:?}", other),
            }
        }
        Command::Whoami => {
            let vocabulary = Vocabulary::from_config(&config.classifier)?;
            let resolver = PrincipalResolver::new(api, PrivilegeClassifier::new(vocabulary));
            let context = SessionContext::new(config.api.token.clone(), SessionUser::default());

            let (principal, verdict) = resolver.evaluate(&context).await;
            let report = serde_json::json!({
                "user": principal.user,
                "verdict": verdict,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::RevokeRole { user, role, yes } => {
            let deletions = DeletionController::new(api, Liveness::new());
            deletions.request_delete(UserRoleRef::new(UserId(user), RoleId(role)));

            if !yes && !confirm(&format!("Remove role {} from user {}?", role, user))? {
                deletions.cancel_delete();
                println!("Cancelled");
                return Ok(());
            }

            match deletions
                .confirm_delete(|r| println!("Removed role {} from user {}", r.role_id, r.user_id))
                .await?
            {
                DeleteOutcome::Deleted(_) => {}
                other => bail!("Deletion not performed: {:?}", other),
            }
        }
    }

    Ok(())
}

fn confirm(question: &str) -> anyhow::Result<bool> {
    print!("{} [y/N] ", question);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
