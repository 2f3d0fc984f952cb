//
//  gerrit-rest
//  cli/changes.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Change commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use crate::api::{ChangeInfo, ChangeStatus};

use super::{build_client, GlobalOptions};

/// Query changes
#[derive(Args, Debug)]
pub struct ChangesCommand {
    #[command(subcommand)]
    pub command: ChangesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ChangesSubcommand {
    /// List changes matching a Gerrit search query
    Query(QueryArgs),

    /// Show one change
    View(ViewArgs),
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Search query, e.g. "status:open owner:self"
    #[arg(default_value = "status:open")]
    pub query: String,

    /// Maximum number of results
    #[arg(long, short = 'n', default_value = "25")]
    pub limit: u32,

    /// Print JSON instead of a list
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Change number or id
    pub id: String,
}

impl ChangesCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = build_client(global)?;
        match &self.command {
            ChangesSubcommand::Query(args) => {
                let changes = client.changes().query(&args.query, Some(args.limit)).await?;
                if args.json {
                    println!("{}", serde_json::to_string_pretty(&changes)?);
                } else if changes.is_empty() {
                    println!("No changes match '{}'", args.query);
                } else {
                    for change in &changes {
                        println!("{}", format_line(change));
                    }
                }
            }
            ChangesSubcommand::View(args) => {
                let change = client.changes().get(&args.id).await?;
                println!("{}", format_line(&change));
                println!("  Project: {} ({})", change.project, change.branch);
                println!("  Owner:   {}", change.owner.display_name());
                println!("  Updated: {}", change.updated.format("%Y-%m-%d %H:%M"));
                println!("  Size:    +{} -{}", change.insertions, change.deletions);
            }
        }
        Ok(())
    }
}

fn format_line(change: &ChangeInfo) -> String {
    let status = match change.status {
        ChangeStatus::New => style("NEW").green(),
        ChangeStatus::Merged => style("MERGED").magenta(),
        ChangeStatus::Abandoned => style("ABANDONED").red(),
        ChangeStatus::Draft => style("DRAFT").dim(),
    };
    format!("{:>7}  {:<9}  {}", change.number, status, change.subject)
}
