//
//  bitbucket-legacy
//  cli/repo.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository commands
//!
//! ## Examples
//!
//! ```bash
//! # Repositories visible to the authenticated account
//! bb1 repo list
//!
//! # Details of one repository
//! bb1 repo show alice/tools
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use crate::api::v1::Repository;

use super::{parse_owner_slug, print_json, GlobalOptions};

/// Show repositories
#[derive(Args, Debug)]
pub struct RepoCommand {
    #[command(subcommand)]
    pub command: RepoSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RepoSubcommand {
    /// List repositories of the authenticated account
    #[command(visible_alias = "ls")]
    List,

    /// Show a repository
    Show {
        /// Repository as OWNER/SLUG
        repo: String,
    },
}

impl RepoCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;

        match &self.command {
            RepoSubcommand::List => {
                let repos = client.repositories().list_mine().await?;
                if global.json {
                    return print_json(&repos);
                }
                if repos.is_empty() {
                    println!("No repositories found.");
                    return Ok(());
                }
                for repo in &repos {
                    let visibility = if repo.is_private { "private" } else { "public" };
                    println!(
                        "{:<40} {:<8} {}",
                        repo.full_name(),
                        visibility,
                        repo.scm.as_deref().unwrap_or("-")
                    );
                }
            }
            RepoSubcommand::Show { repo } => {
                let (owner, slug) = parse_owner_slug(repo)?;
                let found = client.repositories().find(owner, slug).await?;
                if global.json {
                    return print_json(&found);
                }
                print_repository(&found);
            }
        }

        Ok(())
    }
}

fn print_repository(repo: &Repository) {
    println!("{}", style(repo.full_name()).bold());
    if let Some(description) = repo.description.as_deref().filter(|d| !d.is_empty()) {
        println!("  {}", description);
    }
    println!("  SCM:        {}", repo.scm.as_deref().unwrap_or("-"));
    println!("  Visibility: {}", if repo.is_private { "private" } else { "public" });
    if let Some(language) = repo.language.as_deref().filter(|l| !l.is_empty()) {
        println!("  Language:   {}", language);
    }
    if let Some(updated) = repo.last_updated() {
        println!("  Updated:    {}", updated.format("%Y-%m-%d %H:%M UTC"));
    }
}
