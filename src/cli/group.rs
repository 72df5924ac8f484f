//
//  bitbucket-legacy
//  cli/group.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Group management commands
//!
//! ## Examples
//!
//! ```bash
//! # List groups owned by an account
//! bb1 group list alice
//!
//! # Show one group with its members
//! bb1 group show alice/developers
//!
//! # Create and delete
//! bb1 group create alice "Release Managers"
//! bb1 group delete alice/release-managers
//!
//! # Membership
//! bb1 group add-member alice/developers bob
//! bb1 group remove-member alice/developers bob
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use crate::api::v1::Group;

use super::{parse_owner_slug, print_json, GlobalOptions};

/// Manage account groups
#[derive(Args, Debug)]
pub struct GroupCommand {
    #[command(subcommand)]
    pub command: GroupSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum GroupSubcommand {
    /// List groups owned by an account
    #[command(visible_alias = "ls")]
    List {
        /// Owning account
        owner: String,
    },

    /// Show a group and its members
    Show {
        /// Group as OWNER/SLUG
        group: String,
    },

    /// Create a group
    Create {
        /// Owning account
        owner: String,

        /// Display name; the server derives the slug
        name: String,
    },

    /// Delete a group
    Delete {
        /// Group as OWNER/SLUG
        group: String,
    },

    /// Add an account to a group
    AddMember {
        /// Group as OWNER/SLUG
        group: String,

        /// Account to add
        member: String,
    },

    /// Remove an account from a group
    RemoveMember {
        /// Group as OWNER/SLUG
        group: String,

        /// Account to remove
        member: String,
    },
}

impl GroupCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let groups = client.groups();

        match &self.command {
            GroupSubcommand::List { owner } => {
                let list = groups.list(owner).await?;
                if global.json {
                    return print_json(&list);
                }
                if list.is_empty() {
                    println!("No groups found for {}.", owner);
                    return Ok(());
                }
                println!(
                    "{} {} {}",
                    style(format!("{:<30}", "SLUG")).bold(),
                    style(format!("{:<12}", "PERMISSION")).bold(),
                    style("MEMBERS").bold()
                );
                for group in &list {
                    println!(
                        "{:<30} {:<12} {}",
                        group.slug,
                        group.permission.as_deref().unwrap_or("-"),
                        group.members.len()
                    );
                }
            }
            GroupSubcommand::Show { group } => {
                let (owner, slug) = parse_owner_slug(group)?;
                let found = groups.find(owner, slug).await?;
                if global.json {
                    return print_json(&found);
                }
                print_group(&found);
            }
            GroupSubcommand::Create { owner, name } => {
                let created = groups.create(owner, name).await?;
                if global.json {
                    return print_json(&created);
                }
                println!(
                    "{} Created group {}/{}",
                    style("✓").green(),
                    owner,
                    style(&created.slug).cyan()
                );
            }
            GroupSubcommand::Delete { group } => {
                let (owner, slug) = parse_owner_slug(group)?;
                groups.delete(owner, slug).await?;
                if global.json {
                    return print_json(&serde_json::json!({ "deleted": group }));
                }
                println!("{} Deleted group {}", style("✓").green(), group);
            }
            GroupSubcommand::AddMember { group, member } => {
                let (owner, slug) = parse_owner_slug(group)?;
                let user = groups.add_member(owner, slug, member).await?;
                if global.json {
                    return print_json(&user);
                }
                println!(
                    "{} Added {} to {}",
                    style("✓").green(),
                    style(&user.username).cyan(),
                    group
                );
            }
            GroupSubcommand::RemoveMember { group, member } => {
                let (owner, slug) = parse_owner_slug(group)?;
                groups.remove_member(owner, slug, member).await?;
                if global.json {
                    return print_json(&serde_json::json!({ "removed": member, "group": group }));
                }
                println!("{} Removed {} from {}", style("✓").green(), member, group);
            }
        }

        Ok(())
    }
}

fn print_group(group: &Group) {
    println!("{}", style(&group.name).bold());
    println!("  Slug:       {}", group.slug);
    let owner = group
        .owner
        .as_ref()
        .map(|o| o.username.as_str())
        .or(group.account_name.as_deref());
    if let Some(owner) = owner {
        println!("  Owner:      {}", owner);
    }
    println!("  Permission: {}", group.permission.as_deref().unwrap_or("-"));
    println!("  Auto-add:   {}", if group.auto_add { "yes" } else { "no" });
    println!("  Members:    {}", group.members.len());
    for member in &group.members {
        println!("    {} ({})", member.display_name(), member.username);
    }
}
