//
//  bitbucket-legacy
//  cli/user.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! User account commands

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use crate::api::v1::Account;

use super::{print_json, GlobalOptions};

/// Show user accounts
#[derive(Args, Debug)]
pub struct UserCommand {
    #[command(subcommand)]
    pub command: UserSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum UserSubcommand {
    /// Show an account, or the authenticated one when omitted
    Show {
        /// Account name
        account: Option<String>,
    },

    /// List the followers of an account
    Followers {
        /// Account name
        account: String,
    },
}

impl UserCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;

        match &self.command {
            UserSubcommand::Show { account } => {
                let found = match account {
                    Some(account) => client.users().find(account).await?,
                    None => client.users().current().await?,
                };
                if global.json {
                    return print_json(&found);
                }
                print_account(&found);
            }
            UserSubcommand::Followers { account } => {
                let followers = client.users().followers(account).await?;
                if global.json {
                    return print_json(&followers);
                }
                println!("{} follower(s)", followers.count);
                for user in &followers.followers {
                    println!("  {}", user.username);
                }
            }
        }

        Ok(())
    }
}

fn print_account(account: &Account) {
    let user = &account.user;
    println!("{}", style(user.display_name()).bold());
    println!("  Username: {}", user.username);
    println!("  Type:     {}", if user.is_team { "team" } else { "user" });
    if !account.repositories.is_empty() {
        println!("  Repositories:");
        for repo in &account.repositories {
            println!("    {}", repo.full_name());
        }
    }
}
