//! `lightbnb user` - lookups and sign-up

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use lightbnb_db::models::NewUser;
use lightbnb_db::Database;

use super::{print_json, print_optional};

#[derive(Parser, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommands,
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Fetch one user by id or email (prints null if absent)
    Get(GetArgs),
    /// Create a user
    Add(AddArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct GetArgs {
    /// User id
    #[arg(long)]
    pub id: Option<i32>,

    /// Email address (case-insensitive)
    #[arg(long)]
    pub email: Option<String>,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Email address, unique per user
    #[arg(long)]
    pub email: String,

    /// Password, stored as given
    #[arg(long, env = "LIGHTBNB_USER_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run_user(db: &Database, args: UserArgs) -> Result<()> {
    let users = db.users();
    match args.command {
        UserCommands::Get(GetArgs { id: Some(id), .. }) => {
            print_optional(users.get_with_id(id).await?)
        }
        UserCommands::Get(GetArgs {
            email: Some(email), ..
        }) => print_optional(users.get_with_email(&email).await?),
        UserCommands::Get(_) => anyhow::bail!("either --id or --email is required"),
        UserCommands::Add(args) => {
            let user = users
                .add(NewUser::new(args.name, args.email, args.password))
                .await?;
            print_json(&user)
        }
    }
}
