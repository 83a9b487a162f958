//! `lightbnb property` - listing creation

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use lightbnb_db::models::NewProperty;
use lightbnb_db::Database;

use super::print_json;

#[derive(Parser, Debug)]
pub struct PropertyArgs {
    #[command(subcommand)]
    pub command: PropertyCommands,
}

#[derive(Subcommand, Debug)]
pub enum PropertyCommands {
    /// Add a property for an existing owner
    Add(AddPropertyArgs),
}

#[derive(Args, Debug)]
pub struct AddPropertyArgs {
    /// Owner's user id
    #[arg(long)]
    pub owner_id: i32,
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub thumbnail_photo_url: String,
    #[arg(long)]
    pub cover_photo_url: String,
    /// Cost per night in the store's unit
    #[arg(long, allow_negative_numbers = true)]
    pub cost_per_night: i32,
    #[arg(long, default_value_t = 0)]
    pub parking_spaces: i32,
    #[arg(long, default_value_t = 0)]
    pub number_of_bathrooms: i32,
    #[arg(long, default_value_t = 0)]
    pub number_of_bedrooms: i32,
    #[arg(long)]
    pub country: String,
    #[arg(long)]
    pub street: String,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub province: String,
    #[arg(long)]
    pub post_code: String,
}

impl From<AddPropertyArgs> for NewProperty {
    fn from(args: AddPropertyArgs) -> Self {
        NewProperty {
            owner_id: args.owner_id,
            title: args.title,
            description: args.description,
            thumbnail_photo_url: args.thumbnail_photo_url,
            cover_photo_url: args.cover_photo_url,
            cost_per_night: args.cost_per_night,
            parking_spaces: args.parking_spaces,
            number_of_bathrooms: args.number_of_bathrooms,
            number_of_bedrooms: args.number_of_bedrooms,
            country: args.country,
            street: args.street,
            city: args.city,
            province: args.province,
            post_code: args.post_code,
        }
    }
}

pub async fn run_property(db: &Database, args: PropertyArgs) -> Result<()> {
    match args.command {
        PropertyCommands::Add(args) => {
            let property = db.properties().add(args.into()).await?;
            print_json(&property)
        }
    }
}
