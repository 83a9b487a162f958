//! `lightbnb search` - filtered property listing

use anyhow::Result;
use clap::Parser;
use lightbnb_db::{Database, FilterSet, Limit};
use tracing::info;

use super::print_json;

#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Substring of the property's city
    #[arg(long)]
    pub city: Option<String>,

    /// Only properties listed by this owner
    #[arg(long)]
    pub owner_id: Option<i32>,

    /// Cost per night must be above this
    #[arg(long = "min-price", allow_negative_numbers = true)]
    pub minimum_price_per_night: Option<i32>,

    /// Cost per night must be below this
    #[arg(long = "max-price", allow_negative_numbers = true)]
    pub maximum_price_per_night: Option<i32>,

    /// Average review rating must be at least this
    #[arg(long = "min-rating", allow_negative_numbers = true)]
    pub minimum_rating: Option<f64>,

    /// Maximum number of results
    #[arg(long, default_value_t = Limit::DEFAULT.get(), allow_negative_numbers = true)]
    pub limit: i64,
}

impl SearchArgs {
    fn filters(&self) -> FilterSet {
        FilterSet {
            city: self.city.clone(),
            owner_id: self.owner_id,
            minimum_price_per_night: self.minimum_price_per_night,
            maximum_price_per_night: self.maximum_price_per_night,
            minimum_rating: self.minimum_rating,
        }
    }
}

pub async fn run_search(db: &Database, args: SearchArgs) -> Result<()> {
    let rows = db.properties().search(&args.filters(), args.limit).await?;
    info!(count = rows.len(), "search returned");
    print_json(&rows)
}
