//! `lightbnb reservations` - a guest's bookings

use anyhow::Result;
use clap::Parser;
use lightbnb_db::{Database, Limit};

use super::print_json;

#[derive(Parser, Debug)]
pub struct ReservationsArgs {
    /// Guest user id
    #[arg(long)]
    pub guest_id: i32,

    /// Maximum number of reservations
    #[arg(long, default_value_t = Limit::DEFAULT.get(), allow_negative_numbers = true)]
    pub limit: i64,
}

pub async fn run_reservations(db: &Database, args: ReservationsArgs) -> Result<()> {
    let rows = db
        .reservations()
        .list_for_guest(args.guest_id, args.limit)
        .await?;
    print_json(&rows)
}
