use crate::reports;
use clap::Args;
use lineup::catalog::{self, SquadSize};
use strum::IntoEnumIterator;

#[derive(Args, Debug, Clone)]
pub struct FormationsArgs {
    /// Only list formations for this squad size (5, 7 or 11)
    #[arg(short, long)]
    pub size: Option<SquadSize>,
}

pub fn run(args: FormationsArgs) {
    let sizes: Vec<SquadSize> = match args.size {
        Some(size) => vec![size],
        None => SquadSize::iter().collect(),
    };
    for size in sizes {
        reports::print_formations(size, &catalog::catalog(size));
    }
}
