//! frontier -- prints what a player can claim, as JSON.
//!
//! For every province on the player's frontier (or every province with
//! `--all`) reports the claim cost and the claim-status code.

use std::process;

use clap::Parser;
use serde::Serialize;

use provincemap::board::{player_frontier, Palette, PlayerId, ProvinceId, World};
use provincemap::claim::{claim_status, cost, ClaimCost, ClaimFlag};
use provincemap::config::DataArgs;
use provincemap::protocol::build_world;

#[derive(Parser, Debug)]
#[command(name = "frontier")]
#[command(about = "Report claim costs and statuses for one player")]
struct Args {
    #[command(flatten)]
    data: DataArgs,

    /// Player key from the ownership table
    player: String,

    /// Report every province, not just the frontier
    #[arg(long)]
    all: bool,
}

#[derive(Serialize)]
struct ProvinceReport<'a> {
    province: &'a str,
    claimable: bool,
    cost: ClaimCost,
    status: i32,
    flags: Vec<ClaimFlag>,
}

#[derive(Serialize)]
struct Report<'a> {
    player: &'a str,
    balance: u64,
    owned: Vec<&'a str>,
    provinces: Vec<ProvinceReport<'a>>,
    asymmetric_adjacencies: Vec<(String, String)>,
}

fn report<'a>(world: &'a World, player: PlayerId, all: bool) -> Report<'a> {
    let ids: Vec<ProvinceId> = if all {
        world.province_ids().collect()
    } else {
        player_frontier(world, player).into_iter().collect()
    };
    let provinces = ids
        .into_iter()
        .map(|id| {
            let status = claim_status(world, id, player);
            let price = cost(world, id, player);
            ProvinceReport {
                province: world.province(id).name.as_str(),
                claimable: price.is_claimable(),
                cost: price,
                status: status.code(),
                flags: status.flags(),
            }
        })
        .collect();

    let p = world.player(player);
    Report {
        player: p.key.as_str(),
        balance: p.balance,
        owned: world
            .owned_provinces(player)
            .into_iter()
            .map(|id| world.province(id).name.as_str())
            .collect(),
        provinces,
        asymmetric_adjacencies: world.asymmetric_adjacencies(),
    }
}

fn main() {
    let args = Args::parse();
    args.data.init_logging();

    let world = match build_world(&args.data.tables(), &Palette::css()) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("frontier: {}", e);
            process::exit(1);
        }
    };
    let Some(player) = world.player_id(&args.player) else {
        eprintln!("frontier: unknown player '{}'", args.player);
        process::exit(1);
    };

    match serde_json::to_string_pretty(&report(&world, player, args.all)) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("frontier: {}", e);
            process::exit(1);
        }
    }
}
