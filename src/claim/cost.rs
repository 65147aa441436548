//! Claim pricing and the runtime claim operation.
//!
//! A province is claimable by a player when it is unowned and on the
//! player's frontier. Claims across a land border cost the level's base cost;
//! claims that only reach the province across an ocean or sea cost double.

use serde::Serialize;

use crate::board::adjacency::{player_borders, player_frontier, player_reach};
use crate::board::{PlayerId, ProvinceId, World};

use super::status::{ClaimFlag, ClaimStatus};

/// Outcome of pricing a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimCost {
    /// The province can be claimed for this many points.
    Claimable(u32),
    /// The province already has an owner.
    AlreadyOwned { by_self: bool },
    /// The province is not on the player's frontier.
    Unreachable,
}

impl ClaimCost {
    /// Returns true for `Claimable`.
    pub const fn is_claimable(self) -> bool {
        matches!(self, ClaimCost::Claimable(_))
    }

    /// The single-integer form, where 0 means "cannot claim".
    pub const fn legacy_cost(self) -> u32 {
        match self {
            ClaimCost::Claimable(n) => n,
            _ => 0,
        }
    }
}

/// Prices a claim on `province` by `player`.
pub fn cost(world: &World, province: ProvinceId, player: PlayerId) -> ClaimCost {
    let target = world.province(province);
    if let Some(owner) = target.owner {
        return ClaimCost::AlreadyOwned { by_self: owner == player };
    }
    if !player_frontier(world, player).contains(&province) {
        return ClaimCost::Unreachable;
    }

    let base = world.level(target.level).cost;
    if player_borders(world, player).contains(&province) {
        ClaimCost::Claimable(base)
    } else {
        ClaimCost::Claimable(base.saturating_mul(2))
    }
}

/// Describes a claim on `province` by `player` as a status bitmask.
///
/// The result is always a valid code. A province the player already owns is
/// just `self_owned`. Otherwise exactly one of ok/other_owned may be set,
/// plus `water` when the province is reached only across an ocean or sea and
/// `not_adjacent` when it is not reached at all.
pub fn claim_status(world: &World, province: ProvinceId, player: PlayerId) -> ClaimStatus {
    let target = world.province(province);
    if target.is_owned_by(player) {
        return ClaimStatus::EMPTY.with(ClaimFlag::SelfOwned);
    }
    let reachable = player_reach(world, player).contains(&province);

    let mut status = match target.owner {
        Some(_) => ClaimStatus::EMPTY.with(ClaimFlag::OtherOwned),
        None if reachable => ClaimStatus::EMPTY.with(ClaimFlag::Ok),
        None => ClaimStatus::EMPTY,
    };

    if !reachable {
        status.insert(ClaimFlag::NotAdjacent);
    } else if !player_borders(world, player).contains(&province) {
        status.insert(ClaimFlag::Water);
    }
    status
}

/// Errors from a rejected claim.
#[derive(Debug, thiserror::Error)]
pub enum ClaimError {
    #[error("province '{province}' cannot be claimed (status {status})")]
    NotClaimable { province: String, status: ClaimStatus },

    #[error("player '{player}' has {balance} points but the claim costs {cost}")]
    InsufficientBalance { player: String, balance: u64, cost: u32 },
}

/// Claims `province` for `player`, deducting the price from their balance.
///
/// Returns the amount paid.
pub fn claim(world: &mut World, province: ProvinceId, player: PlayerId) -> Result<u32, ClaimError> {
    let price = match cost(world, province, player) {
        ClaimCost::Claimable(n) => n,
        _ => {
            return Err(ClaimError::NotClaimable {
                province: world.province(province).name.clone(),
                status: claim_status(world, province, player),
            })
        }
    };

    let buyer = world.player(player);
    if buyer.balance < u64::from(price) {
        return Err(ClaimError::InsufficientBalance {
            player: buyer.key.clone(),
            balance: buyer.balance,
            cost: price,
        });
    }

    world.player_mut(player).balance -= u64::from(price);
    world.set_owner(province, Some(player));
    tracing::info!(
        province = %world.province(province).name,
        player = %world.player(player).key,
        price,
        "province claimed"
    );
    Ok(price)
}

impl World {
    /// Claims `province` for `player`. See [`claim`].
    pub fn claim(&mut self, province: ProvinceId, player: PlayerId) -> Result<u32, ClaimError> {
        claim(self, province, player)
    }
}
