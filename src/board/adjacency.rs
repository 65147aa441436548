//! Reachability over the province graph.
//!
//! A province reaches its direct land neighbors, every ocean province when it
//! is itself an ocean province, and every province sharing one of its named
//! seas. A player's frontier is the set of unowned provinces reachable from
//! anything the player owns.
//!
//! Names that do not resolve to a loaded province are skipped.

use std::collections::BTreeSet;

use super::player::PlayerId;
use super::province::ProvinceId;
use super::world::World;

/// Provinces bordering `id` over land only.
pub fn direct_neighbors(world: &World, id: ProvinceId) -> BTreeSet<ProvinceId> {
    let province = world.province(id);
    province
        .adjacent
        .iter()
        .filter_map(|name| world.province_id(name))
        .filter(|other| *other != id)
        .collect()
}

/// Provinces reachable from `id` directly or across a shared ocean or sea.
///
/// Never contains `id` itself.
pub fn province_frontier(world: &World, id: ProvinceId) -> BTreeSet<ProvinceId> {
    let province = world.province(id);
    let mut reach = BTreeSet::new();

    if province.is_water_linked() {
        if province.ocean {
            reach.extend(world.ocean_provinces().iter().copied());
        }
        for sea in &province.seas {
            reach.extend(world.sea_provinces(sea).iter().copied());
        }
    }
    reach.extend(direct_neighbors(world, id));

    reach.remove(&id);
    reach
}

/// Provinces bordering anything `player` owns over land, owned or not.
pub fn player_borders(world: &World, player: PlayerId) -> BTreeSet<ProvinceId> {
    world
        .owned_provinces(player)
        .into_iter()
        .flat_map(|id| direct_neighbors(world, id))
        .collect()
}

/// Every province reachable from something `player` owns, owned or not.
pub fn player_reach(world: &World, player: PlayerId) -> BTreeSet<ProvinceId> {
    world
        .owned_provinces(player)
        .into_iter()
        .flat_map(|id| province_frontier(world, id))
        .collect()
}

/// Unowned provinces reachable from any province `player` owns.
pub fn player_frontier(world: &World, player: PlayerId) -> BTreeSet<ProvinceId> {
    let candidates = player_reach(world, player);

    // Filter from the complete candidate snapshot into a fresh set.
    candidates
        .into_iter()
        .filter(|id| !world.province(*id).is_owned())
        .collect()
}

/// Resolves a set of province ids to their names, in id order.
pub fn names<'a>(world: &'a World, ids: &BTreeSet<ProvinceId>) -> Vec<&'a str> {
    ids.iter().map(|id| world.province(*id).name.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::color::Color;
    use crate::board::level::Level;
    use crate::board::player::Player;
    use crate::board::province::{Position, ProvinceSpec};

    struct Fixture {
        world: World,
        alice: PlayerId,
        bob: PlayerId,
    }

    fn add(world: &mut World, name: &str, adjacent: &[&str], ocean: bool, seas: &[&str]) {
        let r = world.add_region("all");
        world
            .add_province(
                r,
                ProvinceSpec {
                    name: name.to_string(),
                    level: "level1".to_string(),
                    position: Position::new(0, 0),
                    adjacent: adjacent.iter().map(|s| s.to_string()).collect(),
                    ocean,
                    sea: !seas.is_empty(),
                    seas: seas.iter().map(|s| s.to_string()).collect(),
                },
            )
            .unwrap();
    }

    // A - B - C on land; A and D on the ocean; B and E share the "inner" sea;
    // A also lists a province that was never loaded.
    fn fixture() -> Fixture {
        let mut world = World::new(vec![Level::new("level1", "level1", 5, 1, Color::BLACK)]);
        add(&mut world, "A", &["B", "MISSING"], true, &[]);
        add(&mut world, "B", &["A", "C"], false, &["inner"]);
        add(&mut world, "C", &["B"], false, &[]);
        add(&mut world, "D", &[], true, &[]);
        add(&mut world, "E", &[], false, &["inner"]);
        let alice = world
            .add_player(Player::new("alice", "Alice", 1, Color::new(200, 0, 0), world.levels()))
            .unwrap();
        let bob = world
            .add_player(Player::new("bob", "Bob", 2, Color::new(0, 0, 200), world.levels()))
            .unwrap();
        Fixture { world, alice, bob }
    }

    fn id(world: &World, name: &str) -> ProvinceId {
        world.province_id(name).unwrap()
    }

    #[test]
    fn ocean_province_reaches_other_oceans_but_not_itself() {
        let f = fixture();
        let a = id(&f.world, "A");
        let reach = province_frontier(&f.world, a);
        assert_eq!(names(&f.world, &reach), vec!["B", "D"]);
        assert!(!reach.contains(&a));
    }

    #[test]
    fn sea_links_are_shared_by_name() {
        let f = fixture();
        let reach = province_frontier(&f.world, id(&f.world, "B"));
        assert_eq!(names(&f.world, &reach), vec!["A", "C", "E"]);

        let reach = province_frontier(&f.world, id(&f.world, "E"));
        assert_eq!(names(&f.world, &reach), vec!["B"]);
    }

    #[test]
    fn sea_flag_without_named_seas_reaches_land_only() {
        let mut f = fixture();
        let r = f.world.add_region("all");
        f.world
            .add_province(
                r,
                ProvinceSpec {
                    name: "G".to_string(),
                    level: "level1".to_string(),
                    adjacent: vec!["C".to_string()],
                    sea: true,
                    ..ProvinceSpec::default()
                },
            )
            .unwrap();
        let g = id(&f.world, "G");
        assert!(!f.world.province(g).is_water_linked());
        assert_eq!(names(&f.world, &province_frontier(&f.world, g)), vec!["C"]);
    }

    #[test]
    fn missing_neighbors_are_skipped() {
        let f = fixture();
        let direct = direct_neighbors(&f.world, id(&f.world, "A"));
        assert_eq!(names(&f.world, &direct), vec!["B"]);
    }

    #[test]
    fn frontier_excludes_owned_provinces() {
        let mut f = fixture();
        f.world.assign_province(f.alice, "A");
        f.world.assign_province(f.bob, "D");

        let frontier = player_frontier(&f.world, f.alice);
        assert_eq!(names(&f.world, &frontier), vec!["B"]);
        for p in &frontier {
            assert!(!f.world.province(*p).is_owned());
        }
    }

    #[test]
    fn adjacent_eliminations_are_not_skipped() {
        // Two consecutive owned candidates must both be removed.
        let mut f = fixture();
        f.world.assign_province(f.alice, "B");
        f.world.assign_province(f.bob, "A");
        f.world.assign_province(f.bob, "C");

        let frontier = player_frontier(&f.world, f.alice);
        assert_eq!(names(&f.world, &frontier), vec!["E"]);
    }

    #[test]
    fn player_without_provinces_has_empty_frontier() {
        let f = fixture();
        assert!(player_frontier(&f.world, f.alice).is_empty());
        assert!(player_borders(&f.world, f.alice).is_empty());
    }

    #[test]
    fn borders_are_land_only() {
        let mut f = fixture();
        f.world.assign_province(f.alice, "B");
        let borders = player_borders(&f.world, f.alice);
        assert_eq!(names(&f.world, &borders), vec!["A", "C"]);
    }
}
