use super::*;

#[test]
fn test_update_discovered_reveals_around_every_telescope_holder() {
    let rules = test_rules();
    let mut state = base_state(&rules);
    assert!(state.discovered.is_empty());

    update_discovered(&mut state, &rules);
    // Two opposite corners, radius-2 diamonds clipped to 6 cells each.
    assert_eq!(state.discovered.len(), 12);
    assert!(state.discovered.contains(&Cell::new(0, 2)));
    assert!(state.discovered.contains(&Cell::new(9, 7)));
    assert!(!state.discovered.contains(&Cell::new(5, 5)));
}

#[test]
fn test_players_without_telescopes_reveal_nothing() {
    let rules = test_rules();
    let mut state = base_state(&rules);
    for p in &mut state.players {
        p.modules.telescope = None;
    }

    update_discovered(&mut state, &rules);
    assert!(state.discovered.is_empty());
}

#[test]
fn test_discovery_is_monotonic_across_moves() {
    let rules = test_rules();
    let mut state = base_state(&rules);
    update_discovered(&mut state, &rules);
    let mut rng = make_rng();

    let mut seen = state.discovered.clone();
    for dest in [Cell::new(1, 0), Cell::new(2, 0), Cell::new(2, 1)] {
        move_player(&mut state, &rules, dest, &mut rng).unwrap();
        update_discovered(&mut state, &rules);
        assert!(
            seen.iter().all(|c| state.discovered.contains(c)),
            "discovered tiles must never disappear"
        );
        seen = state.discovered.clone();
    }
}

#[test]
fn test_undiscovered_tiles_project_nothing() {
    let rules = test_rules();
    let mut state = base_state(&rules);
    state
        .asteroids
        .push(asteroid(1, Cell::new(5, 5), AsteroidKind::Ice, 100.0, 1.0));
    state.debris.insert(Cell::new(5, 6));

    let info = state.tile_info(Cell::new(5, 5));
    assert!(!info.discovered);
    assert_eq!(info.occupant, Occupant::Empty, "hidden until discovered");
    let info = state.tile_info(Cell::new(5, 6));
    assert!(!info.debris, "debris is hidden under fog too");

    state.discovered.insert(Cell::new(5, 5));
    let info = state.tile_info(Cell::new(5, 5));
    assert_eq!(
        info.occupant,
        Occupant::Asteroid {
            id: AsteroidId(1),
            kind: AsteroidKind::Ice,
            exhausted: false,
            robot_owner: None,
        }
    );
}

#[test]
fn test_tile_info_lists_players_on_discovered_cells() {
    let rules = test_rules();
    let mut state = open_state(&rules);
    state.players[1].pos = Cell::new(0, 0);

    let info = state.tile_info(Cell::new(0, 0));
    assert!(info.discovered);
    assert_eq!(info.players.len(), 2, "both players share the cell");
}
