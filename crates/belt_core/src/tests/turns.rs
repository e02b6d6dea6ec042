use super::*;

#[test]
fn test_next_turn_cycles_players_and_counts_rounds() {
    let rules = test_rules();
    let mut state = open_state(&rules);
    assert_eq!(state.active_player, 0);
    assert_eq!(state.meta.turn, 1);

    next_turn(&mut state);
    assert_eq!(state.active_player, 1);
    assert_eq!(state.meta.turn, 1, "round counter waits for the wrap");

    next_turn(&mut state);
    assert_eq!(state.active_player, 0);
    assert_eq!(state.meta.turn, 2, "one increment per full cycle");
}

#[test]
fn test_next_turn_resets_per_turn_module_state_for_everyone() {
    let rules = test_rules();
    let mut state = open_state(&rules);
    for p in &mut state.players {
        p.modules.factory.as_mut().unwrap().robots_produced_this_turn = 1;
        let mut warp = WarpDrive::new(&rules.warp_drive);
        warp.used_this_turn = true;
        p.modules.warp_drive = Some(warp);
    }

    next_turn(&mut state);
    for p in &state.players {
        assert_eq!(p.modules.factory.as_ref().unwrap().robots_produced_this_turn, 0);
        assert!(!p.modules.warp_drive.as_ref().unwrap().used_this_turn);
    }
}

#[test]
fn test_end_turn_mines_then_advances() {
    let rules = test_rules();
    let mut state = open_state(&rules);
    state
        .asteroids
        .push(asteroid(1, Cell::new(5, 5), AsteroidKind::Ice, 500.0, 1.0));
    state.asteroids[0].robot = Some(RobotState {
        owner: PlayerId(0),
        capacity: 10.0,
    });
    let money = state.players[0].money;

    let report = end_turn(&mut state);
    assert!(!report.game_over);
    assert_eq!(report.mining.len(), 1);
    assert_close(state.players[0].money - money, 10.0, "passive income paid");
    assert_eq!(state.active_player, 1, "turn passed on");
}

#[test]
fn test_end_turn_detects_game_over_and_stops_advancing() {
    let rules = test_rules();
    let mut state = open_state(&rules);
    state
        .asteroids
        .push(asteroid(1, Cell::new(5, 5), AsteroidKind::Ice, 0.0, 1.0));

    let report = end_turn(&mut state);
    assert!(report.game_over, "all asteroids exhausted");
    assert!(report.mining.is_empty());
    assert_eq!(state.active_player, 0, "no advance once the game is over");
    assert!(is_game_over(&state));
}

#[test]
fn test_game_over_requires_every_asteroid_exhausted() {
    let rules = test_rules();
    let mut state = open_state(&rules);
    state
        .asteroids
        .push(asteroid(1, Cell::new(5, 5), AsteroidKind::Ice, 0.0, 1.0));
    state
        .asteroids
        .push(asteroid(2, Cell::new(6, 5), AsteroidKind::Ice, 1.0, 1.0));
    assert!(!is_game_over(&state));

    state.asteroids[1].resource = 0.0;
    assert!(is_game_over(&state));
}

#[test]
fn test_robot_earnings_window_resets_when_the_owner_comes_back_around() {
    let rules = test_rules();
    let mut state = open_state(&rules);
    state
        .asteroids
        .push(asteroid(1, Cell::new(5, 5), AsteroidKind::Ice, 500.0, 1.0));
    state.asteroids[0].robot = Some(RobotState {
        owner: PlayerId(0),
        capacity: 10.0,
    });

    // Player 0 ends their turn: robot pays, window keeps accumulating.
    end_turn(&mut state);
    assert_close(state.players[0].robot_earnings_this_turn, 10.0, "first payout");

    // Player 1 ends theirs: another payout lands in player 0's window,
    // then the wrap back to player 0 resets it.
    end_turn(&mut state);
    assert_eq!(state.active_player, 0);
    assert_close(
        state.players[0].robot_earnings_this_turn,
        0.0,
        "window restarts with the owner's new turn",
    );
}
