mod test {
    use crate::core::Direction::*;
    use crate::core::{GameEvent, GridLoc, SoundCue, StepOutcome};
    use crate::test::test_util::{LevelTestState, TICK};

    #[test]
    fn walks_left_and_back() {
        let mut state = LevelTestState::new("] ]s ]");

        state.assert_steps(&[Left, Right]);

        assert_eq!(state.gopher_loc(), GridLoc::new(1, 2, 1));
        assert_eq!(state.controller.steps(), 2);
        let sounds = state.drain_sounds();
        assert_eq!(
            sounds.iter().filter(|&&c| c == SoundCue::Walk).count(),
            2
        );
        assert!(!sounds.contains(&SoundCue::Bump));
    }

    #[test]
    fn bumps_into_a_wall() {
        let mut state = LevelTestState::new("]s ]]");

        let outcome = state.controller.step(Right);

        assert_eq!(outcome, StepOutcome::Bumped);
        assert!(!state.controller.has_pending_animations());
        assert_eq!(state.gopher_loc(), GridLoc::new(1, 1, 1));
        assert_eq!(state.controller.steps(), 0);
        assert!(state.drain_sounds().contains(&SoundCue::Bump));
    }

    #[test]
    fn input_is_ignored_mid_animation() {
        let mut state = LevelTestState::new("] ]s ]");

        assert_eq!(state.controller.step(Left), StepOutcome::Stepped);
        assert!(state.controller.is_animating());
        assert_eq!(state.controller.step(Right), StepOutcome::Ignored);
        state.settle();

        assert_eq!(state.gopher_loc(), GridLoc::new(1, 1, 1));
        assert_eq!(state.controller.steps(), 1);
    }

    #[test]
    fn stepping_off_a_ledge_falls_one_floor() {
        let mut state = LevelTestState::new("]]s ]");

        state.assert_step(Right);

        assert_eq!(state.gopher_loc(), GridLoc::new(1, 2, 1));
        let sounds = state.drain_sounds();
        assert!(sounds.contains(&SoundCue::GopherFallStart));
        assert!(sounds.contains(&SoundCue::GopherFallEnd));
        assert!(!sounds.contains(&SoundCue::Walk));
    }

    #[test]
    fn walking_into_the_void_restarts_the_level() {
        let mut state = LevelTestState::new("]s ..");

        state.controller.step(Right);
        // Two ticks finish the horizontal move and start the fatal fall.
        state.controller.update(TICK);
        state.controller.update(TICK);
        assert!(state.controller.is_locked());
        assert_eq!(state.controller.step(Left), StepOutcome::Ignored);
        state.settle();

        // Auto restart after the ejection animation resolves.
        assert_eq!(state.gopher_loc(), GridLoc::new(1, 1, 1));
        assert_eq!(state.controller.steps(), 0);
        assert!(!state.controller.is_locked());

        let events = state.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::LevelRestarted)));
        let sounds = crate::test::test_util::sounds_of(&events);
        assert!(sounds.contains(&SoundCue::LevelFail));
        assert!(sounds.contains(&SoundCue::LevelRestart));
    }

    #[test]
    fn top_view_tracks_the_gopher() {
        let mut state = LevelTestState::new("]] ]s ]. ]]");
        state.assert_step(Right);

        // Border ring renders blank; the gopher sits above the third wall.
        state.assert_matches(" ]]@]");
    }
}
