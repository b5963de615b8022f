mod test {
    use crate::core::Direction::*;
    use crate::core::{GameEvent, GridLoc, ObjectKind, SoundCue};
    use crate::test::test_util::LevelTestState;

    fn elevator_floor(state: &LevelTestState) -> i32 {
        let id = state.controller.elevator_ids()[0];
        state.controller.object(id).loc.y
    }

    #[test]
    fn boarding_rides_the_elevator_to_the_top() {
        // The gopher falls onto the waiting elevator and rides its full range.
        let mut state = LevelTestState::new("]]s e--");

        state.assert_step(Right);

        assert_eq!(state.gopher_loc(), GridLoc::new(1, 2, 3));
        assert_eq!(elevator_floor(&state), 2);
        assert!(!state.controller.is_animating());

        let events = state.drain_events();
        let sounds = crate::test::test_util::sounds_of(&events);
        assert!(sounds.contains(&SoundCue::ElevatorUp));
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::StopSound {
                cue: SoundCue::ElevatorUp
            }
        )));
    }

    #[test]
    fn elevator_lowers_after_the_passenger_leaves() {
        let mut state = LevelTestState::new("]]s e--");
        state.assert_step(Right);
        state.drain_events();

        state.assert_step(Left);

        assert_eq!(state.gopher_loc(), GridLoc::new(1, 1, 2));
        assert_eq!(elevator_floor(&state), 0);
        let events = state.drain_events();
        let sounds = crate::test::test_util::sounds_of(&events);
        assert!(sounds.contains(&SoundCue::ElevatorDown));
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::StopSound {
                cue: SoundCue::ElevatorDown
            }
        )));
    }

    #[test]
    fn degenerate_range_never_moves() {
        let mut state = LevelTestState::new("]]s e");

        state.assert_step(Right);

        assert_eq!(state.gopher_loc(), GridLoc::new(1, 2, 1));
        assert_eq!(elevator_floor(&state), 0);
        assert!(!state.drain_sounds().contains(&SoundCue::ElevatorUp));
    }

    #[test]
    fn ascent_stops_below_an_obstruction() {
        let mut state = LevelTestState::new("]]s e--]");

        state.assert_step(Right);

        // Range allows two floors, the ceiling block allows one.
        assert_eq!(state.gopher_loc(), GridLoc::new(1, 2, 2));
        assert_eq!(elevator_floor(&state), 1);
        assert_eq!(
            state.occupant_kind(GridLoc::new(1, 2, 3)),
            Some(ObjectKind::Block)
        );
    }

    #[test]
    fn a_pushed_box_rides_the_elevator() {
        // Boxes are cargo too: pushed off the ledge, onto the elevator, up.
        let mut state = LevelTestState::new("]]s ]]x e--");

        state.assert_step(Right);

        assert_eq!(elevator_floor(&state), 2);
        assert_eq!(state.gopher_loc(), GridLoc::new(1, 2, 2));
        assert_eq!(
            state.occupant_kind(GridLoc::new(1, 3, 3)),
            Some(ObjectKind::Box)
        );
        let sounds = state.drain_sounds();
        assert!(sounds.contains(&SoundCue::BoxFallEnd));
        assert!(sounds.contains(&SoundCue::ElevatorUp));
    }
}
