mod test {
    use crate::core::{GridLoc, LevelController, ObjectKind, ParseError, parse_level};

    #[test]
    fn parses_a_bordered_lattice_with_headroom() {
        let level = r#"
]] ]] ]] ]] ]]
]] ]s ]x ]o ]]
]] ]] ]] ]] ]]
"#;
        let layout = parse_level(level).unwrap();
        // 3 rows and 5 columns of content, plus the border on each side.
        assert_eq!(layout.extent.nz, 5);
        assert_eq!(layout.extent.nx, 7);
        // Tallest column is 2 floors, plus two floors of headroom.
        assert_eq!(layout.extent.ny, 4);

        assert_eq!(layout.gopher_start, GridLoc::new(2, 2, 1));
        assert_eq!(layout.box_starts, vec![GridLoc::new(2, 3, 1)]);
        assert_eq!(layout.pads, vec![GridLoc::new(2, 4, 1)]);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(parse_level("").unwrap_err(), ParseError::EmptyLevel);
        assert_eq!(parse_level("\n\n").unwrap_err(), ParseError::EmptyLevel);
    }

    #[test]
    fn start_cell_is_required() {
        assert_eq!(parse_level("] ]x ]o").unwrap_err(), ParseError::MissingStart);
    }

    #[test]
    fn duplicate_start_is_rejected() {
        let err = parse_level("]s ]s").unwrap_err();
        assert!(matches!(err, ParseError::DuplicateStart { .. }));
    }

    #[test]
    fn shaft_marker_needs_an_elevator_below() {
        let err = parse_level("]s ]-").unwrap_err();
        assert!(matches!(err, ParseError::OrphanShaft { .. }));
    }

    #[test]
    fn elevator_shaft_scan_gives_inclusive_range() {
        let layout = parse_level("]s e--").unwrap();
        assert_eq!(layout.elevators.len(), 1);
        let elev = layout.elevators[0];
        assert_eq!(elev.loc, GridLoc::new(1, 2, 0));
        assert_eq!((elev.low, elev.high), (0, 2));
    }

    #[test]
    fn single_elevator_glyph_has_degenerate_range() {
        let layout = parse_level("]s e").unwrap();
        let elev = layout.elevators[0];
        assert_eq!((elev.low, elev.high), (0, 0));
    }

    #[test]
    fn unrecognized_glyphs_read_as_empty() {
        let layout = parse_level("]s ]?").unwrap();
        let controller = LevelController::new(layout);
        assert_eq!(controller.occupant(&GridLoc::new(1, 2, 1)), None);
        assert!(matches!(
            controller
                .occupant(&GridLoc::new(1, 2, 0))
                .map(|id| controller.object(id).kind),
            Some(ObjectKind::Block)
        ));
    }

    #[test]
    fn exactly_one_gopher_after_construction() {
        let layout = parse_level("]] ]s ]x ]o").unwrap();
        let controller = LevelController::new(layout);
        let gophers = controller
            .objects()
            .iter()
            .filter(|o| matches!(o.kind, ObjectKind::Gopher))
            .count();
        assert_eq!(gophers, 1);
    }

    #[test]
    fn serialization_roundtrips_to_the_same_level() {
        let level = r#"
]] ]] ]]] ]] ]]
]] ]s e-- ]x ]o
]] ]] ]]] ]] ]]
"#;
        let first = parse_level(level).unwrap();
        let reparsed = parse_level(&first.serialize()).unwrap();

        assert_eq!(first.gopher_start, reparsed.gopher_start);
        assert_eq!(first.box_starts, reparsed.box_starts);
        assert_eq!(first.pads, reparsed.pads);
        assert_eq!(first.blocks, reparsed.blocks);
        assert_eq!(first.elevators, reparsed.elevators);
    }

    #[test]
    fn serialization_emits_trimmed_tokens() {
        let layout = parse_level("] ]s ]").unwrap();
        assert_eq!(layout.serialize(), "] ]s ]");
    }
}
