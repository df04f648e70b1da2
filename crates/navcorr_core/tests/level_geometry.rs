use navcorr_core::{geometry_for, CorePresentation, FontConvention, Level};

const FONTS: [FontConvention; 2] = [FontConvention::Proportional, FontConvention::FixedWidth];

#[test]
fn offsets_increase_with_level() {
    for font in FONTS {
        let geometries: Vec<_> = Level::all().map(|level| geometry_for(level, font)).collect();
        for pair in geometries.windows(2) {
            assert!(pair[0].citation_offset < pair[1].citation_offset, "{font:?}");
            assert!(pair[0].text_offset < pair[1].text_offset, "{font:?}");
        }
    }
}

#[test]
fn child_citation_aligns_under_parent_text() {
    for font in FONTS {
        let geometries: Vec<_> = Level::all().map(|level| geometry_for(level, font)).collect();
        for pair in geometries.windows(2) {
            assert_eq!(pair[0].text_offset, pair[1].citation_offset, "{font:?}");
        }
    }
}

#[test]
fn hanging_indent_is_text_minus_citation() {
    for font in FONTS {
        for level in Level::all() {
            let geometry = geometry_for(level, font);
            assert_eq!(
                geometry.hanging_indent,
                geometry.text_offset - geometry.citation_offset
            );
            assert!(geometry.hanging_indent > 0);
        }
    }
}

#[test]
fn decoration_switches_at_level_five() {
    for level in Level::all() {
        let geometry = geometry_for(level, FontConvention::Proportional);
        let expected = if level.get() >= 5 {
            CorePresentation::Underline
        } else {
            CorePresentation::Plain
        };
        assert_eq!(geometry.decoration, expected);
    }
}

#[test]
fn fixed_width_columns_match_citation_widths() {
    let columns: Vec<(u32, u32)> = Level::all()
        .map(|level| geometry_for(level, FontConvention::FixedWidth))
        .map(|geometry| (geometry.citation_offset, geometry.text_offset))
        .collect();
    assert_eq!(
        columns,
        vec![
            (0, 4),
            (4, 8),
            (8, 13),
            (13, 18),
            (18, 22),
            (22, 26),
            (26, 31),
            (31, 36),
        ]
    );
}
