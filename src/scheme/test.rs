use super::*;

lazy_static! {
    static ref SCHEME_16B: IndexScheme = compute_scheme(
        &Geometry::new(16, 2, 0, 0, 32),
        &OFFSETS_16B_LO,
        &OFFSETS_16B_HI
    );
}

#[test]
fn scheme_16b_matches_fixture() {
    assert_eq!(SCHEME_16B.num_rows(), 16);
    assert_eq!(SCHEME_16B.row(0), &[0, 1]);
    assert_eq!(SCHEME_16B.row(1), &[16, 17]);
    assert_eq!(SCHEME_16B.row(2), &[2, 3]);
    assert_eq!(SCHEME_16B.row(3), &[18, 19]);
    // Rows from 8 onwards use the high offsets
    assert_eq!(SCHEME_16B.row(8), &[8, 9]);
    assert_eq!(SCHEME_16B.row(9), &[24, 25]);
    assert_eq!(SCHEME_16B.row(15), &[30, 31]);
}

#[test]
fn scheme_16b_is_a_permutation_of_the_buffer() {
    let mut sorted = SCHEME_16B.values().to_vec();
    sorted.sort();
    assert_eq!(sorted, (0..32).collect::<Vec<usize>>());
}

#[test]
fn compute_scheme_stays_within_buffer() {
    for &buffer_size in &[1, 7, 16, 32, 64] {
        for &step in &[0, 1, 3, 16] {
            for &start in &[0, 5, 31, 100] {
                let geom = Geometry::new(16, 8, start, step, buffer_size);
                let scheme = compute_scheme(&geom, &OFFSETS_16B_LO, &OFFSETS_16B_HI);
                assert_eq!(scheme.values().len(), geom.num_elems());
                assert!(scheme.values().iter().all(|&v| v < buffer_size));
            }
        }
    }
}

#[test]
fn compute_scheme_wraps_start() {
    let geom = Geometry::new(2, 2, 31, 0, 32);
    let scheme = compute_scheme(&geom, &OFFSETS_16B_LO, &OFFSETS_16B_HI);
    assert_eq!(scheme.to_rows(), vec![vec![31, 0], vec![15, 16]]);
}

#[test]
fn general_scheme_matches_fixture() {
    let geom = Geometry::new(4, 2, 0, 16, 16);
    let scheme = general_scheme(&geom, &OFFSETS_32B);
    assert_eq!(
        scheme.to_rows(),
        vec![vec![0, 16], vec![1, 17], vec![2, 18], vec![3, 19]]
    );
}

#[test]
fn general_scheme_does_not_wrap() {
    let geom = Geometry::new(4, 3, 10, 16, 16);
    let scheme = general_scheme(&geom, &OFFSETS_32B);
    assert_eq!(scheme.row(3), &[13, 29, 45]);
}

#[test]
fn data_scheme_8x8_groups_rows_by_four() {
    let geom = Preset::Data8x8.geometry();
    assert_eq!(geom.cols(), 16);

    let scheme = data_scheme_8x8(&geom, &OFFSETS_8X8);
    assert_eq!(&scheme.row(0)[..4], &[0, 2, 16, 18]);
    assert_eq!(&scheme.row(1)[..4], &[1, 3, 17, 19]);
    assert_eq!(&scheme.row(2)[..4], &[4, 6, 20, 22]);
    assert_eq!(&scheme.row(3)[..4], &[5, 7, 21, 23]);
    assert_eq!(scheme.row(2)[15], 118);
    // Rows 4..8 repeat rows 0..4 with an all-zero offset table
    assert_eq!(scheme.row(4), scheme.row(0));
    assert_eq!(scheme.row(7), scheme.row(3));
}

#[test]
fn data_scheme_8x8_uses_offset_pairs() {
    let geom = Geometry::new(4, 2, 0, 16, 128);
    let scheme = data_scheme_8x8(&geom, &[1, 2]);
    // Row 2 and 3 sit past the block of the preceding entry
    assert_eq!(scheme.to_rows(), vec![vec![4, 6], vec![5, 7], vec![16, 18], vec![17, 19]]);
}

#[test]
fn data_scheme_8x8_wraps_by_buffer_size() {
    let geom = Geometry::new(8, 16, 0, 16, 64);
    let scheme = data_scheme_8x8(&geom, &OFFSETS_8X8);
    assert!(scheme.values().iter().all(|&v| v < 64));
    assert_eq!(scheme.row(0)[8], 0);
}

#[test]
fn data_8x8_cols_halve_with_multiplier() {
    assert_eq!(data_8x8_cols(1, 8), 16);
    assert_eq!(data_8x8_cols(2, 8), 8);
    assert_eq!(data_8x8_cols(4, 4), 8);
}

#[test]
fn presets_reproduce_fixtures() {
    let scheme = Preset::Int16Pair
        .compute(&Preset::Int16Pair.geometry())
        .unwrap();
    assert_eq!(&scheme, &*SCHEME_16B);

    let general = Preset::General32
        .compute(&Preset::General32.geometry())
        .unwrap();
    assert_eq!(general.row(3), &[3, 19]);
}

#[test]
fn presets_reject_rows_beyond_offset_tables() {
    let geom = Geometry::new(9, 2, 0, 16, 16);
    assert!(Preset::General32.compute(&geom).is_err());
    assert!(Preset::Int16Pair.compute(&geom).is_ok());
    assert!(Preset::Int16Pair
        .compute(&Geometry::new(4, 2, 0, 0, 0))
        .is_err());
}

#[test]
fn presets_parse_by_name() {
    assert_eq!("8x8".parse::<Preset>().unwrap(), Preset::Data8x8);
    assert_eq!("16bx16b".parse::<Preset>().unwrap(), Preset::Int16Pair);
    assert!("4x4".parse::<Preset>().is_err());
}

#[test]
fn schemes_print_one_row_per_line() {
    let geom = Geometry::new(2, 2, 0, 16, 16);
    let scheme = general_scheme(&geom, &OFFSETS_32B);
    assert_eq!(scheme.to_string(), "[0, 16]\n[1, 17]\n");
    assert_eq!(scheme.to_table(3), "  0  16 \n  1  17 \n");
}

#[test]
fn int16_preset_cycles_high_offsets_past_16_rows() {
    let geom = Geometry::new(24, 2, 0, 0, 32);
    let scheme = Preset::Int16Pair.compute(&geom).unwrap();
    assert_eq!(scheme.num_rows(), 24);
    assert_eq!(scheme.row(16), SCHEME_16B.row(8));
    assert_eq!(scheme.row(23), SCHEME_16B.row(15));
    assert_eq!(Preset::Int16Pair.max_rows(), None);
    assert_eq!(Preset::Data8x8.max_rows(), Some(8));
}

#[test]
fn presets_reject_overflowing_start_and_step() {
    let huge_start = Geometry::new(2, 2, usize::max_value() - 4, 0, 32);
    match Preset::Int16Pair.compute(&huge_start) {
        Err(Error::Geometry(msg)) => assert!(msg.contains("overflow")),
        other => panic!("unexpected {:?}", other),
    }
    let huge_step = Geometry::new(2, 3, 0, usize::max_value(), 16);
    assert!(Preset::General32.compute(&huge_step).is_err());
    assert!(Preset::Data8x8.compute(&huge_step).is_err());

    // The largest start that still fits is accepted
    let edge = Geometry::new(1, 1, usize::max_value() - 3, 0, 32);
    assert!(Preset::General32.compute(&edge).is_ok());
}

#[test]
fn presets_compute_over_wide_rows() {
    for &preset in &[Preset::Int16Pair, Preset::General32, Preset::Data8x8] {
        let defaults = preset.geometry();
        for &cols in &[2, 8, 16] {
            let geom = Geometry::new(
                defaults.rows(),
                cols,
                defaults.start(),
                defaults.step(),
                defaults.buffer_size(),
            );
            let scheme = preset.compute(&geom).unwrap();
            assert_eq!(scheme.values().len(), defaults.rows() * cols);
        }
    }
    // Rows past the offset table are an error, not an out of bounds read
    assert!(Preset::General32
        .compute(&Geometry::new(16, 16, 0, 16, 128))
        .is_err());
    assert!(Preset::Data8x8
        .compute(&Geometry::new(16, 16, 0, 16, 128))
        .is_err());
}
