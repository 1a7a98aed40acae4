use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use trackscan::lowlevel::{
    band_crop, contrast_stretch, crop_band, global_threshold, invert, rotate, scale, sharpen,
    vertical_edge_enhance_unscaled,
};
use trackscan::{BandRegion, Rotation, Surface};

fn random_surface(rng: &mut StdRng, width: usize, height: usize) -> Surface {
    let data: Vec<u8> = (0..width * height * 4).map(|_| rng.random()).collect();
    Surface::new(data, width, height).unwrap()
}

fn red_channel(surface: &Surface) -> Vec<u8> {
    surface.data().chunks_exact(4).map(|px| px[0]).collect()
}

#[test]
fn double_invert_restores_rgb() {
    let mut rng = StdRng::seed_from_u64(7);
    for &(w, h) in &[(1, 1), (13, 7), (64, 33)] {
        let surface = random_surface(&mut rng, w, h);
        let twice = invert(&invert(&surface));
        assert_eq!(twice, surface);
    }
}

#[test]
fn invert_keeps_alpha() {
    let surface = Surface::new(vec![10, 20, 30, 40], 1, 1).unwrap();
    assert_eq!(invert(&surface).data(), &[245, 235, 225, 40]);
}

#[test]
fn scale_truncates_dimensions() {
    let surface = Surface::filled(10, 7, [1, 2, 3, 255]).unwrap();
    let out = scale(&surface, 1.5).unwrap();
    assert_eq!((out.width(), out.height()), (15, 10));
    assert!(out
        .data()
        .chunks_exact(4)
        .all(|px| px == [1, 2, 3, 255]));
}

#[test]
fn unit_scale_is_an_exact_copy() {
    let mut rng = StdRng::seed_from_u64(11);
    let surface = random_surface(&mut rng, 9, 5);
    assert_eq!(scale(&surface, 1.0).unwrap(), surface);
}

#[test]
fn scale_rejects_bad_factors() {
    let surface = Surface::filled(4, 4, [0, 0, 0, 255]).unwrap();
    assert!(scale(&surface, 0.0).is_err());
    assert!(scale(&surface, -2.0).is_err());
    assert!(scale(&surface, f32::NAN).is_err());
}

#[test]
fn upscale_by_two_preserves_hard_bars_in_the_middle() {
    let gray: Vec<u8> = (0..8).map(|x| if x < 4 { 0 } else { 255 }).collect();
    let surface = Surface::from_gray(&gray, 8, 1).unwrap();
    let out = scale(&surface, 2.0).unwrap();
    assert_eq!((out.width(), out.height()), (16, 2));
    let values = red_channel(&out);
    let (row, second) = values.split_at(16);
    assert_eq!(row, second);
    assert_eq!(&row[..6], &[0, 0, 0, 0, 0, 0]);
    assert_eq!(&row[10..], &[255, 255, 255, 255, 255, 255]);
}

#[test]
fn global_threshold_140_splits_mid_grays() {
    let surface = Surface::from_gray(&[100, 139, 141, 220], 4, 1).unwrap();
    let out = global_threshold(&surface, 140);
    assert_eq!(red_channel(&out), vec![0, 0, 255, 255]);
    assert!(out.data().chunks_exact(4).all(|px| px[0] == px[1] && px[1] == px[2]));
}

#[test]
fn vertical_edges_mark_bar_boundaries() {
    let width = 9;
    let height = 5;
    let gray: Vec<u8> = (0..width * height)
        .map(|i| if i % width < 4 { 0 } else { 255 })
        .collect();
    let surface = Surface::from_gray(&gray, width, height).unwrap();
    let out = vertical_edge_enhance_unscaled(&surface);
    let values = red_channel(&out);
    for y in 0..height {
        for x in 0..width {
            let expected = if (1..height - 1).contains(&y) && (x == 3 || x == 4) {
                255
            } else {
                0
            };
            assert_eq!(values[y * width + x], expected, "x={x} y={y}");
        }
    }
}

#[test]
fn vertical_edges_ignore_horizontal_stripes() {
    let width = 6;
    let height = 6;
    let gray: Vec<u8> = (0..width * height)
        .map(|i| if (i / width) % 2 == 0 { 0 } else { 255 })
        .collect();
    let surface = Surface::from_gray(&gray, width, height).unwrap();
    let out = vertical_edge_enhance_unscaled(&surface);
    assert!(red_channel(&out).iter().all(|&v| v == 0));
}

#[test]
fn sharpen_leaves_flat_surfaces_alone() {
    let surface = Surface::filled(5, 5, [90, 100, 110, 200]).unwrap();
    assert_eq!(sharpen(&surface), surface);
}

#[test]
fn sharpen_boosts_an_isolated_dot() {
    let mut gray = vec![100u8; 9];
    gray[4] = 120;
    let surface = Surface::from_gray(&gray, 3, 3).unwrap();
    let out = sharpen(&surface);
    let values = red_channel(&out);
    assert_eq!(values[4], 200);
    assert_eq!(values[0], 100);
}

#[test]
fn contrast_stretch_spans_full_range() {
    let surface = Surface::from_gray(&[50, 100, 150], 3, 1).unwrap();
    let out = contrast_stretch(&surface);
    assert_eq!(red_channel(&out), vec![0, 128, 255]);

    let flat = Surface::from_gray(&[77, 77], 2, 1).unwrap();
    assert_eq!(red_channel(&contrast_stretch(&flat)), vec![77, 77]);
}

#[test]
fn rotations_swap_dimensions_and_compose() {
    let mut rng = StdRng::seed_from_u64(3);
    let surface = random_surface(&mut rng, 7, 4);
    let quarter = rotate(&surface, Rotation::Deg90);
    assert_eq!((quarter.width(), quarter.height()), (4, 7));
    let three_quarters = rotate(&surface, Rotation::Deg270);
    assert_eq!(rotate(&quarter, Rotation::Deg180), three_quarters);
    let half = rotate(&surface, Rotation::Deg180);
    assert_eq!(rotate(&half, Rotation::Deg180), surface);
}

#[test]
fn crop_band_cuts_full_width_rows_and_scales() {
    let gray: Vec<u8> = (0..40).map(|i| (i / 4) as u8).collect();
    let surface = Surface::from_gray(&gray, 4, 10).unwrap();
    let region = BandRegion {
        y_start: 2,
        height: 3,
    };
    let out = crop_band(&surface, region, 1.0).unwrap();
    assert_eq!((out.width(), out.height()), (4, 3));
    assert_eq!(red_channel(&out), vec![2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4]);

    let upscaled = crop_band(&surface, region, 2.0).unwrap();
    assert_eq!((upscaled.width(), upscaled.height()), (8, 6));

    let outside = BandRegion {
        y_start: 8,
        height: 3,
    };
    assert!(crop_band(&surface, outside, 1.0).is_err());
}

#[test]
fn band_crop_isolates_the_striped_rows() {
    let width = 40;
    let height = 100;
    let surface = Surface::from_fn(width, height, |x, y| {
        let v = if (60..80).contains(&y) && x % 2 == 0 { 0 } else { 255 };
        [v, v, v, 255]
    })
    .unwrap();
    let out = band_crop(&surface, 0.2, 1.0).unwrap();
    assert_eq!((out.width(), out.height()), (40, 20));
    let row = out.row(0).unwrap();
    assert_eq!(&row[..8], &[0, 0, 0, 255, 255, 255, 255, 255]);
}
