use trackscan::{BandRegion, CropRect, Surface, TrackScanError};

#[test]
fn surface_rejects_invalid_dimensions() {
    let err = Surface::new(Vec::new(), 0, 1).err().unwrap();
    assert_eq!(
        err,
        TrackScanError::InvalidDimensions {
            width: 0,
            height: 1,
        }
    );

    let err = Surface::filled(3, 0, [0, 0, 0, 255]).err().unwrap();
    assert_eq!(
        err,
        TrackScanError::InvalidDimensions {
            width: 3,
            height: 0,
        }
    );
}

#[test]
fn surface_rejects_wrong_buffer_length() {
    let err = Surface::new(vec![0u8; 15], 2, 2).err().unwrap();
    assert_eq!(err, TrackScanError::BufferSizeMismatch { needed: 16, got: 15 });

    let err = Surface::new(vec![0u8; 17], 2, 2).err().unwrap();
    assert_eq!(err, TrackScanError::BufferSizeMismatch { needed: 16, got: 17 });

    let err = Surface::from_gray(&[0u8; 5], 2, 2).err().unwrap();
    assert_eq!(err, TrackScanError::BufferSizeMismatch { needed: 4, got: 5 });
}

#[test]
fn surface_accessors_read_rgba() {
    let data: Vec<u8> = (0u8..24).collect();
    let surface = Surface::new(data.clone(), 3, 2).unwrap();
    assert_eq!(surface.width(), 3);
    assert_eq!(surface.height(), 2);
    assert_eq!(surface.data(), data.as_slice());
    assert_eq!(surface.pixel(1, 1), Some([16, 17, 18, 19]));
    assert_eq!(surface.pixel(3, 0), None);
    assert_eq!(surface.row(1).unwrap(), &data[12..24]);
    assert!(surface.row(2).is_none());
}

#[test]
fn gray_surface_is_opaque() {
    let surface = Surface::from_gray(&[7, 200], 2, 1).unwrap();
    assert_eq!(surface.data(), &[7, 7, 7, 255, 200, 200, 200, 255]);
    let lum = surface.luminance_plane();
    assert!((lum[0] - 7.0).abs() < 1e-3);
    assert!((lum[1] - 200.0).abs() < 1e-3);
}

#[test]
fn crop_rect_copies_the_rectangle() {
    let gray: Vec<u8> = (0u8..16).collect();
    let surface = Surface::from_gray(&gray, 4, 4).unwrap();
    let crop = surface
        .crop_rect(CropRect {
            x: 1,
            y: 1,
            width: 2,
            height: 2,
        })
        .unwrap();
    let values: Vec<u8> = crop.data().chunks_exact(4).map(|px| px[0]).collect();
    assert_eq!(values, vec![5, 6, 9, 10]);
}

#[test]
fn crop_rect_rejects_out_of_bounds() {
    let surface = Surface::filled(4, 4, [0, 0, 0, 255]).unwrap();
    let err = surface
        .crop_rect(CropRect {
            x: 3,
            y: 3,
            width: 2,
            height: 2,
        })
        .err()
        .unwrap();
    assert_eq!(
        err,
        TrackScanError::RegionOutOfBounds {
            x: 3,
            y: 3,
            width: 2,
            height: 2,
            img_width: 4,
            img_height: 4,
        }
    );
}

#[test]
fn band_region_from_fractions_stays_inside() {
    let region = BandRegion::from_fractions(200, 0.25, 0.5).unwrap();
    assert_eq!(
        region,
        BandRegion {
            y_start: 50,
            height: 100,
        }
    );
    assert_eq!(region.y_end(), 150);
    assert!(BandRegion::from_fractions(200, 1.0, 0.1).is_err());
    assert!(BandRegion::from_fractions(200, 0.1, 0.0).is_err());
}
