use approx::assert_relative_eq;
use forstner_image::{Image, ImageError, ImageSize};
use forstner_imgproc::{
    features::{ForstnerConfig, ForstnerDetector, ForstnerOutput, MARKER_COLOR},
    filter::GradientBorder,
};

fn gray_from_fn(size: ImageSize, f: impl Fn(usize, usize) -> u8) -> Image<u8, 1> {
    let data = (0..size.height)
        .flat_map(|y| (0..size.width).map(move |x| (x, y)))
        .map(|(x, y)| f(x, y))
        .collect();
    // the data length always matches the size
    Image::new(size, data).unwrap()
}

fn detect(
    gray: &Image<u8, 1>,
    config: ForstnerConfig,
) -> Result<ForstnerOutput, ImageError> {
    ForstnerDetector::new(config)?.detect_gray(gray)
}

fn at(img: &Image<f64, 1>, x: usize, y: usize) -> f64 {
    img.as_slice()[y * img.cols() + x]
}

fn center_dot() -> Image<u8, 1> {
    gray_from_fn([5, 5].into(), |x, y| if (x, y) == (2, 2) { 255 } else { 0 })
}

#[test]
fn center_dot_scores() -> Result<(), ImageError> {
    let output = detect(&center_dot(), ForstnerConfig::new().with_window_size(3))?;

    assert_relative_eq!(at(&output.response, 2, 2), 390150.0, max_relative = 1e-12);
    assert_relative_eq!(at(&output.roundness, 2, 2), 1.0, max_relative = 1e-12);

    for (x, y) in [(1, 1), (3, 1), (1, 3), (3, 3)] {
        assert_relative_eq!(at(&output.response, x, y), 156060.0, max_relative = 1e-12);
        assert_relative_eq!(at(&output.roundness, x, y), 0.96, max_relative = 1e-12);
    }

    for (x, y) in [(2, 1), (1, 2), (3, 2), (2, 3)] {
        assert_relative_eq!(at(&output.response, x, y), 243843.75, max_relative = 1e-12);
        assert_relative_eq!(at(&output.roundness, x, y), 0.9375, max_relative = 1e-12);
    }

    // default thresholds: every interior pixel passes
    assert_eq!(output.corners.len(), 9);

    Ok(())
}

#[test]
fn quadrant_corner() -> Result<(), ImageError> {
    let gray = gray_from_fn([21, 21].into(), |x, y| {
        if x >= 10 && y >= 10 {
            200
        } else {
            0
        }
    });
    let output = detect(&gray, ForstnerConfig::new().with_window_size(3))?;

    let (best, _) = output
        .response
        .as_slice()
        .iter()
        .enumerate()
        .fold((0, f64::MIN), |acc, (idx, &v)| if v > acc.1 { (idx, v) } else { acc });
    assert_eq!((best % 21, best / 21), (10, 10));
    assert_relative_eq!(
        at(&output.response, 10, 10),
        12_240_000.0 / 13.0,
        max_relative = 1e-12
    );

    // straight edges away from the corner have no response
    for (x, y) in [(10, 15), (15, 10)] {
        assert_eq!(at(&output.response, x, y), 0.0);
        assert_eq!(at(&output.roundness, x, y), 0.0);
    }

    Ok(())
}

#[test]
fn rotation_symmetry() -> Result<(), ImageError> {
    let n = 9;
    let pattern = |x: usize, y: usize| ((x * 37 + y * y * 11 + x * y * 5) % 200) as u8;
    let gray = gray_from_fn([n, n].into(), pattern);
    let rotated = gray_from_fn([n, n].into(), |x, y| pattern(y, n - 1 - x));

    // the intensity border feeds the same value to dx and dy, which does not rotate
    for border in [GradientBorder::Zero, GradientBorder::Replicate] {
        let config = ForstnerConfig::new().with_window_size(3).with_border(border);
        let a = detect(&gray, config)?;
        let b = detect(&rotated, config)?;

        for y in 0..n {
            for x in 0..n {
                let (sx, sy) = (y, n - 1 - x);
                assert_relative_eq!(
                    at(&b.response, x, y),
                    at(&a.response, sx, sy),
                    epsilon = 1e-6,
                    max_relative = 1e-9
                );
                assert_relative_eq!(
                    at(&b.roundness, x, y),
                    at(&a.roundness, sx, sy),
                    epsilon = 1e-9,
                    max_relative = 1e-9
                );
            }
        }
    }

    Ok(())
}

#[test]
fn constant_image_has_no_corners() -> Result<(), ImageError> {
    for border in [GradientBorder::Intensity, GradientBorder::Zero, GradientBorder::Replicate] {
        let gray = Image::from_size_val([16, 12].into(), 97u8)?;
        let output = detect(&gray, ForstnerConfig::new().with_border(border))?;

        assert!(output.corners.is_empty());
        assert!(output.marked.as_slice().iter().all(|&v| v == 97));
    }

    Ok(())
}

#[test]
fn border_policies() -> Result<(), ImageError> {
    let gray = gray_from_fn([6, 6].into(), |x, y| (10 * x + 3 * y * y) as u8);

    #[rustfmt::skip]
    let expected = [
        (GradientBorder::Intensity, 1214.393144596164, 0.09725648857535449),
        (GradientBorder::Zero,      1212.6315789473683, 0.09972299168975068),
        (GradientBorder::Replicate, 6883.241252302026, 0.35211997402813716),
    ];

    for (border, response, roundness) in expected {
        let config = ForstnerConfig::new().with_window_size(3).with_border(border);
        let output = detect(&gray, config)?;

        // the window around (1, 1) reaches the image border
        assert_relative_eq!(at(&output.response, 1, 1), response, max_relative = 1e-9);
        assert_relative_eq!(at(&output.roundness, 1, 1), roundness, max_relative = 1e-9);

        // the window around (2, 2) does not
        assert_relative_eq!(
            at(&output.response, 2, 2),
            5158.20895522388,
            max_relative = 1e-9
        );
    }

    Ok(())
}

#[test]
fn stricter_thresholds_mark_fewer_points() -> Result<(), ImageError> {
    let gray = gray_from_fn([24, 24].into(), |x, y| {
        if (x / 6 + y / 6) % 2 == 0 {
            180
        } else {
            20
        }
    });

    let mut previous = usize::MAX;
    for response_threshold in [0.0, 800.0, 1e4, 1e5, 1e6, 1e8] {
        let config = ForstnerConfig::new().with_response_threshold(response_threshold);
        let count = detect(&gray, config)?.corners.len();
        assert!(count <= previous);
        previous = count;
    }
    assert_eq!(previous, 0);

    let mut previous = usize::MAX;
    for roundness_threshold in [0.0, 0.25, 0.5, 0.75, 1.0] {
        let config = ForstnerConfig::new().with_roundness_threshold(roundness_threshold);
        let count = detect(&gray, config)?.corners.len();
        assert!(count <= previous);
        previous = count;
    }

    Ok(())
}

#[test]
fn border_is_never_marked() -> Result<(), ImageError> {
    let gray = gray_from_fn([11, 9].into(), |x, y| ((x * 53 + y * 97) % 256) as u8);
    let config = ForstnerConfig::new()
        .with_window_size(5)
        .with_response_threshold(f64::MIN)
        .with_roundness_threshold(f64::MIN);
    let output = detect(&gray, config)?;

    // every pixel of the 7x5 interior is marked
    assert_eq!(output.corners.len(), 7 * 5);
    for y in 0..9 {
        for x in 0..11 {
            let interior = (2..9).contains(&x) && (2..7).contains(&y);
            let pixel = &output.marked.as_slice()[(y * 11 + x) * 3..][..3];
            if interior {
                assert_eq!(pixel, &MARKER_COLOR);
            } else {
                let v = output.gray.as_slice()[y * 11 + x];
                assert_eq!(pixel, &[v, v, v]);
            }
        }
    }

    Ok(())
}

#[test]
fn window_larger_than_image() -> Result<(), ImageError> {
    let output = detect(&center_dot(), ForstnerConfig::new().with_window_size(7))?;

    assert!(output.response.as_slice().iter().all(|&v| v == 0.0));
    assert!(output.corners.is_empty());

    Ok(())
}

#[test]
fn too_small_input() -> Result<(), ImageError> {
    let detector = ForstnerDetector::new(ForstnerConfig::default())?;

    for (width, height) in [(2, 2), (3, 2), (1, 10)] {
        let gray = Image::from_size_val([width, height].into(), 0u8)?;
        assert_eq!(
            detector.detect_gray(&gray).err(),
            Some(ImageError::ImageTooSmall(width, height, 3, 3))
        );
    }

    Ok(())
}

#[test]
fn rgb_input_matches_gray_input() -> Result<(), ImageError> {
    let size = [8, 7].into();
    let gray = gray_from_fn(size, |x, y| ((x * 31 + y * 17) % 256) as u8);
    let rgb = Image::<u8, 3>::new(
        size,
        gray.as_slice().iter().flat_map(|&v| [v, v, v]).collect(),
    )?;

    let detector = ForstnerDetector::new(ForstnerConfig::new().with_window_size(3))?;
    let from_rgb = detector.detect(&rgb)?;
    let from_gray = detector.detect_gray(&gray)?;

    assert_eq!(from_rgb.gray, from_gray.gray);
    assert_eq!(from_rgb.response, from_gray.response);
    assert_eq!(from_rgb.corners, from_gray.corners);

    Ok(())
}
