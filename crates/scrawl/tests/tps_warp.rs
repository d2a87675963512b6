use scrawl::image::ImageBatch;
use scrawl::imgproc::interpolation::{
    grid::identity_grid, grid_sample, GridPadding, InterpolationMode,
};
use scrawl::tps::{deform_grid, solve};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn lattice(cols: usize, rows: usize) -> Vec<[f32; 2]> {
    let step = |i: usize, n: usize| -1.0 + 2.0 * i as f32 / (n - 1) as f32;
    (0..rows)
        .flat_map(|r| (0..cols).map(move |c| [step(c, cols), step(r, rows)]))
        .collect()
}

#[test]
fn identity_tps_grid_resamples_the_image() -> Result<()> {
    let (width, height) = (16, 8);
    let data = (0..height)
        .flat_map(|_| (0..width).map(|x| x as f32 / (width - 1) as f32))
        .collect();
    let src = ImageBatch::new(1, [width, height].into(), data)?;

    let control = lattice(3, 3);
    let weights = solve(&control, &control, 0.01)?;

    let grid = deform_grid(&identity_grid(src.size()), &control, &weights)?;
    let dst = grid_sample(&src, &grid, InterpolationMode::Bilinear, GridPadding::Border)?;

    assert_eq!(dst.shape, src.shape);
    for (a, b) in dst.iter().zip(src.iter()) {
        assert!((a - b).abs() < 0.05);
    }
    Ok(())
}

#[test]
fn shifted_targets_move_the_content() -> Result<()> {
    let (width, height) = (16, 8);
    let data = (0..height)
        .flat_map(|_| (0..width).map(|x| x as f32 / (width - 1) as f32))
        .collect();
    let src = ImageBatch::new(1, [width, height].into(), data)?;

    // every output pixel samples further right
    let control = lattice(3, 3);
    let target = control.iter().map(|p| [p[0] + 0.2, p[1]]).collect::<Vec<_>>();
    let weights = solve(&control, &target, 0.01)?;

    let grid = deform_grid(&identity_grid(src.size()), &control, &weights)?;
    let dst = grid_sample(&src, &grid, InterpolationMode::Bilinear, GridPadding::Border)?;

    let center = (height / 2) * width + width / 2;
    assert!(dst.as_slice()[center] > src.as_slice()[center]);
    Ok(())
}
