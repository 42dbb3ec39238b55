use argh::FromArgs;

use pixwarp::image::{Image, Rgba32};
use pixwarp::imgproc::interpolation::ResampleKernel;
use pixwarp::imgproc::parallel::ExecutionStrategy;
use pixwarp::imgproc::warp::{KernelAccumulation, RotateOptions, RotateProcessor};

#[derive(FromArgs)]
/// Rotate a synthetic checkerboard and report the resulting canvas
struct Args {
    /// rotation angle in degrees
    #[argh(option, short = 'a', default = "30.0")]
    angle: f32,

    /// width of the synthetic image
    #[argh(option, default = "256")]
    width: usize,

    /// height of the synthetic image
    #[argh(option, default = "128")]
    height: usize,

    /// resampling kernel: nearest, triangle, bicubic or lanczos3
    #[argh(option, short = 'k', default = "ResampleKernel::Bicubic", from_str_fn(parse_kernel))]
    kernel: ResampleKernel,

    /// clip the result to the source bounds instead of growing the canvas
    #[argh(switch)]
    no_expand: bool,

    /// use a full 2D convolution for continuous kernels
    #[argh(switch)]
    separable: bool,

    /// number of worker threads, 0 for the global pool
    #[argh(option, short = 't', default = "0")]
    threads: usize,
}

fn parse_kernel(value: &str) -> Result<ResampleKernel, String> {
    match value.to_ascii_lowercase().as_str() {
        "nearest" => Ok(ResampleKernel::Nearest),
        "triangle" | "bilinear" => Ok(ResampleKernel::Triangle),
        "bicubic" => Ok(ResampleKernel::Bicubic),
        "lanczos3" => Ok(ResampleKernel::Lanczos3),
        other => Err(format!("unknown kernel: {other}")),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    // create a checkerboard with 16 pixel cells
    let mut image = Image::from_fn([args.width, args.height].into(), |x, y| {
        if (x / 16 + y / 16) % 2 == 0 {
            Rgba32::new(255, 255, 255, 255)
        } else {
            Rgba32::new(32, 64, 128, 255)
        }
    })?;

    let strategy = match args.threads {
        0 => ExecutionStrategy::AutoRows,
        n => ExecutionStrategy::Fixed(n),
    };
    let accumulation = if args.separable {
        KernelAccumulation::Separable
    } else {
        KernelAccumulation::AxisAverage
    };

    let options = RotateOptions::default()
        .with_angle(args.angle)
        .with_expand(!args.no_expand)
        .with_resampler(args.kernel)
        .with_strategy(strategy)
        .with_accumulation(accumulation);

    let source_size = image.size();
    let start = std::time::Instant::now();
    RotateProcessor::new(options).apply(&mut image)?;
    let elapsed = start.elapsed();

    // a cheap fingerprint of the output
    let checksum = image
        .pixels()
        .fold(0u64, |acc, p| acc.wrapping_mul(31).wrapping_add(p.r as u64 + p.a as u64));

    log::info!(
        "rotated {source_size} by {} degrees -> {} in {elapsed:?}",
        args.angle,
        image.size()
    );
    println!("canvas: {}", image.size());
    println!("checksum: {checksum:016x}");

    Ok(())
}
