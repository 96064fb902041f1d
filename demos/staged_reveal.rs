//! Renders the four-stage reveal of a compressed image to numbered PNGs.
//!
//! Usage:
//! ```bash
//! cargo run --example staged_reveal -- <INPUT> <OUTPUT_DIR> [--threshold PCT]
//! ```
//!
//! The engine computes each stage on demand; here the "host pacing" is just
//! a loop that writes one file per stage.

use std::env;
use std::error::Error;
use std::path::PathBuf;

use image::{Rgb, RgbImage};

use fftpress::compress::soft_threshold_channels;
use fftpress::fft::ScalarFftImpl;
use fftpress::image::{ChannelSet, TransformSession};
use fftpress::reveal::RevealStages;

fn usage() -> ! {
    eprintln!("Usage: cargo run --example staged_reveal -- <INPUT> <OUTPUT_DIR> [--threshold PCT]");
    std::process::exit(1);
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let mut input = None;
    let mut out_dir = None;
    let mut threshold = 0.0f32;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--threshold" => {
                if let Some(v) = args.next() {
                    threshold = v.parse().unwrap_or(threshold);
                }
            }
            _ => {
                if input.is_none() {
                    input = Some(arg);
                } else if out_dir.is_none() {
                    out_dir = Some(arg);
                } else {
                    usage();
                }
            }
        }
    }
    let input = input.unwrap_or_else(|| usage());
    let out_dir = PathBuf::from(out_dir.unwrap_or_else(|| usage()));
    std::fs::create_dir_all(&out_dir)?;
    let threshold = threshold.clamp(0.0, 100.0);

    let rgb = image::open(&input)?.to_rgb8();
    let (width, height) = rgb.dimensions();
    let session = TransformSession::new(width as usize, height as usize);
    let mut red = Vec::new();
    let mut green = Vec::new();
    let mut blue = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let Rgb([r, g, b]) = *rgb.get_pixel(x, y);
            red.push(r);
            green.push(g);
            blue.push(b);
        }
    }
    let mut set = ChannelSet::<f64>::from_rgb_samples(&red, &green, &blue, &session)?;

    let fft = ScalarFftImpl::<f64>::default();
    set.forward(&fft)?;
    soft_threshold_channels(&mut set, threshold);

    for (index, frame) in RevealStages::default_stages(&set, session, &fft).enumerate() {
        let frame = frame?;
        let mut out = RgbImage::new(frame.pixels.width() as u32, frame.pixels.height() as u32);
        for y in 0..frame.pixels.height() {
            for x in 0..frame.pixels.width() {
                out.put_pixel(
                    x as u32,
                    y as u32,
                    Rgb([
                        frame.pixels.red[y][x],
                        frame.pixels.green[y][x],
                        frame.pixels.blue[y][x],
                    ]),
                );
            }
        }
        let path = out_dir.join(format!(
            "stage_{}_{:.0}pct.png",
            index + 1,
            frame.fraction * 100.0
        ));
        out.save(&path)?;
        println!("wrote {}", path.display());
    }
    Ok(())
}
