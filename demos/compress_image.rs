//! Compresses an image through the FFT engine and writes the results.
//!
//! Usage:
//! ```bash
//! cargo run --example compress_image -- <INPUT> <OUTPUT_DIR> [--threshold PCT]
//! ```
//!
//! Writes `spectrum.png` (log-magnitude spectrum at padded dimensions) and
//! `reconstructed.png` (inverse transform cropped to the input size) into
//! the output directory, and prints coefficient-retention statistics.

use std::env;
use std::error::Error;
use std::path::PathBuf;

use image::{GrayImage, Luma, Rgb, RgbImage};

use fftpress::compress::soft_threshold_channels;
use fftpress::fft::ScalarFftImpl;
use fftpress::image::{ChannelSet, RgbPixels, TransformSession};
use fftpress::reveal::reconstruct;
use fftpress::spectrum::log_magnitudes;

fn usage() -> ! {
    eprintln!("Usage: cargo run --example compress_image -- <INPUT> <OUTPUT_DIR> [--threshold PCT]");
    std::process::exit(1);
}

fn load_channels(path: &str) -> Result<(TransformSession, ChannelSet<f64>), Box<dyn Error>> {
    let rgb = image::open(path)?.to_rgb8();
    let (width, height) = rgb.dimensions();
    let session = TransformSession::new(width as usize, height as usize);
    let mut red = Vec::with_capacity(session.width * session.height);
    let mut green = Vec::with_capacity(session.width * session.height);
    let mut blue = Vec::with_capacity(session.width * session.height);
    for y in 0..height {
        for x in 0..width {
            let Rgb([r, g, b]) = *rgb.get_pixel(x, y);
            red.push(r);
            green.push(g);
            blue.push(b);
        }
    }
    let set = ChannelSet::from_rgb_samples(&red, &green, &blue, &session)?;
    Ok((session, set))
}

fn save_pixels(pixels: &RgbPixels, path: &PathBuf) -> Result<(), Box<dyn Error>> {
    let mut out = RgbImage::new(pixels.width() as u32, pixels.height() as u32);
    for y in 0..pixels.height() {
        for x in 0..pixels.width() {
            out.put_pixel(
                x as u32,
                y as u32,
                Rgb([pixels.red[y][x], pixels.green[y][x], pixels.blue[y][x]]),
            );
        }
    }
    out.save(path)?;
    Ok(())
}

fn save_spectrum(set: &ChannelSet<f64>, path: &PathBuf) -> Result<(), Box<dyn Error>> {
    let (mags, max) = log_magnitudes(set)?;
    let rows = mags.len();
    let cols = mags.first().map_or(0, Vec::len);
    let mut out = GrayImage::new(cols as u32, rows as u32);
    for (y, row) in mags.iter().enumerate() {
        for (x, &value) in row.iter().enumerate() {
            // Normalize against this render's own maximum.
            let norm = if max > 0.0 { value / max * 255.0 } else { 0.0 };
            out.put_pixel(x as u32, y as u32, Luma([norm.round() as u8]));
        }
    }
    out.save(path)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let mut input = None;
    let mut out_dir = None;
    let mut threshold = 50.0f32;
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

    let (session, mut set) = load_channels(&input)?;
    println!(
        "{}x{} image, padded to {}x{}",
        session.width, session.height, session.padded_width, session.padded_height
    );

    let fft = ScalarFftImpl::<f64>::default();
    set.forward(&fft)?;
    let reports = soft_threshold_channels(&mut set, threshold);
    println!(
        "retained {} of {} coefficients at {}% threshold ({:.2}% compression)",
        reports.mean_retained(),
        reports.total(),
        threshold,
        reports.red.compression_percent(),
    );

    save_spectrum(&set, &out_dir.join("spectrum.png"))?;
    let pixels = reconstruct(&set, &session, &fft)?;
    save_pixels(&pixels, &out_dir.join("reconstructed.png"))?;
    println!("wrote {}", out_dir.display());
    Ok(())
}
