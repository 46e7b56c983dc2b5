//! Drives the engine the way a UI shell would: the source raster lives on
//! the caller side, the traversal runs on a worker thread, and progress
//! and cancellation travel through the engine's callback seams.

use std::thread;

use rastermill_filters::engine::{self, CancelToken};
use rastermill_filters::filter::FilterKind;
use rastermill_image::{ImageSize, Raster, Rgb8};

/// A synthetic test card: a diagonal color gradient.
fn test_card(size: ImageSize) -> Result<Raster, Box<dyn std::error::Error>> {
    let data = (0..size.num_pixels())
        .map(|i| {
            let x = i % size.width;
            let y = i / size.width;
            Rgb8::new(
                (x * 255 / size.width.max(1)) as u8,
                (y * 255 / size.height.max(1)) as u8,
                128,
            )
        })
        .collect();
    Ok(Raster::new(size, data)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let src = test_card(ImageSize {
        width: 512,
        height: 512,
    })?;

    let filter = FilterKind::gaussian_blur().build()?;
    let token = CancelToken::new();

    let worker = {
        let src = src.clone();
        let probe = token.clone();
        thread::spawn(move || {
            engine::run(
                &src,
                filter.as_ref(),
                &|pct: u8| {
                    if pct % 10 == 0 {
                        println!("gaussian blur: {pct}%");
                    }
                },
                &probe,
            )
        })
    };

    match worker.join().expect("worker panicked") {
        Ok(result) => println!(
            "done: {}x{} pixels, corner {:?}",
            result.width(),
            result.height(),
            result.pixel(0, 0)
        ),
        Err(cancelled) => println!("{cancelled}"),
    }

    // a pre-cancelled token aborts before the first column is processed
    let sepia = FilterKind::Sepia.build()?;
    let token = CancelToken::new();
    token.cancel();
    let outcome = engine::run(&src, sepia.as_ref(), &|_: u8| {}, &token);
    println!("pre-cancelled run produced a raster: {}", outcome.is_ok());

    Ok(())
}
