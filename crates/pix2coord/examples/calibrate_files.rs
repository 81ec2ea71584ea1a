use pix2coord::{read_image_file, CalibrationConfig, Calibrator};
use std::error::Error;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!(
            "Usage: {} <calibration.png> <test.png> [machine_x machine_y]",
            args[0]
        );
        std::process::exit(2);
    }

    let config = CalibrationConfig::new([0, 1], 153.0, 500.0, [300.0, 100.0], 3);
    let calibrator = Calibrator::new(config)?;

    let calibration_image = read_image_file(Path::new(&args[1]))?;
    let outcome = calibrator.calibrate(&calibration_image)?;
    let cal = &outcome.calibration;
    println!(
        "Scale: x={:.4} y={:.4} per pixel, rotation {:.2} degrees ({} rounds)",
        cal.scale.scale_x, cal.scale.scale_y, cal.rotation_deg, outcome.rounds
    );

    let position = match (args.get(3), args.get(4)) {
        (Some(x), Some(y)) => [x.parse()?, y.parse()?],
        _ => [200.0, 400.0],
    };
    let test_image = read_image_file(Path::new(&args[2]))?;
    let located = calibrator.locate(&test_image, cal, position)?;
    println!("Detected object machine coordinates:");
    for c in &located.pass.coordinates {
        println!("    {c}");
    }
    Ok(())
}
