use pix2coord::{read_image_file, segment, SegmentConfig};
use std::error::Error;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <image.png> [annotated.png]", args[0]);
        std::process::exit(2);
    }

    let image = read_image_file(Path::new(&args[1]))?;
    let seg = segment(&image, &SegmentConfig::default());
    for (i, m) in seg.locations.markers().iter().enumerate() {
        println!(
            "blob {i}: center=({:.1}, {:.1}) radius={:.1}",
            m.center_x, m.center_y, m.radius
        );
    }

    if let Some(out) = args.get(2) {
        seg.annotated.save(out)?;
        println!("Wrote {out}");
    }
    Ok(())
}
