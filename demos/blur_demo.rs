//! Blur a tiny grayscale image and print before/after brightness grids.

use quantum_blur::{Axis, ChannelStates, ImageGrid};

fn print_channel(label: &str, image: &ImageGrid, channel: usize) {
    println!("{label}:");
    for y in 0..image.height() {
        let row: Vec<String> = (0..image.width())
            .map(|x| format!("{:>3}", image.get(x, y, channel)))
            .collect();
        println!("  {}", row.join(" "));
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let size = 8;
    let mut image = ImageGrid::new(size, size, 1);
    image.set(3, 3, 0, 255);
    image.set(6, 2, 0, 128);

    print_channel("input", &image, 0);

    let mut states = ChannelStates::from_image(&image, false)?;
    states.blur(0.3, Axis::X)?;
    let out = states.to_image()?;

    print_channel("blurred (xi = 0.3)", &out, 0);
    Ok(())
}
