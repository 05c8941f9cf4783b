//! Apply the uniform rotate effect to an RGB gradient and print each channel.

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
    let size = 4;
    let mut image = ImageGrid::new(size, size, 3);
    for x in 0..size {
        for y in 0..size {
            image.set(x, y, 0, (255 * x / (size - 1)) as u8);
            image.set(x, y, 1, (255 * y / (size - 1)) as u8);
        }
    }

    let mut states = ChannelStates::from_image(&image, false)?;
    states.rotate(0.25, Axis::X)?;
    let out = states.to_image()?;

    for channel in 0..3 {
        print_channel(&format!("channel {channel} (fraction = 0.25)"), &out, channel);
    }
    Ok(())
}
