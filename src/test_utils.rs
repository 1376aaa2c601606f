//! Fixtures shared by the unit tests.

use crate::upload::{AcceptedMime, SelectedFile};
use std::io::Cursor;

/// A solid red PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 0, 255]));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("encoding a PNG into memory");
    bytes
}

/// Two points of one polyline in the path/segment/x/y layout the ML service reads.
pub fn csv_file() -> SelectedFile {
    SelectedFile {
        name: "isolated.csv".to_string(),
        mime: AcceptedMime::Csv,
        bytes: b"0,0,1.0,2.0\n0,0,3.0,4.0\n".to_vec(),
    }
}
