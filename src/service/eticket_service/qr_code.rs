use super::EncodingError;
use image::{GrayImage, Luma};
use qrcode::QrCode;

/// Lower bound on the rendered side length, in pixels.
/// The renderer rounds up so every module keeps an integral scale.
pub const QR_MIN_SIZE: u32 = 240;

///
/// Encodes payload into a greyscale QR raster with a quiet-zone border.
/// Identical payloads produce identical rasters.
///
/// ### Errors
/// - [EncodingError] when the payload does not fit the densest QR version
///
pub fn encode(payload: &str) -> Result<GrayImage, EncodingError> {
    let code = QrCode::new(payload.as_bytes())?;

    let image = code
        .render::<Luma<u8>>()
        .quiet_zone(true)
        .min_dimensions(QR_MIN_SIZE, QR_MIN_SIZE)
        .build();

    Ok(image)
}
