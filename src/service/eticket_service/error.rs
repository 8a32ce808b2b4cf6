///
/// Payload could not be represented as a QR code,
/// e.g. it exceeds the capacity of the largest version.
/// Oversized payloads are rejected, never truncated.
///
#[derive(Debug, thiserror::Error)]
#[error("qr encoding error: {0}")]
pub struct EncodingError(#[from] qrcode::types::QrError);

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("{0}")]
    Encoding(#[from] EncodingError),

    #[error("date format error: {0}")]
    DateFormat(#[from] time::error::Format),

    #[error("pdf error: {0}")]
    Pdf(#[from] printpdf::Error),
}
