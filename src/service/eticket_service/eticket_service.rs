use super::RenderError;
use crate::repository::{Booking, Event, User};

///
/// Renders printable e-tickets.
///
/// Rendering is a pure function of its inputs. The document is rebuilt
/// on every call, nothing is cached or written anywhere.
///
#[cfg_attr(test, mockall::automock)]
pub trait ETicketService: Send + Sync {
    ///
    /// Builds a single-page PDF with the booking summary and
    /// an embedded QR code of the same fields.
    ///
    /// ### Errors
    /// - [RenderError] when the QR payload or the document cannot be built;
    /// no partial output is produced
    ///
    fn render_eticket(
        &self,
        booking: &Booking,
        event: &Event,
        purchaser: &User,
    ) -> Result<Vec<u8>, RenderError>;
}
