use super::{qr_code, ETicketService, RenderError};
use crate::repository::{Booking, Event, User};
use printpdf::{
    BuiltinFont, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Mm, PdfDocument, Px,
};
use time::macros::format_description;

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);

pub struct ETicketServiceImpl;

impl ETicketServiceImpl {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ETicketServiceImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl ETicketService for ETicketServiceImpl {
    fn render_eticket(
        &self,
        booking: &Booking,
        event: &Event,
        purchaser: &User,
    ) -> Result<Vec<u8>, RenderError> {
        let date = event
            .date
            .format(format_description!("[year]-[month]-[day]"))?;
        let payload = eticket_payload(event, &date, booking.tickets, booking.total_amount);
        let artifact = qr_code::encode(&payload)?;

        let (doc, page, layer) = PdfDocument::new("E-Ticket", PAGE_WIDTH, PAGE_HEIGHT, "ticket");
        let layer = doc.get_page(page).get_layer(layer);

        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;

        layer.use_text("E-Ticket", 26.0, Mm(20.0), Mm(265.0), &bold);
        layer.use_text(event.title.as_str(), 18.0, Mm(20.0), Mm(248.0), &bold);

        let lines = [
            format!("Date: {date}"),
            format!("Time: {}", event.time),
            format!("Venue: {}", event.venue),
            format!("Name: {}", purchaser.name),
            format!("Tickets: {}", booking.tickets),
            format!("Total: ${}", booking.total_amount),
            format!("Booking: {}", booking.id.to_hex()),
            format!("Status: {}", booking.status),
        ];
        let mut y = 234.0;
        for line in lines {
            layer.use_text(line, 12.0, Mm(20.0), Mm(y), &regular);
            y -= 8.0;
        }

        let (width, height) = artifact.dimensions();
        let artifact = Image::from(ImageXObject {
            width: Px(width as usize),
            height: Px(height as usize),
            color_space: ColorSpace::Greyscale,
            bits_per_component: ColorBits::Bit8,
            interpolate: false,
            image_data: artifact.into_raw(),
            image_filter: None,
            smask: None,
            clipping_bbox: None,
        });
        artifact.add_to_layer(
            layer,
            ImageTransform {
                translate_x: Some(Mm(140.0)),
                translate_y: Some(Mm(205.0)),
                dpi: Some(150.0),
                ..Default::default()
            },
        );

        let document = doc.save_to_bytes()?;

        Ok(document)
    }
}

///
/// Canonical payload encoded into the ticket QR code.
///
fn eticket_payload(event: &Event, date: &str, tickets: i64, total_amount: i64) -> String {
    format!(
        "Event: {}\nDate: {}\nTime: {}\nTickets: {}\nTotal: ${}",
        event.title, date, event.time, tickets, total_amount
    )
}
