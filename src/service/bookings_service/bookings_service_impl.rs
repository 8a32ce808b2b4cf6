use super::{BookingsService, BookingsServiceConfig};
use crate::{
    dto::{input, output},
    error::Error,
    repository::{self, BookingsRepository, EventsRepository, UsersRepository},
    service::{
        eticket_service::ETicketService,
        mailer_service::{EmailAttachment, MailerService},
    },
};
use axum::async_trait;
use bson::oid::ObjectId;
use std::{collections::HashMap, sync::Arc};
use time::OffsetDateTime;

pub struct BookingsServiceImpl {
    config: BookingsServiceConfig,
    bookings_repository: Arc<dyn BookingsRepository>,
    events_repository: Arc<dyn EventsRepository>,
    users_repository: Arc<dyn UsersRepository>,
    eticket_service: Arc<dyn ETicketService>,
    mailer_service: Arc<dyn MailerService>,
}

impl BookingsServiceImpl {
    pub fn new(
        config: BookingsServiceConfig,
        bookings_repository: Arc<dyn BookingsRepository>,
        events_repository: Arc<dyn EventsRepository>,
        users_repository: Arc<dyn UsersRepository>,
        eticket_service: Arc<dyn ETicketService>,
        mailer_service: Arc<dyn MailerService>,
    ) -> Self {
        Self {
            config,
            bookings_repository,
            events_repository,
            users_repository,
            eticket_service,
            mailer_service,
        }
    }

    fn validate_tickets(&self, tickets: u32) -> Result<(), Error> {
        if tickets == 0 {
            return Err(Error::Validation("tickets must be a positive integer"));
        }
        if let Some(max_tickets) = self.config.max_tickets_per_booking {
            if tickets > max_tickets {
                return Err(Error::Validation("tickets exceed the per-booking limit"));
            }
        }

        Ok(())
    }

    ///
    /// Post-persistence enrichment: render the e-ticket and mail it.
    /// The booking already exists, so every failure here is downgraded
    /// to a warning and the caller still gets a success.
    ///
    async fn send_confirmation(
        &self,
        booking: &repository::Booking,
        event: &repository::Event,
        user_id: ObjectId,
    ) {
        let user = match self.users_repository.find(user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::warn!(warning = "purchaser not found, skipping confirmation");
                return;
            }
            Err(err) => {
                tracing::warn!(%err, warning = "purchaser lookup failed, skipping confirmation");
                return;
            }
        };

        let document = match self.eticket_service.render_eticket(booking, event, &user) {
            Ok(document) => document,
            Err(err) => {
                tracing::warn!(%err, warning = "e-ticket rendering failed, booking kept");
                return;
            }
        };

        let subject = format!("Your E-Ticket for {}", event.title);
        let text_body = format!(
            "Hi {},\n\nThank you for your booking. Attached is your e-ticket for {}.\n\n\
             Tickets: {}\nTotal: ${}\n\nRegards,\nEvent Team",
            user.name, event.title, booking.tickets, booking.total_amount
        );
        let html_body = format!(
            "<p>Hi {},</p><p>Thank you for your booking. Attached is your e-ticket for \
             <strong>{}</strong>.</p><p><strong>Tickets:</strong> {}<br/>\
             <strong>Total:</strong> ${}</p><p>Regards,<br/>Event Team</p>",
            user.name, event.title, booking.tickets, booking.total_amount
        );
        let attachment = EmailAttachment {
            filename: format!("e-ticket-{}.pdf", booking.id.to_hex()),
            content: document,
            mime_type: "application/pdf".to_string(),
        };

        let send_result = self
            .mailer_service
            .send(&user.email, &subject, &text_body, &html_body, vec![attachment])
            .await;
        if let Err(err) = send_result {
            tracing::warn!(%err, warning = "confirmation delivery failed, booking kept");
        }
    }
}

#[async_trait]
impl BookingsService for BookingsServiceImpl {
    async fn create_booking(
        &self,
        user_id: ObjectId,
        booking: input::Booking,
    ) -> Result<output::Booking, Error> {
        tracing::info!("creating booking");
        tracing::trace!(?booking);

        self.validate_tickets(booking.tickets)?;
        let event_id =
            ObjectId::parse_str(&booking.event_id).map_err(|_| Error::EventNotExist)?;

        let event = self
            .events_repository
            .find(event_id)
            .await?
            .ok_or(Error::EventNotExist)?;

        let tickets = i64::from(booking.tickets);
        let total_amount = event.ticket_price * tickets;

        let booking = self
            .bookings_repository
            .insert(
                user_id,
                event.id,
                tickets,
                total_amount,
                OffsetDateTime::now_utc(),
            )
            .await?;
        tracing::info!(id = %booking.id, total_amount, "created booking");

        self.send_confirmation(&booking, &event, user_id).await;

        Ok(output::Booking::from_parts(booking, &event))
    }

    async fn find_user_bookings(
        &self,
        user_id: ObjectId,
    ) -> Result<Vec<output::Booking>, Error> {
        tracing::info!("finding bookings");

        let bookings = self.bookings_repository.find_many(user_id).await?;
        tracing::info!(count = bookings.len(), "found bookings");

        let event_ids = bookings
            .iter()
            .map(|booking| booking.event_id)
            .collect::<Vec<_>>();
        let events = self
            .events_repository
            .find_many_by_ids(event_ids)
            .await?
            .into_iter()
            .map(|event| (event.id, event))
            .collect::<HashMap<_, _>>();

        let bookings = bookings
            .into_iter()
            .filter_map(|booking| {
                let Some(event) = events.get(&booking.event_id) else {
                    tracing::warn!(
                        booking_id = %booking.id,
                        warning = "booked event no longer exists, booking hidden from list",
                    );
                    return None;
                };
                Some(output::Booking::from_parts(booking, event))
            })
            .collect();

        Ok(bookings)
    }

    async fn download_eticket(
        &self,
        id: ObjectId,
        user_id: ObjectId,
    ) -> Result<output::ETicket, Error> {
        tracing::info!("downloading e-ticket");

        let booking = self
            .bookings_repository
            .find(id, user_id)
            .await?
            .ok_or(Error::BookingNotExist)?;

        let event = self
            .events_repository
            .find(booking.event_id)
            .await?
            .ok_or(Error::EventNotExist)?;

        let user = self
            .users_repository
            .find(user_id)
            .await?
            .ok_or(Error::UserNotExist)?;

        let document = self.eticket_service.render_eticket(&booking, &event, &user)?;
        tracing::info!(id = %booking.id, "rendered e-ticket");

        Ok(output::ETicket {
            filename: format!("e-ticket-{}.pdf", booking.id.to_hex()),
            content: document,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        repository::{MockBookingsRepository, MockEventsRepository, MockUsersRepository},
        service::{
            eticket_service::{EncodingError, MockETicketService, RenderError},
            mailer_service::{DeliveryError, MockMailerService},
        },
    };
    use time::macros::datetime;

    fn config() -> BookingsServiceConfig {
        BookingsServiceConfig {
            max_tickets_per_booking: None,
        }
    }

    fn event_record() -> repository::Event {
        repository::Event {
            id: ObjectId::new(),
            title: "Summer Music Festival".to_string(),
            description: "Three stages, one night".to_string(),
            category: "Music".to_string(),
            venue: "Riverside Park".to_string(),
            date: datetime!(2026-09-18 00:00 UTC),
            time: "18:00".to_string(),
            ticket_price: 150,
            image_url: None,
            is_active: true,
            created_by: ObjectId::new(),
            created_at: datetime!(2026-01-01 12:00 UTC),
        }
    }

    fn booking_record(
        user_id: ObjectId,
        event_id: ObjectId,
        tickets: i64,
        total_amount: i64,
    ) -> repository::Booking {
        repository::Booking {
            id: ObjectId::new(),
            user_id,
            event_id,
            tickets,
            total_amount,
            status: "confirmed".to_string(),
            created_at: datetime!(2026-02-01 12:00 UTC),
        }
    }

    fn user_record(id: ObjectId) -> repository::User {
        repository::User {
            id,
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            password: "hash".to_string(),
            role: "user".to_string(),
            is_active: true,
            otp_code: None,
            otp_expires_at: None,
            created_at: datetime!(2026-01-01 12:00 UTC),
        }
    }

    fn working_enrichment(
        users_repository: &mut MockUsersRepository,
        eticket_service: &mut MockETicketService,
        mailer_service: &mut MockMailerService,
    ) {
        users_repository
            .expect_find()
            .returning(|id| Ok(Some(user_record(id))));
        eticket_service
            .expect_render_eticket()
            .returning(|_, _, _| Ok(b"%PDF-1.3 test".to_vec()));
        mailer_service
            .expect_send()
            .returning(|_, _, _, _, _| Ok(()));
    }

    struct Mocks {
        bookings_repository: MockBookingsRepository,
        events_repository: MockEventsRepository,
        users_repository: MockUsersRepository,
        eticket_service: MockETicketService,
        mailer_service: MockMailerService,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                bookings_repository: MockBookingsRepository::new(),
                events_repository: MockEventsRepository::new(),
                users_repository: MockUsersRepository::new(),
                eticket_service: MockETicketService::new(),
                mailer_service: MockMailerService::new(),
            }
        }

        fn into_service(self, config: BookingsServiceConfig) -> BookingsServiceImpl {
            BookingsServiceImpl::new(
                config,
                Arc::new(self.bookings_repository),
                Arc::new(self.events_repository),
                Arc::new(self.users_repository),
                Arc::new(self.eticket_service),
                Arc::new(self.mailer_service),
            )
        }
    }

    #[tokio::test]
    async fn create_booking_total_amount_snapshotted() {
        let event = event_record();
        let event_id = event.id;

        let mut mocks = Mocks::new();
        mocks
            .events_repository
            .expect_find()
            .return_once(move |_| Ok(Some(event)));
        mocks
            .bookings_repository
            .expect_insert()
            .withf(|_, _, tickets, total_amount, _| *tickets == 2 && *total_amount == 300)
            .returning(|user_id, event_id, tickets, total_amount, _| {
                Ok(booking_record(user_id, event_id, tickets, total_amount))
            });
        working_enrichment(
            &mut mocks.users_repository,
            &mut mocks.eticket_service,
            &mut mocks.mailer_service,
        );
        let service = mocks.into_service(config());

        let booking = service
            .create_booking(
                ObjectId::new(),
                input::Booking {
                    event_id: event_id.to_hex(),
                    tickets: 2,
                },
            )
            .await
            .unwrap();

        assert_eq!(booking.total_amount, 300);
        assert_eq!(booking.tickets, 2);
        assert_eq!(booking.status, "confirmed");
        assert_eq!(booking.event.title, "Summer Music Festival");
    }

    #[tokio::test]
    async fn create_booking_zero_tickets_nothing_persisted() {
        let mut mocks = Mocks::new();
        mocks.events_repository.expect_find().never();
        mocks.bookings_repository.expect_insert().never();
        let service = mocks.into_service(config());

        let create_result = service
            .create_booking(
                ObjectId::new(),
                input::Booking {
                    event_id: ObjectId::new().to_hex(),
                    tickets: 0,
                },
            )
            .await;

        assert!(matches!(create_result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn create_booking_over_ticket_cap_nothing_persisted() {
        let mut mocks = Mocks::new();
        mocks.events_repository.expect_find().never();
        mocks.bookings_repository.expect_insert().never();
        let service = mocks.into_service(BookingsServiceConfig {
            max_tickets_per_booking: Some(10),
        });

        let create_result = service
            .create_booking(
                ObjectId::new(),
                input::Booking {
                    event_id: ObjectId::new().to_hex(),
                    tickets: 11,
                },
            )
            .await;

        assert!(matches!(create_result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn create_booking_event_not_exist_nothing_persisted() {
        let mut mocks = Mocks::new();
        mocks.events_repository.expect_find().returning(|_| Ok(None));
        mocks.bookings_repository.expect_insert().never();
        let service = mocks.into_service(config());

        let create_result = service
            .create_booking(
                ObjectId::new(),
                input::Booking {
                    event_id: ObjectId::new().to_hex(),
                    tickets: 2,
                },
            )
            .await;

        assert!(matches!(create_result, Err(Error::EventNotExist)));
    }

    #[tokio::test]
    async fn create_booking_garbage_event_id_nothing_persisted() {
        let mut mocks = Mocks::new();
        mocks.events_repository.expect_find().never();
        mocks.bookings_repository.expect_insert().never();
        let service = mocks.into_service(config());

        let create_result = service
            .create_booking(
                ObjectId::new(),
                input::Booking {
                    event_id: "not an object id".to_string(),
                    tickets: 2,
                },
            )
            .await;

        assert!(matches!(create_result, Err(Error::EventNotExist)));
    }

    #[tokio::test]
    async fn create_booking_insert_database_error() {
        let event = event_record();

        let mut mocks = Mocks::new();
        mocks
            .events_repository
            .expect_find()
            .return_once(move |_| Ok(Some(event)));
        mocks.bookings_repository.expect_insert().returning(|_, _, _, _, _| {
            Err(repository::Error::Mongo(
                mongodb::error::ErrorKind::Custom(Arc::new("any database error")).into(),
            ))
        });
        let service = mocks.into_service(config());

        let create_result = service
            .create_booking(
                ObjectId::new(),
                input::Booking {
                    event_id: ObjectId::new().to_hex(),
                    tickets: 2,
                },
            )
            .await;

        assert!(matches!(create_result, Err(Error::Database(_))));
    }

    #[tokio::test]
    async fn create_booking_render_error_still_succeeds() {
        let event = event_record();

        let mut mocks = Mocks::new();
        mocks
            .events_repository
            .expect_find()
            .return_once(move |_| Ok(Some(event)));
        mocks
            .bookings_repository
            .expect_insert()
            .returning(|user_id, event_id, tickets, total_amount, _| {
                Ok(booking_record(user_id, event_id, tickets, total_amount))
            });
        mocks
            .users_repository
            .expect_find()
            .returning(|id| Ok(Some(user_record(id))));
        mocks
            .eticket_service
            .expect_render_eticket()
            .returning(|_, _, _| {
                Err(RenderError::Encoding(EncodingError::from(
                    qrcode::types::QrError::DataTooLong,
                )))
            });
        // no mail goes out without a rendered attachment
        mocks.mailer_service.expect_send().never();
        let service = mocks.into_service(config());

        let booking = service
            .create_booking(
                ObjectId::new(),
                input::Booking {
                    event_id: ObjectId::new().to_hex(),
                    tickets: 2,
                },
            )
            .await
            .unwrap();

        assert_eq!(booking.total_amount, 300);
    }

    #[tokio::test]
    async fn create_booking_delivery_error_still_succeeds() {
        let event = event_record();

        let mut mocks = Mocks::new();
        mocks
            .events_repository
            .expect_find()
            .return_once(move |_| Ok(Some(event)));
        mocks
            .bookings_repository
            .expect_insert()
            .returning(|user_id, event_id, tickets, total_amount, _| {
                Ok(booking_record(user_id, event_id, tickets, total_amount))
            });
        mocks
            .users_repository
            .expect_find()
            .returning(|id| Ok(Some(user_record(id))));
        mocks
            .eticket_service
            .expect_render_eticket()
            .returning(|_, _, _| Ok(b"%PDF-1.3 test".to_vec()));
        mocks.mailer_service.expect_send().returning(|_, _, _, _, _| {
            Err(DeliveryError::Address(
                "not an address".parse::<lettre::Address>().unwrap_err(),
            ))
        });
        let service = mocks.into_service(config());

        let booking = service
            .create_booking(
                ObjectId::new(),
                input::Booking {
                    event_id: ObjectId::new().to_hex(),
                    tickets: 2,
                },
            )
            .await
            .unwrap();

        assert_eq!(booking.total_amount, 300);
    }

    #[tokio::test]
    async fn create_booking_purchaser_missing_skips_mail_still_succeeds() {
        let event = event_record();

        let mut mocks = Mocks::new();
        mocks
            .events_repository
            .expect_find()
            .return_once(move |_| Ok(Some(event)));
        mocks
            .bookings_repository
            .expect_insert()
            .returning(|user_id, event_id, tickets, total_amount, _| {
                Ok(booking_record(user_id, event_id, tickets, total_amount))
            });
        mocks.users_repository.expect_find().returning(|_| Ok(None));
        mocks.eticket_service.expect_render_eticket().never();
        mocks.mailer_service.expect_send().never();
        let service = mocks.into_service(config());

        let create_result = service
            .create_booking(
                ObjectId::new(),
                input::Booking {
                    event_id: ObjectId::new().to_hex(),
                    tickets: 1,
                },
            )
            .await;

        assert!(create_result.is_ok());
    }

    #[tokio::test]
    async fn create_booking_confirmation_attachment_is_pdf() {
        let event = event_record();

        let mut mocks = Mocks::new();
        mocks
            .events_repository
            .expect_find()
            .return_once(move |_| Ok(Some(event)));
        mocks
            .bookings_repository
            .expect_insert()
            .returning(|user_id, event_id, tickets, total_amount, _| {
                Ok(booking_record(user_id, event_id, tickets, total_amount))
            });
        mocks
            .users_repository
            .expect_find()
            .returning(|id| Ok(Some(user_record(id))));
        mocks
            .eticket_service
            .expect_render_eticket()
            .returning(|_, _, _| Ok(b"%PDF-1.3 test".to_vec()));
        mocks
            .mailer_service
            .expect_send()
            .withf(|recipient, subject, text_body, _, attachments| {
                recipient == "john@example.com"
                    && subject == "Your E-Ticket for Summer Music Festival"
                    && text_body.contains("Tickets: 2")
                    && text_body.contains("Total: $300")
                    && attachments.len() == 1
                    && attachments[0].mime_type == "application/pdf"
                    && attachments[0].filename.starts_with("e-ticket-")
                    && attachments[0].filename.ends_with(".pdf")
            })
            .returning(|_, _, _, _, _| Ok(()));
        let service = mocks.into_service(config());

        service
            .create_booking(
                ObjectId::new(),
                input::Booking {
                    event_id: ObjectId::new().to_hex(),
                    tickets: 2,
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn find_user_bookings_with_event_summaries() {
        let user_id = ObjectId::new();
        let event = event_record();
        let event_id = event.id;
        let event_clone_id = event.id;

        let mut mocks = Mocks::new();
        mocks
            .bookings_repository
            .expect_find_many()
            .returning(move |user_id| {
                Ok(vec![booking_record(user_id, event_clone_id, 2, 300)])
            });
        mocks
            .events_repository
            .expect_find_many_by_ids()
            .withf(move |ids| ids == &[event_id])
            .return_once(move |_| Ok(vec![event]));
        let service = mocks.into_service(config());

        let bookings = service.find_user_bookings(user_id).await.unwrap();

        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].event.id, event_id.to_hex());
        assert_eq!(bookings[0].total_amount, 300);
    }

    #[tokio::test]
    async fn download_eticket_other_users_booking_not_found() {
        let mut mocks = Mocks::new();
        // ownership is part of the filter, a foreign booking comes back as None
        mocks.bookings_repository.expect_find().returning(|_, _| Ok(None));
        mocks.eticket_service.expect_render_eticket().never();
        let service = mocks.into_service(config());

        let download_result = service
            .download_eticket(ObjectId::new(), ObjectId::new())
            .await;

        assert!(matches!(download_result, Err(Error::BookingNotExist)));
    }

    #[tokio::test]
    async fn download_eticket_renders_fresh_document() {
        let user_id = ObjectId::new();
        let event = event_record();
        let event_id = event.id;

        let mut mocks = Mocks::new();
        mocks
            .bookings_repository
            .expect_find()
            .returning(move |id, user_id| {
                let mut booking = booking_record(user_id, event_id, 2, 300);
                booking.id = id;
                Ok(Some(booking))
            });
        mocks
            .events_repository
            .expect_find()
            .return_once(move |_| Ok(Some(event)));
        mocks
            .users_repository
            .expect_find()
            .returning(|id| Ok(Some(user_record(id))));
        mocks
            .eticket_service
            .expect_render_eticket()
            .returning(|_, _, _| Ok(b"%PDF-1.3 test".to_vec()));
        let service = mocks.into_service(config());

        let booking_id = ObjectId::new();
        let eticket = service.download_eticket(booking_id, user_id).await.unwrap();

        assert_eq!(eticket.filename, format!("e-ticket-{}.pdf", booking_id.to_hex()));
        assert!(eticket.content.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn download_eticket_render_error_propagates() {
        let user_id = ObjectId::new();
        let event = event_record();
        let event_id = event.id;

        let mut mocks = Mocks::new();
        mocks
            .bookings_repository
            .expect_find()
            .returning(move |id, user_id| {
                let mut booking = booking_record(user_id, event_id, 2, 300);
                booking.id = id;
                Ok(Some(booking))
            });
        mocks
            .events_repository
            .expect_find()
            .return_once(move |_| Ok(Some(event)));
        mocks
            .users_repository
            .expect_find()
            .returning(|id| Ok(Some(user_record(id))));
        mocks
            .eticket_service
            .expect_render_eticket()
            .returning(|_, _, _| {
                Err(RenderError::Encoding(EncodingError::from(
                    qrcode::types::QrError::DataTooLong,
                )))
            });
        let service = mocks.into_service(config());

        let download_result = service.download_eticket(ObjectId::new(), user_id).await;

        assert!(matches!(download_result, Err(Error::Render(_))));
    }
}
