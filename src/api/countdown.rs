use actix_web::{get, http::header, web, HttpResponse, Responder};
use futures_util::stream;
use std::convert::Infallible;
use tracing::debug;

use crate::http::AppState;
use crate::landing::countdown::{CountdownSnapshot, CountdownTimer};

fn sse_event(snapshot: &CountdownSnapshot) -> Option<web::Bytes> {
    let data = serde_json::to_string(snapshot).ok()?;
    Some(web::Bytes::from(format!("data: {}\n\n", data)))
}

/// Live countdown as Server-Sent Events
///
/// Each connection owns one timer: an event per tick until the deadline
/// passes, then the stream ends. A client disconnect drops the stream and
/// with it the timer.
#[get("/countdown")]
async fn countdown_stream(state: web::Data<AppState>) -> impl Responder {
    let timer = CountdownTimer::start(state.landing.deadline, state.clock.clone());
    let rx = timer.subscribe();
    debug!("Countdown stream opened for {}", timer.target());

    let events = stream::unfold((timer, rx), |(timer, mut rx)| async move {
        rx.changed().await.ok()?;
        let snapshot = *rx.borrow_and_update();
        let event = sse_event(&snapshot)?;
        Some((Ok::<_, Infallible>(event), (timer, rx)))
    });

    HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        .streaming(events)
}

pub fn countdown_config(config: &mut web::ServiceConfig) {
    config.service(countdown_stream);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landing::vacancy::VacancySnapshot;
    use crate::landing::LandingConfig;
    use actix_web::{http::StatusCode, App};
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    #[actix_web::test]
    async fn stream_ends_once_deadline_has_passed() {
        let deadline = Utc.with_ymd_and_hms(2025, 10, 17, 21, 59, 59).unwrap();
        let landing = LandingConfig {
            deadline,
            vacancies: VacancySnapshot::new(10, 7).unwrap(),
        };
        let after = deadline + chrono::Duration::seconds(5);
        let state = AppState::with_clock(landing, Arc::new(move || after));

        let app = actix_web::test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(countdown_config),
        )
        .await;
        let req = actix_web::test::TestRequest::get().uri("/countdown").to_request();
        let resp = actix_web::test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/event-stream"
        );

        let body = actix_web::test::read_body(resp).await;
        assert!(body.is_empty());
    }

    #[test]
    fn event_is_framed_as_sse_data() {
        let snapshot = CountdownSnapshot { days: 1, hours: 2, minutes: 3, seconds: 4 };
        let event = sse_event(&snapshot).unwrap();
        assert_eq!(
            event,
            web::Bytes::from_static(
                b"data: {\"days\":1,\"hours\":2,\"minutes\":3,\"seconds\":4}\n\n"
            )
        );
    }
}
