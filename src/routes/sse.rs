use crate::state::RosterState;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::Stream;
use std::convert::Infallible;
use tokio_stream::{StreamExt, wrappers::BroadcastStream};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SseEvent {
    CrudStudent,
}

impl SseEvent {
    pub const fn name(self) -> &'static str {
        match self {
            Self::CrudStudent => "crud_student",
        }
    }
}

pub async fn sse_feed(
    State(state): State<RosterState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    //lagging behind still means something changed, so refresh anyway
    let stream = BroadcastStream::new(state.subscribe_to_sse_feed()).map(|evt| {
        let evt = evt.unwrap_or(SseEvent::CrudStudent);
        Ok(Event::default().event(evt.name()).data(""))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory_store::InMemoryStudentStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn subscribers_see_sent_events() {
        let state = RosterState::new(Arc::new(InMemoryStudentStore::default()));
        let mut rx = state.subscribe_to_sse_feed();

        state.send_sse_event(SseEvent::CrudStudent);
        assert_eq!(rx.recv().await.unwrap(), SseEvent::CrudStudent);
    }

    #[test]
    fn sending_without_subscribers_is_fine() {
        let state = RosterState::new(Arc::new(InMemoryStudentStore::default()));
        state.send_sse_event(SseEvent::CrudStudent);
    }
}
