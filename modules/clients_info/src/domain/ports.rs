use tracing::info;

use super::events::ClientDomainEvent;

/// Output port: publish domain events (no knowledge of transport).
pub trait EventPublisher<E>: Send + Sync + 'static {
    fn publish(&self, event: &E);
}

/// Default publisher: records each domain event in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventPublisher;

impl EventPublisher<ClientDomainEvent> for TracingEventPublisher {
    fn publish(&self, event: &ClientDomainEvent) {
        info!(client_id = %event.id(), kind = event.kind(), "client event");
    }
}
