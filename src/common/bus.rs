//! Synchronous publish/subscribe channel, one resource per event kind.
//!
//! Handlers are ordinary Bevy systems taking `In<E>`. Subscribing registers the
//! handler as a one-shot system; publishing runs every current handler, in
//! registration order, before returning.
//!
//! ```text
//!   publisher ── publish(world, E) ──▶ EventBus<E> ──▶ handler #1 (In<E>)
//!                                                  └─▶ handler #2 (In<E>)
//! ```
//!
//! There is no queue: if nobody is subscribed, the event is dropped. Listeners
//! are expected to subscribe when their owner is enabled and unsubscribe when
//! it is disabled, so a handler never runs for a torn-down listener.

use std::any::type_name;

use bevy::ecs::system::SystemId;
use bevy::prelude::*;

/// Anything that can travel through an [`EventBus`].
pub trait BusEvent: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> BusEvent for T {}

/// Token returned by [`EventBus::subscribe`]; unique per bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscriber<E: BusEvent> {
    id: SubscriptionId,
    system: SystemId<In<E>>,
}

#[derive(Resource)]
pub struct EventBus<E: BusEvent> {
    subscribers: Vec<Subscriber<E>>,
    next_id: u64,
}

impl<E: BusEvent> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }
}

impl<E: BusEvent> EventBus<E> {
    #[inline]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.subscribers.iter().any(|s| s.id == id)
    }

    /// Register `handler` behind all existing subscribers.
    pub fn subscribe<M>(
        world: &mut World,
        handler: impl IntoSystem<In<E>, (), M> + 'static,
    ) -> SubscriptionId {
        let system = world.register_system(handler);
        world.init_resource::<Self>();

        let mut bus = world.resource_mut::<Self>();
        let id = SubscriptionId(bus.next_id);
        bus.next_id += 1;
        bus.subscribers.push(Subscriber { id, system });
        id
    }

    /// Remove a handler. Returns `false` if it was not subscribed.
    pub fn unsubscribe(world: &mut World, id: SubscriptionId) -> bool {
        let system = {
            let Some(mut bus) = world.get_resource_mut::<Self>() else {
                return false;
            };
            let Some(pos) = bus.subscribers.iter().position(|s| s.id == id) else {
                return false;
            };
            bus.subscribers.remove(pos).system
        };

        if let Err(err) = world.unregister_system(system) {
            warn!("{}: unregistering handler {id:?} failed: {err:?}", type_name::<E>());
        }
        true
    }

    /// Deliver `event` to every current subscriber. Returns how many ran.
    pub fn publish(world: &mut World, event: E) -> usize {
        let snapshot: Vec<(SubscriptionId, SystemId<In<E>>)> = match world.get_resource::<Self>() {
            Some(bus) => bus.subscribers.iter().map(|s| (s.id, s.system)).collect(),
            None => return 0,
        };

        let mut delivered = 0;
        for (id, system) in snapshot {
            // A handler earlier in this publish may have torn this one down.
            let subscribed = world
                .get_resource::<Self>()
                .is_some_and(|bus| bus.contains(id));
            if !subscribed {
                continue;
            }

            match world.run_system_with(system, event.clone()) {
                Ok(()) => delivered += 1,
                Err(err) => error!("{}: handler {id:?} failed: {err:?}", type_name::<E>()),
            }
        }
        delivered
    }
}

/// Publish from a regular system.
///
/// Delivery happens when the command queue is applied, within the same frame.
pub trait PublishExt {
    fn publish<E: BusEvent>(&mut self, event: E);
}

impl PublishExt for Commands<'_, '_> {
    fn publish<E: BusEvent>(&mut self, event: E) {
        self.queue(move |world: &mut World| {
            EventBus::<E>::publish(world, event);
        });
    }
}
